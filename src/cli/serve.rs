//! Serve command handler
//!
//! Starts the HTTP server in foreground mode.

use crate::config::Config;
use crate::error::Result;
use crate::server;
use clap::Args;
use std::sync::Arc;
use tracing::info;

/// Serve command arguments
#[derive(Args)]
pub struct ServeArgs {
    /// Host address to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long, short = 'p')]
    pub port: Option<u16>,
}

/// Run the serve command
pub fn run(args: ServeArgs, username: Option<&str>) -> Result<()> {
    // Load and optionally override config
    let mut config = Config::load()?;

    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    // Blocking HTTP client: build it before the runtime exists
    let geocoder = Arc::new(config.geocoder(username)?);

    info!(
        "Starting geonames server v{} on {}",
        env!("CARGO_PKG_VERSION"),
        config.server_addr()
    );

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server::run(config, geocoder.clone()))
}
