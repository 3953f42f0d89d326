//! Geocode command handler
//!
//! Resolves an address or place name to coordinates.

use crate::cli::resolve_formatter;
use crate::config::Config;
use crate::error::Result;
use crate::geo::GeocodeOptions;
use clap::Args;
use std::time::Duration;

/// Geocode command arguments
#[derive(Args)]
pub struct GeocodeArgs {
    /// Address or place name
    pub query: String,

    /// Show every match instead of the best one
    #[arg(long, short = 'a')]
    pub all: bool,

    /// Country code to prioritise (e.g. "DE")
    #[arg(long)]
    pub country_bias: Option<String>,

    /// Output format (json, text)
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
}

/// Run the geocode command
pub fn run(args: GeocodeArgs, username: Option<&str>) -> Result<()> {
    let mut config = Config::load()?;
    if let Some(bias) = args.country_bias {
        config.account.country_bias = bias;
    }

    let formatter = resolve_formatter(args.format.as_deref(), &config)?;
    let geocoder = config.geocoder(username)?;

    let options = GeocodeOptions {
        exactly_one: !args.all,
        timeout: args.timeout.map(Duration::from_secs),
    };
    let found = geocoder.geocode(&args.query, &options)?;

    println!("{}", formatter.format_places(found.as_ref())?);
    Ok(())
}
