//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod config;
pub mod geocode;
pub mod reverse;
pub mod serve;
pub mod timezone;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::{available_formats, get_formatter, OutputFormatter};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// GeoNames geocoding client
#[derive(Parser)]
#[command(name = "geonames")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// GeoNames username (overrides config and $GEONAMES_USERNAME)
    #[arg(long, short = 'u', global = true)]
    pub username: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Look up coordinates for an address or place name
    Geocode(geocode::GeocodeArgs),

    /// Look up the place nearest to a point
    Reverse(reverse::ReverseArgs),

    /// Look up the timezone of a point
    Timezone(timezone::TimezoneArgs),

    /// Manage configuration
    Config(config::ConfigArgs),

    /// Start the JSON API server (foreground)
    Serve(serve::ServeArgs),
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.command {
        Commands::Serve(_) => "info",
        _ => "warn",
    };
    init_logging(default_level);

    let username = cli.username.as_deref();
    match cli.command {
        Commands::Geocode(args) => geocode::run(args, username),
        Commands::Reverse(args) => reverse::run(args, username),
        Commands::Timezone(args) => timezone::run(args, username),
        Commands::Config(args) => config::run(args),
        Commands::Serve(args) => serve::run(args, username),
    }
}

/// Install the tracing subscriber; `RUST_LOG` wins over `default_level`
fn init_logging(default_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Pick the formatter named on the command line, else the configured one
pub(crate) fn resolve_formatter(
    requested: Option<&str>,
    config: &Config,
) -> Result<Box<dyn OutputFormatter>> {
    let name = requested.unwrap_or(&config.output.format);
    get_formatter(name).ok_or_else(|| {
        let known = available_formats()
            .into_iter()
            .map(|f| f.name)
            .collect::<Vec<_>>()
            .join(", ");
        Error::Config(format!("Unknown format: {} (available: {})", name, known))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_reverse_with_negative_point() {
        let cli = Cli::try_parse_from([
            "geonames",
            "reverse",
            "-33.92, 18.42",
            "--exactly-one",
            "--nearby-type",
            "findNearby",
        ])
        .unwrap();

        let Commands::Reverse(args) = cli.command else {
            panic!("expected reverse");
        };
        assert_eq!(args.point, "-33.92, 18.42");
        assert_eq!(args.exactly_one(), Some(true));
        assert_eq!(args.nearby_type, "findNearby");
    }

    #[test]
    fn test_global_username() {
        let cli = Cli::try_parse_from(["geonames", "geocode", "Berlin", "-u", "norbert"]).unwrap();
        assert_eq!(cli.username.as_deref(), Some("norbert"));
    }

    #[test]
    fn test_resolve_formatter() {
        let config = Config::default();
        assert_eq!(resolve_formatter(None, &config).unwrap().name(), "text");
        assert_eq!(resolve_formatter(Some("json"), &config).unwrap().name(), "json");
        assert!(matches!(
            resolve_formatter(Some("gpx"), &config),
            Err(Error::Config(_))
        ));
    }
}
