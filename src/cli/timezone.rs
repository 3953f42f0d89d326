//! Timezone command handler

use crate::cli::resolve_formatter;
use crate::config::Config;
use crate::coord::PointQuery;
use crate::error::Result;
use clap::Args;
use std::time::Duration;

/// Timezone command arguments
#[derive(Args)]
pub struct TimezoneArgs {
    /// Point as "lat, lng"
    #[arg(allow_hyphen_values = true)]
    pub point: String,

    /// Output format (json, text)
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
}

/// Run the timezone command
pub fn run(args: TimezoneArgs, username: Option<&str>) -> Result<()> {
    let config = Config::load()?;
    let formatter = resolve_formatter(args.format.as_deref(), &config)?;
    let geocoder = config.geocoder(username)?;

    let timezone = geocoder.reverse_timezone(
        PointQuery::Text(args.point),
        args.timeout.map(Duration::from_secs),
    )?;

    println!("{}", formatter.format_timezone(&timezone)?);
    Ok(())
}
