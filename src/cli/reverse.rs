//! Reverse command handler
//!
//! Finds the place nearest to a point.

use crate::cli::resolve_formatter;
use crate::config::Config;
use crate::coord::PointQuery;
use crate::error::Result;
use crate::geo::{FindNearbyType, ReverseOptions};
use clap::Args;
use std::time::Duration;

/// Reverse command arguments
#[derive(Args)]
pub struct ReverseArgs {
    /// Point as "lat, lng"
    #[arg(allow_hyphen_values = true)]
    pub point: String,

    /// Show only the nearest place
    #[arg(long, conflicts_with = "all")]
    pub exactly_one: bool,

    /// Show every place returned
    #[arg(long, short = 'a')]
    pub all: bool,

    /// GeoNames feature code (findNearby only)
    #[arg(long)]
    pub feature_code: Option<String>,

    /// Language of the returned names (findNearbyPlaceName only)
    #[arg(long)]
    pub lang: Option<String>,

    /// Endpoint: findNearbyPlaceName or findNearby
    #[arg(long, default_value_t = FindNearbyType::FindNearbyPlaceName.to_string())]
    pub nearby_type: String,

    /// Output format (json, text)
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
}

impl ReverseArgs {
    /// `None` when neither --exactly-one nor --all was given
    pub fn exactly_one(&self) -> Option<bool> {
        match (self.exactly_one, self.all) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

/// Run the reverse command
pub fn run(args: ReverseArgs, username: Option<&str>) -> Result<()> {
    let config = Config::load()?;
    let formatter = resolve_formatter(args.format.as_deref(), &config)?;
    let geocoder = config.geocoder(username)?;

    let options = ReverseOptions {
        exactly_one: args.exactly_one(),
        timeout: args.timeout.map(Duration::from_secs),
        feature_code: args.feature_code.clone(),
        lang: args.lang.clone(),
        find_nearby_type: args.nearby_type.clone(),
    };
    let found = geocoder.reverse(PointQuery::Text(args.point), &options)?;

    println!("{}", formatter.format_places(found.as_ref())?);
    Ok(())
}
