//! geonames: GeoNames geocoding client
//!
//! A library and CLI tool for the GeoNames web service
//! (http://www.geonames.org/export/web-services.html).
//!
//! ## Features
//!
//! - Forward geocoding (`searchJSON`) with optional country bias
//! - Reverse geocoding via `findNearbyPlaceName` or `findNearby`
//! - Timezone lookup resolved through `chrono-tz`
//! - Pluggable request transport (blocking reqwest by default)
//! - CLI + JSON API interface
//!
//! ## Quick Start
//!
//! ```no_run
//! use geonames::geo::{GeoNames, GeocodeOptions, ReverseOptions};
//!
//! let geocoder = GeoNames::builder().username("my_username").build()?;
//!
//! // Best match for a place name
//! if let Some(found) = geocoder.geocode("Berlin", &GeocodeOptions::default())? {
//!     println!("{:?}", found.first());
//! }
//!
//! // Nearest populated place to a point
//! let options = ReverseOptions { exactly_one: Some(true), ..Default::default() };
//! let nearest = geocoder.reverse("52.50, 13.41", &options)?;
//! println!("{:?}", nearest);
//!
//! // Timezone of a point
//! let timezone = geocoder.reverse_timezone((40.7538, -73.9849), None)?;
//! println!("{} (UTC{})", timezone.id(), timezone.utc_offset());
//! # Ok::<(), geonames::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod coord;
pub mod error;
pub mod format;
pub mod geo;
pub mod server;
pub mod timezone;
pub mod transport;

// Re-export commonly used types
pub use config::Config;
pub use coord::{Coordinates, PointQuery};
pub use error::{Error, Result};
pub use geo::{Found, GeoNames, Location};
pub use timezone::Timezone;
