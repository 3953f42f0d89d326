//! geonames CLI entry point
//!
//! GeoNames geocoding client - CLI + JSON API server

use geonames::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
