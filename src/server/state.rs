//! Server shared state
//!
//! Holds the geocoder shared by every request handler.

use crate::geo::GeoNames;
use std::sync::Arc;
use std::time::Instant;

/// Shared state for the HTTP server
pub struct AppState {
    /// Geocoder; immutable, so no lock is needed
    pub geocoder: Arc<GeoNames>,

    started: Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(geocoder: Arc<GeoNames>) -> Self {
        Self {
            geocoder,
            started: Instant::now(),
        }
    }

    /// Seconds since the state was created
    pub fn uptime_secs(&self) -> u64 {
        self.started.elapsed().as_secs()
    }
}
