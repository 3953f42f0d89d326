//! Centralized constants for the geonames crate
//!
//! This module consolidates constants that are used across multiple modules
//! to avoid duplication and ensure consistency.

/// GeoNames web service endpoints
pub mod api {
    /// Host serving every GeoNames JSON endpoint
    pub const DOMAIN: &str = "api.geonames.org";

    /// Full-text place search
    pub const GEOCODE_PATH: &str = "/searchJSON";

    /// Closest populated place to a point
    pub const REVERSE_PATH: &str = "/findNearbyPlaceNameJSON";

    /// Closest toponym of any feature class
    pub const REVERSE_NEARBY_PATH: &str = "/findNearbyJSON";

    /// Timezone of a point
    pub const TIMEZONE_PATH: &str = "/timezoneJSON";

    /// GeoNames does not serve https at the time of writing
    pub const DEFAULT_SCHEME: &str = "http";

    /// Prefix of the status message sent for free accounts hitting premium features
    pub const NOT_ENABLED_PREFIX: &str = "user account not enabled to use";

    /// Sign-up page quoted when no username is configured
    pub const LOGIN_URL: &str = "http://www.geonames.org/login";
}

/// HTTP transport settings
pub mod http {
    /// Default request timeout in seconds
    pub const DEFAULT_TIMEOUT_SECS: u64 = 1;

    /// Default User-Agent header
    pub const DEFAULT_USER_AGENT: &str = concat!("geonames/", env!("CARGO_PKG_VERSION"));
}

/// Query defaults
pub mod query {
    /// Placeholder replaced by the query in the format string
    pub const PLACEHOLDER: &str = "{}";

    /// Default format string (query passed through untouched)
    pub const DEFAULT_FORMAT_STRING: &str = "{}";
}
