//! Default configuration values
//!
//! Named constants for all tunable parameters

/// Default URL scheme for GeoNames requests
pub const DEFAULT_SCHEME: &str = crate::constants::api::DEFAULT_SCHEME;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = crate::constants::http::DEFAULT_TIMEOUT_SECS;

/// Default output format
pub const DEFAULT_FORMAT: &str = "text";

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 7979;

/// Environment variable consulted when no username is configured
pub const USERNAME_ENV_VAR: &str = "GEONAMES_USERNAME";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "geonames";
