//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/geonames/config.toml

pub mod defaults;

use crate::error::{Error, Result};
use crate::geo::GeoNames;
use crate::transport::TlsOptions;
use defaults::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// GeoNames account settings
    #[serde(default)]
    pub account: AccountConfig,

    /// HTTP transport settings
    #[serde(default)]
    pub http: HttpConfig,

    /// CLI output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// GeoNames account settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountConfig {
    /// GeoNames username (falls back to $GEONAMES_USERNAME when empty)
    #[serde(default)]
    pub username: String,

    /// Country code used to bias search results
    #[serde(default)]
    pub country_bias: String,
}

/// HTTP transport settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// URL scheme, "http" or "https"
    #[serde(default = "default_scheme")]
    pub scheme: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Custom User-Agent (empty means the built-in one)
    #[serde(default)]
    pub user_agent: String,

    /// Proxy URL (empty means none)
    #[serde(default)]
    pub proxy: String,

    /// Skip TLS certificate verification
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

/// CLI output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format
    #[serde(default = "default_format")]
    pub format: String,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

// Default value functions for serde
fn default_scheme() -> String {
    DEFAULT_SCHEME.to_string()
}
fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            scheme: default_scheme(),
            timeout_secs: default_timeout_secs(),
            user_agent: String::new(),
            proxy: String::new(),
            accept_invalid_certs: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, creating it with defaults if missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| {
                Error::Config(format!("Failed to read config file: {}", e))
            })?;

            toml::from_str(&content).map_err(|e| {
                Error::Config(format!("Failed to parse config file: {}", e))
            })
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            Error::Config(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(path, content).map_err(|e| {
            Error::Config(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["account", "username"] => Some(self.account.username.clone()),
            ["account", "country_bias"] => Some(self.account.country_bias.clone()),

            ["http", "scheme"] => Some(self.http.scheme.clone()),
            ["http", "timeout_secs"] => Some(self.http.timeout_secs.to_string()),
            ["http", "user_agent"] => Some(self.http.user_agent.clone()),
            ["http", "proxy"] => Some(self.http.proxy.clone()),
            ["http", "accept_invalid_certs"] => Some(self.http.accept_invalid_certs.to_string()),

            ["output", "format"] => Some(self.output.format.clone()),

            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["account", "username"] => {
                self.account.username = value.to_string();
            }
            ["account", "country_bias"] => {
                self.account.country_bias = value.to_string();
            }

            ["http", "scheme"] => {
                if value != "http" && value != "https" {
                    return Err(Error::Config(format!("Invalid scheme value: {}", value)));
                }
                self.http.scheme = value.to_string();
            }
            ["http", "timeout_secs"] => {
                self.http.timeout_secs = value
                    .parse()
                    .ok()
                    .filter(|secs| *secs > 0)
                    .ok_or_else(|| Error::Config(format!("Invalid timeout value: {}", value)))?;
            }
            ["http", "user_agent"] => {
                self.http.user_agent = value.to_string();
            }
            ["http", "proxy"] => {
                self.http.proxy = value.to_string();
            }
            ["http", "accept_invalid_certs"] => {
                self.http.accept_invalid_certs = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid boolean value: {}", value))
                })?;
            }

            ["output", "format"] => {
                self.output.format = value.to_string();
            }

            ["server", "host"] => {
                self.server.host = value.to_string();
            }
            ["server", "port"] => {
                self.server.port = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid port value: {}", value))
                })?;
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "account.username",
            "account.country_bias",
            "http.scheme",
            "http.timeout_secs",
            "http.user_agent",
            "http.proxy",
            "http.accept_invalid_certs",
            "output.format",
            "server.host",
            "server.port",
        ]
    }

    /// Username to use: `override_name`, then the config file, then the environment
    pub fn username(&self, override_name: Option<&str>) -> Option<String> {
        resolve_username(
            override_name,
            &self.account.username,
            std::env::var(USERNAME_ENV_VAR).ok(),
        )
    }

    /// Default request timeout; a zero in a hand-edited file falls back to the default
    pub fn request_timeout(&self) -> Duration {
        match self.http.timeout_secs {
            0 => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            secs => Duration::from_secs(secs),
        }
    }

    /// Build a GeoNames geocoder from these settings
    ///
    /// Fails with a configuration error when no username can be found.
    pub fn geocoder(&self, username_override: Option<&str>) -> Result<GeoNames> {
        let mut builder = GeoNames::builder()
            .scheme(self.http.scheme.clone())
            .timeout(self.request_timeout())
            .tls(TlsOptions {
                accept_invalid_certs: self.http.accept_invalid_certs,
                root_certificates: Vec::new(),
            });

        if let Some(username) = self.username(username_override) {
            builder = builder.username(username);
        }
        if !self.account.country_bias.is_empty() {
            builder = builder.country_bias(self.account.country_bias.clone());
        }
        if !self.http.user_agent.is_empty() {
            builder = builder.user_agent(self.http.user_agent.clone());
        }
        if !self.http.proxy.is_empty() {
            builder = builder.proxy(self.http.proxy.clone());
        }

        builder.build()
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn resolve_username(
    override_name: Option<&str>,
    configured: &str,
    env_value: Option<String>,
) -> Option<String> {
    override_name
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .or_else(|| (!configured.is_empty()).then(|| configured.to_string()))
        .or_else(|| env_value.filter(|name| !name.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.http.scheme, "http");
        assert_eq!(config.http.timeout_secs, 1);
        assert_eq!(config.output.format, "text");
        assert_eq!(config.server.port, 7979);
        assert!(config.account.username.is_empty());
    }

    #[test]
    fn test_get_set() {
        let mut config = Config::default();

        assert_eq!(config.get("http.scheme"), Some("http".to_string()));

        config.set("account.username", "norbert").unwrap();
        assert_eq!(config.get("account.username"), Some("norbert".to_string()));

        config.set("http.timeout_secs", "10").unwrap();
        assert_eq!(config.http.timeout_secs, 10);

        config.set("http.accept_invalid_certs", "true").unwrap();
        assert!(config.http.accept_invalid_certs);
    }

    #[test]
    fn test_get_invalid_key() {
        let config = Config::default();
        assert_eq!(config.get("invalid.key"), None);
    }

    #[test]
    fn test_set_invalid_key() {
        let mut config = Config::default();
        assert!(config.set("invalid.key", "value").is_err());
    }

    #[test]
    fn test_set_invalid_value() {
        let mut config = Config::default();
        assert!(config.set("http.timeout_secs", "soon").is_err());
        assert!(config.set("http.timeout_secs", "0").is_err());
        assert_eq!(config.http.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(config.set("http.scheme", "ftp").is_err());
        assert!(config.set("server.port", "99999").is_err());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("geonames").join("config.toml");

        let mut config = Config::default();
        config.account.username = "norbert".to_string();
        config.account.country_bias = "DE".to_string();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.account.username, "norbert");
        assert_eq!(loaded.account.country_bias, "DE");
    }

    #[test]
    fn test_load_creates_default_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.server.port, 7979);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[account]\nusername = \"norbert\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.account.username, "norbert");
        assert_eq!(config.http.scheme, "http");
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[account\n").unwrap();

        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));
    }

    #[test]
    fn test_serialization_format() {
        let toml = toml::to_string_pretty(&Config::default()).unwrap();

        assert!(toml.contains("[account]"));
        assert!(toml.contains("[http]"));
        assert!(toml.contains("[output]"));
        assert!(toml.contains("[server]"));
    }

    #[test]
    fn test_resolve_username_precedence() {
        let env = Some("from_env".to_string());

        assert_eq!(
            resolve_username(Some("cli"), "file", env.clone()),
            Some("cli".to_string())
        );
        assert_eq!(
            resolve_username(None, "file", env.clone()),
            Some("file".to_string())
        );
        assert_eq!(resolve_username(None, "", env), Some("from_env".to_string()));
        assert_eq!(resolve_username(Some(""), "", None), None);
    }

    #[test]
    fn test_geocoder_from_config() {
        let mut config = Config::default();
        config.account.username = "norbert".to_string();
        config.account.country_bias = "DE".to_string();
        config.http.scheme = "https".to_string();

        let geocoder = config.geocoder(None).unwrap();
        assert_eq!(geocoder.username(), "norbert");
        assert_eq!(geocoder.country_bias(), Some("DE"));
        assert_eq!(geocoder.api(), "https://api.geonames.org/searchJSON");

        let geocoder = config.geocoder(Some("override")).unwrap();
        assert_eq!(geocoder.username(), "override");
    }

    #[test]
    fn test_zero_timeout_falls_back_to_default() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[account]\nusername = \"norbert\"\n\n[http]\ntimeout_secs = 0\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.http.timeout_secs, 0);
        assert_eq!(config.request_timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert!(config.geocoder(None).is_ok());

        let mut config = Config::default();
        config.set("http.timeout_secs", "5").unwrap();
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_server_addr() {
        assert_eq!(Config::default().server_addr(), "127.0.0.1:7979");
    }

    #[test]
    fn test_available_keys() {
        let keys = Config::available_keys();
        for key in &keys {
            assert!(Config::default().get(key).is_some(), "{key} not readable");
        }
        assert!(keys.contains(&"account.username"));
    }
}
