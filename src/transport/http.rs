//! Blocking HTTP transport
//!
//! Wraps `reqwest::blocking::Client`. Timeouts, proxies, User-Agent and TLS
//! trust settings are fixed when the client is built; the per-call timeout
//! can still be overridden.
//!
//! Note: a blocking client must not be created or dropped inside an async
//! context. The server builds its geocoder before starting the runtime.

use crate::constants::http::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use crate::error::{Error, Result};
use crate::transport::Transport;
use reqwest::StatusCode;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// TLS trust settings
#[derive(Debug, Clone, Default)]
pub struct TlsOptions {
    /// Skip certificate verification entirely
    pub accept_invalid_certs: bool,
    /// Extra PEM root certificates to trust
    pub root_certificates: Vec<PathBuf>,
}

/// Settings used to build an `HttpTransport`
#[derive(Debug, Clone)]
pub struct TransportOptions {
    /// Default timeout for every request
    pub timeout: Duration,
    /// Proxy URLs applied to all schemes
    pub proxies: Vec<String>,
    /// User-Agent header value
    pub user_agent: String,
    /// TLS trust settings
    pub tls: TlsOptions,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            proxies: Vec::new(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            tls: TlsOptions::default(),
        }
    }
}

/// `Transport` backed by a blocking reqwest client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    options: TransportOptions,
}

impl HttpTransport {
    /// Build a transport from the given options
    pub fn new(options: TransportOptions) -> Result<Self> {
        let mut builder = reqwest::blocking::Client::builder()
            .user_agent(options.user_agent.clone())
            .timeout(options.timeout)
            .danger_accept_invalid_certs(options.tls.accept_invalid_certs);

        for proxy in &options.proxies {
            let proxy = reqwest::Proxy::all(proxy)
                .map_err(|e| Error::Config(format!("Invalid proxy {}: {}", proxy, e)))?;
            builder = builder.proxy(proxy);
        }

        for path in &options.tls.root_certificates {
            let pem = fs::read(path).map_err(|e| {
                Error::Config(format!("Failed to read certificate {}: {}", path.display(), e))
            })?;
            let cert = reqwest::Certificate::from_pem(&pem).map_err(|e| {
                Error::Config(format!("Invalid certificate {}: {}", path.display(), e))
            })?;
            builder = builder.add_root_certificate(cert);
        }

        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, options })
    }

    /// User-Agent sent with every request
    pub fn user_agent(&self) -> &str {
        &self.options.user_agent
    }

    /// Default request timeout
    pub fn timeout(&self) -> Duration {
        self.options.timeout
    }
}

impl Transport for HttpTransport {
    fn get_json(&self, url: &str, timeout: Option<Duration>) -> Result<serde_json::Value> {
        let mut request = self.client.get(url);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        debug!("GET {}", url);
        let response = request.send().map_err(send_error)?;

        let status = response.status();
        let body = response.text().map_err(send_error)?;

        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        serde_json::from_str(&body)
            .map_err(|e| Error::Parse(format!("Could not deserialize response: {}", e)))
    }
}

/// Classify a failure to reach the service
fn send_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::TimedOut(err.to_string())
    } else if err.is_connect() {
        Error::Unavailable(err.to_string())
    } else {
        Error::Http(err)
    }
}

/// Map a non-2xx status onto the error taxonomy
fn status_error(status: StatusCode, body: &str) -> Error {
    let message = if body.trim().is_empty() {
        format!("Non-successful status code {}", status)
    } else {
        format!("Non-successful status code {}: {}", status, body.trim())
    };

    match status {
        StatusCode::UNAUTHORIZED => Error::AuthenticationFailure(message),
        StatusCode::FORBIDDEN => Error::InsufficientPrivileges(message),
        StatusCode::TOO_MANY_REQUESTS => Error::QuotaExceeded(message),
        StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
            Error::Unavailable(message)
        }
        _ => Error::Service(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = TransportOptions::default();
        assert_eq!(options.timeout, Duration::from_secs(1));
        assert!(options.user_agent.starts_with("geonames/"));
        assert!(options.proxies.is_empty());
        assert!(!options.tls.accept_invalid_certs);
    }

    #[test]
    fn test_custom_user_agent() {
        let transport = HttpTransport::new(TransportOptions {
            user_agent: "my_user_agent/1.0".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(transport.user_agent(), "my_user_agent/1.0");
    }

    #[test]
    fn test_missing_certificate_is_config_error() {
        let result = HttpTransport::new(TransportOptions {
            tls: TlsOptions {
                accept_invalid_certs: false,
                root_certificates: vec![PathBuf::from("/nonexistent/ca.pem")],
            },
            ..Default::default()
        });
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            status_error(StatusCode::UNAUTHORIZED, ""),
            Error::AuthenticationFailure(_)
        ));
        assert!(matches!(
            status_error(StatusCode::FORBIDDEN, ""),
            Error::InsufficientPrivileges(_)
        ));
        assert!(matches!(
            status_error(StatusCode::TOO_MANY_REQUESTS, ""),
            Error::QuotaExceeded(_)
        ));
        assert!(matches!(
            status_error(StatusCode::SERVICE_UNAVAILABLE, ""),
            Error::Unavailable(_)
        ));
        assert!(matches!(
            status_error(StatusCode::INTERNAL_SERVER_ERROR, ""),
            Error::Service(_)
        ));
    }

    #[test]
    fn test_status_message_includes_body() {
        let err = status_error(StatusCode::BAD_REQUEST, "  bad lat  ");
        assert!(err.to_string().contains("bad lat"));
        assert!(err.to_string().contains("400"));
    }
}
