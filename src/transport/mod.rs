//! Request execution
//!
//! The geocoder never talks to the network itself. It hands a fully-formed
//! URL to a `Transport` and gets parsed JSON back. `HttpTransport` is the
//! stock implementation; tests plug in a fake.

pub mod http;

pub use http::{HttpTransport, TlsOptions, TransportOptions};

use crate::error::Result;
use std::time::Duration;

/// Executes GET requests and returns the decoded JSON body
///
/// Implementations must be thread-safe (Send + Sync) so one geocoder can be
/// shared by the async server.
pub trait Transport: Send + Sync {
    /// Fetch `url` and decode the body as JSON
    ///
    /// `timeout` overrides the transport's default for this call only.
    /// Non-2xx responses and network failures are reported as errors.
    fn get_json(&self, url: &str, timeout: Option<Duration>) -> Result<serde_json::Value>;
}
