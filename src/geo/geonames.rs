//! GeoNames geocoding backend
//!
//! Search documentation: http://www.geonames.org/export/geonames-search.html
//! Reverse geocoding documentation:
//! http://www.geonames.org/export/web-services.html#findNearbyPlaceName
//!
//! Every call builds one URL, hands it to the configured `Transport` and
//! maps the JSON it gets back. Nothing is cached or retried here.

use crate::constants::api::{
    DEFAULT_SCHEME, DOMAIN, GEOCODE_PATH, LOGIN_URL, NOT_ENABLED_PREFIX, REVERSE_NEARBY_PATH,
    REVERSE_PATH, TIMEZONE_PATH,
};
use crate::constants::query::{DEFAULT_FORMAT_STRING, PLACEHOLDER};
use crate::coord::{Coordinates, PointQuery};
use crate::error::{Error, Result};
use crate::geo::{Found, Location};
use crate::timezone::{ChronoTzResolver, Timezone, TimezoneResolver};
use crate::transport::{HttpTransport, TlsOptions, Transport, TransportOptions};
use serde_json::Value;
use std::sync::{Arc, Once};
use std::time::Duration;
use tracing::{debug, warn};

static EXACTLY_ONE_DEFAULT_WARNING: Once = Once::new();

/// Which reverse-geocoding endpoint to query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindNearbyType {
    /// Closest populated place; supports `lang`
    FindNearbyPlaceName,
    /// Closest toponym of any kind; supports `feature_code`
    FindNearby,
}

impl std::fmt::Display for FindNearbyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FindNearbyPlaceName => write!(f, "findNearbyPlaceName"),
            Self::FindNearby => write!(f, "findNearby"),
        }
    }
}

impl std::str::FromStr for FindNearbyType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "findNearbyPlaceName" => Ok(Self::FindNearbyPlaceName),
            "findNearby" => Ok(Self::FindNearby),
            _ => Err(Error::Query(format!(
                "`{}` find_nearby_type is not supported",
                s
            ))),
        }
    }
}

/// Options for `GeoNames::geocode`
#[derive(Debug, Clone)]
pub struct GeocodeOptions {
    /// Return only the best match (also sends `maxRows=1`)
    pub exactly_one: bool,
    /// Per-call timeout override
    pub timeout: Option<Duration>,
}

impl Default for GeocodeOptions {
    fn default() -> Self {
        Self {
            exactly_one: true,
            timeout: None,
        }
    }
}

/// Options for `GeoNames::reverse`
#[derive(Debug, Clone)]
pub struct ReverseOptions {
    /// Return one result or all of them; unset means "all", with a warning
    pub exactly_one: Option<bool>,
    /// Per-call timeout override
    pub timeout: Option<Duration>,
    /// GeoNames feature code (`findNearby` only)
    pub feature_code: Option<String>,
    /// Language of the returned `name` (`findNearbyPlaceName` only)
    pub lang: Option<String>,
    /// Endpoint selector, `findNearbyPlaceName` or `findNearby`
    pub find_nearby_type: String,
}

impl Default for ReverseOptions {
    fn default() -> Self {
        Self {
            exactly_one: None,
            timeout: None,
            feature_code: None,
            lang: None,
            find_nearby_type: FindNearbyType::FindNearbyPlaceName.to_string(),
        }
    }
}

/// Builder for `GeoNames`
#[derive(Default)]
pub struct GeoNamesBuilder {
    username: Option<String>,
    country_bias: Option<String>,
    scheme: Option<String>,
    format_string: Option<String>,
    transport_options: TransportOptions,
    transport: Option<Arc<dyn Transport>>,
    timezone_resolver: Option<Arc<dyn TimezoneResolver>>,
}

impl GeoNamesBuilder {
    /// GeoNames account name (required); sign up at http://www.geonames.org/login
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Country code used to prioritise search results
    pub fn country_bias(mut self, country_bias: impl Into<String>) -> Self {
        self.country_bias = Some(country_bias.into());
        self
    }

    /// URL scheme; defaults to `http` because GeoNames does not serve https
    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = Some(scheme.into());
        self
    }

    /// Query template; `{}` is replaced by the geocode query
    pub fn format_string(mut self, format_string: impl Into<String>) -> Self {
        self.format_string = Some(format_string.into());
        self
    }

    /// Default request timeout; per-call options may override it
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.transport_options.timeout = timeout;
        self
    }

    /// Route requests through a proxy (may be given more than once)
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.transport_options.proxies.push(proxy.into());
        self
    }

    /// User-Agent header sent with every request
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.transport_options.user_agent = user_agent.into();
        self
    }

    /// TLS trust settings (invalid certificates, extra root certificates)
    pub fn tls(mut self, tls: TlsOptions) -> Self {
        self.transport_options.tls = tls;
        self
    }

    /// Use a custom transport instead of building an `HttpTransport`
    ///
    /// Timeout, proxy, User-Agent and TLS settings are then ignored.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Use a custom timezone resolver instead of `ChronoTzResolver`
    pub fn timezone_resolver(mut self, resolver: Arc<dyn TimezoneResolver>) -> Self {
        self.timezone_resolver = Some(resolver);
        self
    }

    /// Validate the settings and build the geocoder
    pub fn build(self) -> Result<GeoNames> {
        let username = match self.username {
            Some(username) if !username.trim().is_empty() => username,
            _ => {
                return Err(Error::Config(format!(
                    "No username given, required for api access. If you do not \
                     have a GeoNames username, sign up here: {}",
                    LOGIN_URL
                )))
            }
        };

        let scheme = self.scheme.unwrap_or_else(|| DEFAULT_SCHEME.to_string());
        if scheme != "http" && scheme != "https" {
            return Err(Error::Config(format!(
                "Supported schemes are `http` and `https`, got `{}`",
                scheme
            )));
        }

        let format_string = self
            .format_string
            .unwrap_or_else(|| DEFAULT_FORMAT_STRING.to_string());
        if !format_string.contains(PLACEHOLDER) {
            return Err(Error::Config(format!(
                "Format string must contain `{}`: {}",
                PLACEHOLDER, format_string
            )));
        }

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new(self.transport_options)?),
        };
        let timezone_resolver = self
            .timezone_resolver
            .unwrap_or_else(|| Arc::new(ChronoTzResolver));

        let endpoint = |path: &str| format!("{}://{}{}", scheme, DOMAIN, path);

        Ok(GeoNames {
            api: endpoint(GEOCODE_PATH),
            api_reverse: endpoint(REVERSE_PATH),
            api_reverse_nearby: endpoint(REVERSE_NEARBY_PATH),
            api_timezone: endpoint(TIMEZONE_PATH),
            username,
            country_bias: self.country_bias.filter(|bias| !bias.is_empty()),
            format_string,
            transport,
            timezone_resolver,
        })
    }
}

/// GeoNames geocoder
///
/// Immutable after construction and safe to share between threads.
pub struct GeoNames {
    username: String,
    country_bias: Option<String>,
    format_string: String,
    api: String,
    api_reverse: String,
    api_reverse_nearby: String,
    api_timezone: String,
    transport: Arc<dyn Transport>,
    timezone_resolver: Arc<dyn TimezoneResolver>,
}

impl std::fmt::Debug for GeoNames {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeoNames")
            .field("username", &self.username)
            .field("country_bias", &self.country_bias)
            .field("api", &self.api)
            .finish_non_exhaustive()
    }
}

impl GeoNames {
    pub fn builder() -> GeoNamesBuilder {
        GeoNamesBuilder::default()
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn country_bias(&self) -> Option<&str> {
        self.country_bias.as_deref()
    }

    /// Search endpoint URL
    pub fn api(&self) -> &str {
        &self.api
    }

    /// `findNearbyPlaceName` endpoint URL
    pub fn api_reverse(&self) -> &str {
        &self.api_reverse
    }

    /// `findNearby` endpoint URL
    pub fn api_reverse_nearby(&self) -> &str {
        &self.api_reverse_nearby
    }

    /// Timezone endpoint URL
    pub fn api_timezone(&self) -> &str {
        &self.api_timezone
    }

    /// Return a location point by address
    ///
    /// `Ok(None)` when the service knows no matching place.
    pub fn geocode(&self, query: &str, options: &GeocodeOptions) -> Result<Option<Found>> {
        let mut params = vec![
            ("q", self.format_string.replacen(PLACEHOLDER, query, 1)),
            ("username", self.username.clone()),
        ];
        if let Some(bias) = &self.country_bias {
            params.push(("countryBias", bias.clone()));
        }
        if options.exactly_one {
            params.push(("maxRows", "1".to_string()));
        }

        let url = build_url(&self.api, &params);
        debug!("GeoNames.geocode: {}", url);

        let doc = self.transport.get_json(&url, options.timeout)?;
        parse_json(&doc, options.exactly_one)
    }

    /// Return an address by location point
    ///
    /// `query` may be `Coordinates`, a `(lat, lng)` pair, a two-element
    /// sequence or a `"lat, lng"` string.
    pub fn reverse(
        &self,
        query: impl Into<PointQuery>,
        options: &ReverseOptions,
    ) -> Result<Option<Found>> {
        let exactly_one = match options.exactly_one {
            Some(exactly_one) => exactly_one,
            None => {
                warn_exactly_one_default(&EXACTLY_ONE_DEFAULT_WARNING);
                false
            }
        };

        let (lat, lng) = query.into().to_param_strings()?;
        let feature_code = non_empty(&options.feature_code);
        let lang = non_empty(&options.lang);

        let mut params = vec![
            ("lat", lat),
            ("lng", lng),
            ("username", self.username.clone()),
        ];

        let base = match options.find_nearby_type.parse::<FindNearbyType>()? {
            FindNearbyType::FindNearbyPlaceName => {
                if feature_code.is_some() {
                    return Err(Error::InvalidInput(
                        "find_nearby_type=findNearbyPlaceName doesn't support the `feature_code` param"
                            .to_string(),
                    ));
                }
                if let Some(lang) = lang {
                    params.push(("lang", lang.to_string()));
                }
                &self.api_reverse
            }
            FindNearbyType::FindNearby => {
                if lang.is_some() {
                    return Err(Error::InvalidInput(
                        "find_nearby_type=findNearby doesn't support the `lang` param".to_string(),
                    ));
                }
                if let Some(feature_code) = feature_code {
                    params.push(("featureCode", feature_code.to_string()));
                }
                &self.api_reverse_nearby
            }
        };

        let url = build_url(base, &params);
        debug!("GeoNames.reverse: {}", url);

        let doc = self.transport.get_json(&url, options.timeout)?;
        parse_json(&doc, exactly_one)
    }

    /// Find the timezone for a point
    pub fn reverse_timezone(
        &self,
        query: impl Into<PointQuery>,
        timeout: Option<Duration>,
    ) -> Result<Timezone> {
        if !self.timezone_resolver.is_available() {
            return Err(Error::Config(
                "Timezone support is not available in this build".to_string(),
            ));
        }

        let (lat, lng) = query.into().to_param_strings()?;
        let params = vec![
            ("lat", lat),
            ("lng", lng),
            ("username", self.username.clone()),
        ];

        let url = build_url(&self.api_timezone, &params);
        debug!("GeoNames.timezone: {}", url);

        let doc = self.transport.get_json(&url, timeout)?;
        parse_json_timezone(doc, self.timezone_resolver.as_ref())
    }
}

/// Warn that `exactly_one` was left unset, at most once per `gate`
fn warn_exactly_one_default(gate: &Once) {
    gate.call_once(|| {
        warn!(
            "GeoNames.reverse: `exactly_one` was not given and defaults to false; \
             the default will become true. Pass it explicitly to silence this warning."
        );
    });
}

/// Join URL-encoded parameters onto an endpoint
fn build_url(base: &str, params: &[(&str, String)]) -> String {
    let query = params
        .iter()
        .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{}?{}", base, query)
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Raise the error carried in a `status` object, if any
fn check_status(doc: &Value) -> Result<()> {
    let Some(message) = doc.get("status").and_then(|status| status.get("message")) else {
        return Ok(());
    };
    let message = match message.as_str() {
        Some(text) => text.to_string(),
        None => message.to_string(),
    };

    if message.starts_with(NOT_ENABLED_PREFIX) {
        Err(Error::InsufficientPrivileges(message))
    } else {
        Err(Error::Service(message))
    }
}

/// Parse a search/reverse response body
fn parse_json(doc: &Value, exactly_one: bool) -> Result<Option<Found>> {
    let places = doc
        .get("geonames")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    check_status(doc)?;

    let Some(first) = places.first() else {
        return Ok(None);
    };

    if exactly_one {
        return Ok(parse_place(first)?.map(Found::One));
    }

    let mut locations = Vec::with_capacity(places.len());
    for place in places {
        if let Some(location) = parse_place(place)? {
            locations.push(location);
        }
    }
    Ok(Some(Found::Many(locations)))
}

/// Parse one place; `None` when it has no usable coordinates
fn parse_place(place: &Value) -> Result<Option<Location>> {
    let (Some(lat), Some(lng)) = (truthy(place.get("lat")), truthy(place.get("lng"))) else {
        return Ok(None);
    };
    let point = Coordinates::new(coordinate(lat, "latitude")?, coordinate(lng, "longitude")?);

    let address = ["name", "adminName1", "countryName"]
        .into_iter()
        .filter_map(|key| place.get(key).and_then(Value::as_str))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ");

    Ok(Some(Location {
        address,
        point,
        raw: place.clone(),
    }))
}

/// Filter out missing, null, empty and zero values
fn truthy(value: Option<&Value>) -> Option<&Value> {
    let value = value?;
    let present = match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    };
    present.then_some(value)
}

/// GeoNames sends coordinates as strings; accept numbers too
fn coordinate(value: &Value, what: &str) -> Result<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| Error::Parse(format!("Invalid {}: {}", what, value)))
}

/// Parse a timezone response body
fn parse_json_timezone(doc: Value, resolver: &dyn TimezoneResolver) -> Result<Timezone> {
    let Some(timezone_id) = doc.get("timezoneId").and_then(Value::as_str) else {
        check_status(&doc)?;
        return Err(Error::Parse(
            "Timezone response has no `timezoneId`".to_string(),
        ));
    };
    let timezone_id = timezone_id.to_string();
    resolver.from_timezone_name(&timezone_id, doc)
}
