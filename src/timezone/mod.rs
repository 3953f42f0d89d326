//! Timezone resolution
//!
//! The timezone endpoint only returns an IANA identifier. Turning that into
//! something usable is delegated to a `TimezoneResolver`; the stock one is
//! backed by the compiled-in `chrono-tz` database.

use crate::error::{Error, Result};
use chrono::{DateTime, FixedOffset, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use std::str::FromStr;

/// A resolved timezone with the raw service response attached
#[derive(Debug, Clone, Serialize)]
pub struct Timezone {
    id: String,
    #[serde(skip)]
    tz: Tz,
    raw: serde_json::Value,
}

impl Timezone {
    /// Build a timezone from an already-resolved `Tz`
    pub fn new(tz: Tz, raw: serde_json::Value) -> Self {
        Self {
            id: tz.name().to_string(),
            tz,
            raw,
        }
    }

    /// IANA identifier, e.g. "America/New_York"
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn tz(&self) -> Tz {
        self.tz
    }

    /// Response the identifier came from
    pub fn raw(&self) -> &serde_json::Value {
        &self.raw
    }

    /// UTC offset in effect at `at`
    pub fn utc_offset_at(&self, at: DateTime<Utc>) -> FixedOffset {
        self.tz.offset_from_utc_datetime(&at.naive_utc()).fix()
    }

    /// UTC offset in effect right now
    pub fn utc_offset(&self) -> FixedOffset {
        self.utc_offset_at(Utc::now())
    }
}

impl std::fmt::Display for Timezone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// Turns timezone identifiers into `Timezone` values
pub trait TimezoneResolver: Send + Sync {
    /// Whether timezone support can be used in this build/runtime
    fn is_available(&self) -> bool {
        true
    }

    /// Resolve `timezone_id`, keeping `raw` for downstream inspection
    fn from_timezone_name(&self, timezone_id: &str, raw: serde_json::Value) -> Result<Timezone>;
}

/// Resolver backed by the `chrono-tz` database
#[derive(Debug, Clone, Copy, Default)]
pub struct ChronoTzResolver;

impl TimezoneResolver for ChronoTzResolver {
    fn from_timezone_name(&self, timezone_id: &str, raw: serde_json::Value) -> Result<Timezone> {
        let tz = Tz::from_str(timezone_id).map_err(|_| {
            Error::Parse(format!("Unknown timezone name: {}", timezone_id))
        })?;
        Ok(Timezone::new(tz, raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_resolve_known_name() {
        let raw = json!({"timezoneId": "America/New_York", "countryCode": "US"});
        let tz = ChronoTzResolver
            .from_timezone_name("America/New_York", raw.clone())
            .unwrap();

        assert_eq!(tz.id(), "America/New_York");
        assert_eq!(tz.tz(), chrono_tz::America::New_York);
        assert_eq!(tz.raw()["countryCode"], "US");
    }

    #[test]
    fn test_resolve_unknown_name() {
        let err = ChronoTzResolver
            .from_timezone_name("Mars/Olympus_Mons", json!({}))
            .unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_utc_offset_follows_dst() {
        let tz = ChronoTzResolver
            .from_timezone_name("Europe/Berlin", json!({}))
            .unwrap();

        let winter = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let summer = Utc.with_ymd_and_hms(2024, 7, 15, 12, 0, 0).unwrap();

        assert_eq!(tz.utc_offset_at(winter).local_minus_utc(), 3600);
        assert_eq!(tz.utc_offset_at(summer).local_minus_utc(), 7200);
    }

    #[test]
    fn test_stock_resolver_is_available() {
        assert!(ChronoTzResolver.is_available());
    }

    #[test]
    fn test_serializes_id_and_raw() {
        let tz = ChronoTzResolver
            .from_timezone_name("Asia/Tokyo", json!({"gmtOffset": 9}))
            .unwrap();
        let value = serde_json::to_value(&tz).unwrap();
        assert_eq!(value["id"], "Asia/Tokyo");
        assert_eq!(value["raw"]["gmtOffset"], 9);
    }
}
