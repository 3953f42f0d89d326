//! JSON output formatter

use crate::error::Result;
use crate::format::OutputFormatter;
use crate::geo::Found;
use crate::timezone::Timezone;

/// JSON formatter - outputs full results as pretty-printed JSON
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Full JSON result including raw service data"
    }

    fn format_places(&self, found: Option<&Found>) -> Result<String> {
        Ok(serde_json::to_string_pretty(&found)?)
    }

    fn format_timezone(&self, timezone: &Timezone) -> Result<String> {
        let value = serde_json::json!({
            "id": timezone.id(),
            "utc_offset_secs": timezone.utc_offset().local_minus_utc(),
            "raw": timezone.raw(),
        });
        Ok(serde_json::to_string_pretty(&value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Coordinates;
    use crate::geo::Location;
    use crate::timezone::{ChronoTzResolver, TimezoneResolver};
    use serde_json::json;

    #[test]
    fn test_json_places() {
        let found = Found::One(Location {
            address: "Berlin, Germany".to_string(),
            point: Coordinates::new(52.5, 13.4),
            raw: json!({"geonameId": 2950159}),
        });

        let output = JsonFormatter.format_places(Some(&found)).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["address"], "Berlin, Germany");
        assert_eq!(parsed["raw"]["geonameId"], 2950159);
    }

    #[test]
    fn test_json_nothing_found() {
        assert_eq!(JsonFormatter.format_places(None).unwrap(), "null");
    }

    #[test]
    fn test_json_timezone() {
        let tz = ChronoTzResolver
            .from_timezone_name("UTC", json!({"countryCode": "GB"}))
            .unwrap();

        let output = JsonFormatter.format_timezone(&tz).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["id"], "UTC");
        assert_eq!(parsed["utc_offset_secs"], 0);
        assert_eq!(parsed["raw"]["countryCode"], "GB");
    }
}
