//! Human-readable text output formatter

use crate::error::Result;
use crate::format::OutputFormatter;
use crate::geo::{Found, Location};
use crate::timezone::Timezone;

/// Text formatter - one line per location
pub struct TextFormatter;

fn location_line(location: &Location) -> String {
    format!(
        "{} ({:.6}, {:.6})",
        location.address, location.point.lat, location.point.lng
    )
}

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable text"
    }

    fn format_places(&self, found: Option<&Found>) -> Result<String> {
        let Some(found) = found else {
            return Ok("No results found".to_string());
        };

        let output = match found {
            Found::One(location) => location_line(location),
            Found::Many(locations) if locations.is_empty() => "No results found".to_string(),
            Found::Many(locations) => locations
                .iter()
                .enumerate()
                .map(|(i, location)| format!("{:>3}. {}", i + 1, location_line(location)))
                .collect::<Vec<_>>()
                .join("\n"),
        };
        Ok(output)
    }

    fn format_timezone(&self, timezone: &Timezone) -> Result<String> {
        Ok(format!("{} (UTC{})", timezone.id(), timezone.utc_offset()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Coordinates;
    use crate::timezone::{ChronoTzResolver, TimezoneResolver};
    use serde_json::json;

    fn place(address: &str, lat: f64, lng: f64) -> Location {
        Location {
            address: address.to_string(),
            point: Coordinates::new(lat, lng),
            raw: json!({}),
        }
    }

    #[test]
    fn test_text_single() {
        let found = Found::One(place("Berlin, Berlin, Germany", 52.52437, 13.41053));
        let output = TextFormatter.format_places(Some(&found)).unwrap();
        assert_eq!(output, "Berlin, Berlin, Germany (52.524370, 13.410530)");
    }

    #[test]
    fn test_text_many_numbered() {
        let found = Found::Many(vec![
            place("Berlin, Germany", 52.5, 13.4),
            place("Berlin, Maryland, United States", 38.3, -75.2),
        ]);
        let output = TextFormatter.format_places(Some(&found)).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("  1. Berlin, Germany"));
        assert!(lines[1].starts_with("  2. Berlin, Maryland"));
    }

    #[test]
    fn test_text_nothing_found() {
        assert_eq!(TextFormatter.format_places(None).unwrap(), "No results found");
        let empty = Found::Many(vec![]);
        assert_eq!(
            TextFormatter.format_places(Some(&empty)).unwrap(),
            "No results found"
        );
    }

    #[test]
    fn test_text_timezone() {
        let tz = ChronoTzResolver.from_timezone_name("UTC", json!({})).unwrap();
        assert_eq!(TextFormatter.format_timezone(&tz).unwrap(), "UTC (UTC+00:00)");
    }

    #[test]
    fn test_text_formatter_info() {
        assert_eq!(TextFormatter.name(), "text");
        assert!(!TextFormatter.description().is_empty());
    }
}
