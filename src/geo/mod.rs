//! Geocoding module
//!
//! Provides geocoding (location name to coordinates), reverse geocoding and
//! timezone lookup against the GeoNames web service.

pub mod geonames;

pub use geonames::{FindNearbyType, GeoNames, GeoNamesBuilder, GeocodeOptions, ReverseOptions};

use crate::coord::Coordinates;
use serde::Serialize;

/// A geocoded location result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    /// Display label (place, region, country)
    pub address: String,
    /// Coordinates of the place
    pub point: Coordinates,
    /// Place object exactly as returned by the service
    pub raw: serde_json::Value,
}

impl Location {
    pub fn latitude(&self) -> f64 {
        self.point.lat
    }

    pub fn longitude(&self) -> f64 {
        self.point.lng
    }
}

/// Outcome of a lookup that found something
///
/// `One` is produced when a single result was requested; `Many` keeps the
/// service order and may be empty when every place lacked coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Found {
    One(Location),
    Many(Vec<Location>),
}

impl Found {
    /// All locations as a list
    pub fn into_vec(self) -> Vec<Location> {
        match self {
            Self::One(location) => vec![location],
            Self::Many(locations) => locations,
        }
    }

    /// First location, if any
    pub fn first(&self) -> Option<&Location> {
        match self {
            Self::One(location) => Some(location),
            Self::Many(locations) => locations.first(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Many(locations) => locations.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn berlin() -> Location {
        Location {
            address: "Berlin, Berlin, Germany".to_string(),
            point: Coordinates::new(52.52437, 13.41053),
            raw: json!({"name": "Berlin"}),
        }
    }

    #[test]
    fn test_found_into_vec() {
        assert_eq!(Found::One(berlin()).into_vec().len(), 1);
        assert_eq!(Found::Many(vec![berlin(), berlin()]).into_vec().len(), 2);
        assert!(Found::Many(vec![]).is_empty());
    }

    #[test]
    fn test_found_first() {
        assert_eq!(Found::One(berlin()).first().unwrap().latitude(), 52.52437);
        assert!(Found::Many(vec![]).first().is_none());
    }

    #[test]
    fn test_location_serialization() {
        let value = serde_json::to_value(Found::One(berlin())).unwrap();
        assert_eq!(value["address"], "Berlin, Berlin, Germany");
        assert_eq!(value["point"]["lng"], 13.41053);
        assert_eq!(value["raw"]["name"], "Berlin");

        let value = serde_json::to_value(Found::Many(vec![berlin()])).unwrap();
        assert!(value.is_array());
    }
}
