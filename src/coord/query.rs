//! Point queries accepted by reverse and timezone lookups
//!
//! A caller may hand over a `Coordinates` value, a two-element numeric
//! sequence, or a `"lat, lng"` string. All of them are reduced to the pair of
//! decimal strings placed in the `lat`/`lng` query parameters.

use crate::coord::Coordinates;
use crate::error::{Error, Result};

const INVALID_POINT: &str = "Must be a coordinate pair or Point";

/// Anything that can name a point on the globe
#[derive(Debug, Clone, PartialEq)]
pub enum PointQuery {
    /// A structured point
    Point(Coordinates),
    /// A numeric sequence; valid only with exactly two elements
    Sequence(Vec<f64>),
    /// Free text in the form `"lat, lng"`
    Text(String),
}

impl PointQuery {
    /// Resolve the query into validated coordinates
    ///
    /// Longitudes outside [-180, 180] wrap around; latitudes beyond the
    /// poles and non-finite values are rejected.
    pub fn to_coordinates(&self) -> Result<Coordinates> {
        let mut coords = match self {
            Self::Point(c) => *c,
            Self::Sequence(values) => match values.as_slice() {
                [lat, lng] => Coordinates::new(*lat, *lng),
                _ => return Err(Error::InvalidInput(INVALID_POINT.to_string())),
            },
            Self::Text(text) => parse_text(text)?,
        };
        coords.lng = wrap_longitude(coords.lng);

        coords
            .validate()
            .map_err(|_| Error::InvalidInput(INVALID_POINT.to_string()))?;
        Ok(coords)
    }

    /// Resolve the query into the `(lat, lng)` strings sent on the wire
    pub fn to_param_strings(&self) -> Result<(String, String)> {
        let coords = self.to_coordinates()?;
        Ok((format_coordinate(coords.lat), format_coordinate(coords.lng)))
    }
}

/// Parse `"lat, lng"`; anything but two numeric components is rejected
fn parse_text(text: &str) -> Result<Coordinates> {
    let parts: Vec<&str> = text.split(',').map(str::trim).collect();
    let [lat, lng] = parts.as_slice() else {
        return Err(Error::InvalidInput(INVALID_POINT.to_string()));
    };

    let lat: f64 = lat
        .parse()
        .map_err(|_| Error::InvalidInput(INVALID_POINT.to_string()))?;
    let lng: f64 = lng
        .parse()
        .map_err(|_| Error::InvalidInput(INVALID_POINT.to_string()))?;
    Ok(Coordinates::new(lat, lng))
}

fn wrap_longitude(lng: f64) -> f64 {
    if !lng.is_finite() || (-180.0..=180.0).contains(&lng) {
        lng
    } else {
        (lng + 180.0).rem_euclid(360.0) - 180.0
    }
}

/// Small magnitudes get fixed precision so they never render in exponent form;
/// whole numbers keep their trailing ".0"
fn format_coordinate(value: f64) -> String {
    if value.abs() >= 1.0 {
        format!("{:?}", value)
    } else {
        format!("{:.7}", value)
    }
}

impl From<Coordinates> for PointQuery {
    fn from(c: Coordinates) -> Self {
        Self::Point(c)
    }
}

impl From<(f64, f64)> for PointQuery {
    fn from(pair: (f64, f64)) -> Self {
        Self::Point(pair.into())
    }
}

impl From<[f64; 2]> for PointQuery {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self::Point(Coordinates::new(lat, lng))
    }
}

impl From<Vec<f64>> for PointQuery {
    fn from(values: Vec<f64>) -> Self {
        Self::Sequence(values)
    }
}

impl From<&[f64]> for PointQuery {
    fn from(values: &[f64]) -> Self {
        Self::Sequence(values.to_vec())
    }
}

impl From<&str> for PointQuery {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for PointQuery {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_query() {
        let query = PointQuery::from("40.75376406311989, -73.98489005863667");
        let (lat, lng) = query.to_param_strings().unwrap();
        assert_eq!(lat, "40.75376406311989");
        assert_eq!(lng, "-73.98489005863667");
    }

    #[test]
    fn test_point_and_pair_queries_agree() {
        let a = PointQuery::from(Coordinates::new(52.5, 13.41));
        let b = PointQuery::from((52.5, 13.41));
        let c = PointQuery::from([52.5, 13.41]);
        let d = PointQuery::from(vec![52.5, 13.41]);

        let expected = ("52.5".to_string(), "13.41".to_string());
        assert_eq!(a.to_param_strings().unwrap(), expected);
        assert_eq!(b.to_param_strings().unwrap(), expected);
        assert_eq!(c.to_param_strings().unwrap(), expected);
        assert_eq!(d.to_param_strings().unwrap(), expected);
    }

    #[test]
    fn test_small_values_use_fixed_precision() {
        let (lat, lng) = PointQuery::from((0.00001, -0.5)).to_param_strings().unwrap();
        assert_eq!(lat, "0.0000100");
        assert_eq!(lng, "-0.5000000");
    }

    #[test]
    fn test_wrong_component_count() {
        for text in ["40.7", "1, 2, 3", ""] {
            let err = PointQuery::from(text).to_coordinates().unwrap_err();
            assert!(matches!(err, Error::InvalidInput(_)), "{text:?} accepted");
        }
        let err = PointQuery::from(vec![1.0, 2.0, 3.0]).to_coordinates().unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_non_numeric_component() {
        let err = PointQuery::from("north, 13.4").to_coordinates().unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_out_of_range_latitude() {
        let err = PointQuery::from("95.0, 13.4").to_coordinates().unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_longitude_wraps() {
        let (_, lng) = PointQuery::from("10, 190").to_param_strings().unwrap();
        assert_eq!(lng, "-170.0");

        let coords = PointQuery::from((10.0, -540.0)).to_coordinates().unwrap();
        assert_eq!(coords.lng, -180.0);

        let coords = PointQuery::from((10.0, 180.0)).to_coordinates().unwrap();
        assert_eq!(coords.lng, 180.0);
    }

    #[test]
    fn test_non_finite_longitude_rejected() {
        let err = PointQuery::from((10.0, f64::INFINITY)).to_coordinates().unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_whole_numbers_keep_decimal_point() {
        let (lat, lng) = PointQuery::from((52.0, -13.0)).to_param_strings().unwrap();
        assert_eq!(lat, "52.0");
        assert_eq!(lng, "-13.0");
    }
}
