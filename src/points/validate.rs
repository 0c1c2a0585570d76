//! Coordinate presence and range checks.

use tracing::warn;

use crate::models::RawCoordinate;

pub const LAT_RANGE: std::ops::RangeInclusive<f64> = -90.0..=90.0;
pub const LON_RANGE: std::ops::RangeInclusive<f64> = -180.0..=180.0;

/// Why a row was rejected
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Invalid {
    /// Latitude or longitude absent
    Missing,
    /// Both present but outside the valid range
    OutOfRange { latitude: f64, longitude: f64 },
}

/// Check one row. `row` is zero-based; log messages use 1-based numbering.
///
/// Returns `(latitude, longitude)` on success.
pub fn validate(row: usize, raw: &RawCoordinate) -> Result<(f64, f64), Invalid> {
    let (lat, lon) = match (raw.lat(), raw.lon()) {
        (Some(lat), Some(lon)) => (lat, lon),
        _ => {
            warn!("Row {}: Missing coordinate value", row + 1);
            return Err(Invalid::Missing);
        }
    };

    if !LAT_RANGE.contains(&lat) || !LON_RANGE.contains(&lon) {
        warn!(
            "Row {}: Invalid coordinate range (lat: {}, lon: {})",
            row + 1,
            lat,
            lon
        );
        return Err(Invalid::OutOfRange {
            latitude: lat,
            longitude: lon,
        });
    }

    Ok((lat, lon))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_including_edges() {
        assert_eq!(validate(0, &RawCoordinate::new(0.0, 0.0)), Ok((0.0, 0.0)));
        assert_eq!(
            validate(0, &RawCoordinate::new(-90.0, 180.0)),
            Ok((-90.0, 180.0))
        );
        assert_eq!(
            validate(0, &RawCoordinate::new(90.0, -180.0)),
            Ok((90.0, -180.0))
        );
    }

    #[test]
    fn test_latitude_out_of_range() {
        assert_eq!(
            validate(0, &RawCoordinate::new(91.0, 0.0)),
            Err(Invalid::OutOfRange {
                latitude: 91.0,
                longitude: 0.0
            })
        );
    }

    #[test]
    fn test_longitude_out_of_range() {
        assert!(matches!(
            validate(3, &RawCoordinate::new(10.0, -180.5)),
            Err(Invalid::OutOfRange { .. })
        ));
        assert!(matches!(
            validate(3, &RawCoordinate::new(10.0, f64::INFINITY)),
            Err(Invalid::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_missing_values() {
        assert_eq!(validate(0, &RawCoordinate::missing()), Err(Invalid::Missing));
        let half = RawCoordinate {
            latitude: Some(10.0),
            longitude: None,
        };
        assert_eq!(validate(0, &half), Err(Invalid::Missing));
        let nan = RawCoordinate {
            latitude: Some(f64::NAN),
            longitude: Some(1.0),
        };
        assert_eq!(validate(0, &nan), Err(Invalid::Missing));
    }
}
