//! Point construction from validated rows.

use geo::Point;
use tracing::error;

use super::validate::{validate, Invalid, LAT_RANGE, LON_RANGE};
use crate::error::GeometryError;
use crate::models::{GeoPoint, RawCoordinate};

/// Per-row geometries for a batch, index-aligned with the input rows.
#[derive(Debug, Default)]
pub struct PointSet {
    /// `None` where the row produced no geometry
    pub points: Vec<Option<GeoPoint>>,
    pub missing: usize,
    pub out_of_range: usize,
    /// Rows that validated but could not be turned into a point
    pub failed: usize,
}

impl PointSet {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn valid_count(&self) -> usize {
        self.points.iter().filter(|p| p.is_some()).count()
    }

    /// Rows without geometry
    pub fn invalid_count(&self) -> usize {
        self.missing + self.out_of_range + self.failed
    }

    pub fn valid(&self) -> impl Iterator<Item = &GeoPoint> {
        self.points.iter().flatten()
    }
}

/// Construct a geographic point with (longitude, latitude) ordering.
pub fn make_point(row: usize, lat: f64, lon: f64) -> Result<GeoPoint, GeometryError> {
    if !lat.is_finite() || !lon.is_finite() {
        return Err(GeometryError::NonFinite { x: lon, y: lat });
    }
    if !LAT_RANGE.contains(&lat) || !LON_RANGE.contains(&lon) {
        return Err(GeometryError::Other(format!(
            "coordinate out of range (lat: {}, lon: {})",
            lat, lon
        )));
    }
    Ok(GeoPoint::wgs84(row, Point::new(lon, lat)))
}

/// Validate every row and build a point for each valid one.
pub fn build_points(rows: &[RawCoordinate]) -> PointSet {
    let mut set = PointSet {
        points: Vec::with_capacity(rows.len()),
        ..Default::default()
    };

    for (row, raw) in rows.iter().enumerate() {
        let point = match validate(row, raw) {
            Ok((lat, lon)) => match make_point(row, lat, lon) {
                Ok(p) => Some(p),
                Err(e) => {
                    error!("Row {}: Error creating point geometry: {}", row + 1, e);
                    set.failed += 1;
                    None
                }
            },
            Err(Invalid::Missing) => {
                set.missing += 1;
                None
            }
            Err(Invalid::OutOfRange { .. }) => {
                set.out_of_range += 1;
                None
            }
        };
        set.points.push(point);
    }

    set
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_order_is_lon_lat() {
        let p = make_point(2, 51.5, -0.12).unwrap();
        assert_eq!(p.point.x(), -0.12);
        assert_eq!(p.point.y(), 51.5);
        assert_eq!(p.row, 2);
    }

    #[test]
    fn test_make_point_rejects_non_finite() {
        assert!(matches!(
            make_point(0, f64::NAN, 0.0),
            Err(GeometryError::NonFinite { .. })
        ));
    }

    #[test]
    fn test_build_points_is_index_aligned() {
        let rows = vec![
            RawCoordinate::new(10.0, 20.0),
            RawCoordinate::new(91.0, 0.0),
            RawCoordinate::missing(),
            RawCoordinate::new(-33.9, 151.2),
        ];
        let set = build_points(&rows);

        assert_eq!(set.len(), 4);
        assert!(set.points[0].is_some());
        assert!(set.points[1].is_none());
        assert!(set.points[2].is_none());
        assert_eq!(set.points[3].map(|p| p.row), Some(3));
        assert_eq!(set.valid_count(), 2);
        assert_eq!(set.missing, 1);
        assert_eq!(set.out_of_range, 1);
        assert_eq!(set.invalid_count(), 2);
    }
}
