//! Land mask and coastline structures shared read-only by the classifier.
//!
//! Loads the land polygon layer, reprojects it into the metric frame and
//! builds two R-tree indexes: one over polygons for containment and one
//! over boundary rings for distance.

mod coastline;
mod layer;
mod mask;
pub mod source;

pub use coastline::Coastline;
pub use layer::{LandFeature, LandLayer, FEATURE_CLASS_FIELD};
pub use mask::LandMask;
pub use source::{LayerCandidate, LayerResolver};

use tracing::info;

use crate::error::{GeometryError, Result};
use crate::models::ProjectedPoint;
use crate::projection::Crs;

/// Containment query over the land polygon set
pub trait LandQuery: Send + Sync {
    fn contains(&self, point: &ProjectedPoint) -> std::result::Result<bool, GeometryError>;
}

/// Nearest-coastline distance query
pub trait CoastDistance: Send + Sync {
    fn distance_meters(&self, point: &ProjectedPoint) -> std::result::Result<f64, GeometryError>;
}

/// Reject query points that cannot be evaluated against a structure in `crs`
fn check_query(point: &ProjectedPoint, crs: Crs) -> std::result::Result<(), GeometryError> {
    if !point.x().is_finite() || !point.y().is_finite() {
        return Err(GeometryError::NonFinite {
            x: point.x(),
            y: point.y(),
        });
    }
    if point.crs != crs {
        return Err(GeometryError::FrameMismatch {
            found: point.crs.to_string(),
            expected: crs.to_string(),
        });
    }
    Ok(())
}

/// Reproject a loaded layer and build both query structures.
pub fn build_land(layer: LandLayer, target: Crs) -> Result<(LandMask, Coastline)> {
    let polygons = layer.into_projected(target)?;
    let mask = LandMask::build(polygons, target);
    let coastline = Coastline::from_mask(&mask);

    info!(
        "Land ready: {} polygons, {} coastline rings",
        mask.len(),
        coastline.ring_count()
    );

    Ok((mask, coastline))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use geo::{polygon, Point, Polygon};

    use crate::models::GeoPoint;

    /// Axis-aligned square with its lower-left corner at (x, y)
    pub fn square(x: f64, y: f64, size: f64) -> Polygon<f64> {
        polygon![
            (x: x, y: y),
            (x: x + size, y: y),
            (x: x + size, y: y + size),
            (x: x, y: y + size),
            (x: x, y: y),
        ]
    }

    /// A point already in Web Mercator meters
    pub fn metric_point(x: f64, y: f64) -> ProjectedPoint {
        ProjectedPoint {
            row: 0,
            point: Point::new(x, y),
            crs: Crs::WebMercator,
            origin: GeoPoint::wgs84(0, Point::new(0.0, 0.0)),
        }
    }

    #[test]
    fn test_build_land_from_geographic_layer() {
        let layer = LandLayer {
            path: "synthetic.shp".into(),
            crs: Some(Crs::Wgs84),
            features: vec![LandFeature {
                class: None,
                polygons: vec![square(0.0, 0.0, 1.0)],
            }],
            has_class_field: false,
        };

        let (mask, coast) = build_land(layer, Crs::WebMercator).unwrap();
        assert_eq!(mask.len(), 1);
        assert_eq!(coast.ring_count(), 1);

        // ~0.5 degrees at the equator
        let p = metric_point(55_659.0, 55_659.0);
        assert!(mask.contains(&p).unwrap());
        let d = coast.distance_meters(&p).unwrap();
        assert!((d - 55_659.0).abs() < 1.0);
    }

    #[test]
    fn test_frame_mismatch_is_a_row_error() {
        let mask = LandMask::build(vec![square(0.0, 0.0, 1.0)], Crs::Wgs84);
        assert!(matches!(
            mask.contains(&metric_point(0.5, 0.5)),
            Err(GeometryError::FrameMismatch { .. })
        ));
    }
}
