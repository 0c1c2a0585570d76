//! In-memory land layer as loaded from the dataset, before reprojection.

use std::path::PathBuf;

use geo::Polygon;
use tracing::info;

use crate::error::{Result, ShoreError};
use crate::projection::{Crs, Reprojector};

/// Attribute naming the feature class in Natural Earth style datasets
pub const FEATURE_CLASS_FIELD: &str = "featurecla";

/// One record of the land layer
#[derive(Debug, Clone)]
pub struct LandFeature {
    /// Value of the feature-class attribute, if the dataset has one
    pub class: Option<String>,
    pub polygons: Vec<Polygon<f64>>,
}

/// Polygon layer with its declared reference frame
#[derive(Debug, Clone)]
pub struct LandLayer {
    pub path: PathBuf,
    pub crs: Option<Crs>,
    pub features: Vec<LandFeature>,
    /// Whether the records carry a feature-class attribute at all
    pub has_class_field: bool,
}

impl LandLayer {
    pub fn polygon_count(&self) -> usize {
        self.features.iter().map(|f| f.polygons.len()).sum()
    }

    /// Keep only land-class features when the layer is classified.
    ///
    /// Falls back to the whole layer when no feature matches `land_classes`.
    pub fn select_land(self, land_classes: &[String]) -> Self {
        if !self.has_class_field {
            return self;
        }

        let is_land = |f: &LandFeature| {
            f.class
                .as_deref()
                .map(|c| land_classes.iter().any(|l| l.eq_ignore_ascii_case(c.trim())))
                .unwrap_or(false)
        };

        let matching = self.features.iter().filter(|f| is_land(*f)).count();
        if matching == 0 {
            info!("No features matched the land classes; using the layer as-is");
            return self;
        }

        let features: Vec<LandFeature> = self.features.into_iter().filter(is_land).collect();
        info!("Filtered to {} land features", features.len());

        Self { features, ..self }
    }

    /// Reproject every polygon into `target`, failing if the layer has no frame.
    pub fn into_projected(self, target: Crs) -> Result<Vec<Polygon<f64>>> {
        let source = self.crs.ok_or_else(|| ShoreError::MissingCrs(self.path.clone()))?;
        let reprojector = Reprojector::new(source, target)?;

        info!("Projecting land layer from {} to {}...", source, target);

        let polygons: Vec<Polygon<f64>> = self.features.into_iter().flat_map(|f| f.polygons).collect();
        if polygons.is_empty() {
            return Err(ShoreError::NoPolygons(self.path));
        }

        Ok(reprojector.project_polygons(&polygons))
    }
}
