//! Per-point decision procedure.

use serde::Deserialize;
use tracing::{debug, error};

use crate::error::{GeometryError, Result, ShoreError};
use crate::land::{CoastDistance, LandQuery};
use crate::models::{GeoPoint, ProjectedPoint, ShoreStatus};
use crate::projection::{Crs, Reprojector};

/// Frame the land structures and projected points share
pub const METRIC_CRS: Crs = Crs::WebMercator;

/// Immutable classification settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Land points within this distance of the coastline are Onshore
    pub onshore_buffer_km: f64,
    /// Classify points on the rayon thread pool
    pub parallel: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            onshore_buffer_km: 3.0,
            parallel: true,
        }
    }
}

impl ClassifierConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.onshore_buffer_km.is_finite() || self.onshore_buffer_km < 0.0 {
            return Err(ShoreError::InvalidConfig(format!(
                "onshore_buffer_km must be a non-negative number, got {}",
                self.onshore_buffer_km
            )));
        }
        Ok(())
    }
}

/// Classifies points against shared read-only land structures.
///
/// Holds no per-point state; the same point always gets the same status.
pub struct Classifier<'a, L: LandQuery, C: CoastDistance> {
    land: &'a L,
    coast: &'a C,
    config: ClassifierConfig,
    reprojector: Reprojector,
}

impl<'a, L: LandQuery, C: CoastDistance> Classifier<'a, L, C> {
    pub fn new(land: &'a L, coast: &'a C, config: ClassifierConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            land,
            coast,
            config,
            reprojector: Reprojector::new(Crs::Wgs84, METRIC_CRS)?,
        })
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Containment, then distance for land points
    pub fn classify(&self, point: &ProjectedPoint) -> std::result::Result<ShoreStatus, GeometryError> {
        if !self.land.contains(point)? {
            return Ok(ShoreStatus::Offshore);
        }

        let distance_km = self.coast.distance_meters(point)? / 1000.0;
        debug!("Row {}: {:.3} km from coastline", point.row + 1, distance_km);

        if distance_km <= self.config.onshore_buffer_km {
            Ok(ShoreStatus::Onshore)
        } else {
            Ok(ShoreStatus::Inland)
        }
    }

    /// Full per-row outcome: absent geometry is Unknown, otherwise the point
    /// is projected and classified.
    pub fn classify_row(
        &self,
        point: Option<&GeoPoint>,
    ) -> std::result::Result<ShoreStatus, GeometryError> {
        match point {
            None => Ok(ShoreStatus::Unknown),
            Some(geo_point) => {
                let projected = self.reprojector.project_point(geo_point)?;
                self.classify(&projected)
            }
        }
    }

    /// Like [`Self::classify_row`], with geometric failures logged and
    /// folded into `ShoreStatus::Error`.
    pub fn status(&self, point: Option<&GeoPoint>) -> ShoreStatus {
        match self.classify_row(point) {
            Ok(status) => status,
            Err(e) => {
                if let Some(p) = point {
                    error!("Row {}: Error classifying point {}: {}", p.row + 1, p, e);
                }
                ShoreStatus::Error
            }
        }
    }
}
