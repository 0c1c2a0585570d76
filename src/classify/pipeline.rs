//! Batch driver: validation, point construction and classification.

use indicatif::ProgressBar;
use rayon::prelude::*;
use tracing::{info, warn};

use super::{Classifier, ClassifierConfig, Summary};
use crate::error::{Result, ShoreError};
use crate::land::{CoastDistance, LandQuery};
use crate::models::{RawCoordinate, ShoreStatus};
use crate::points::build_points;

/// Outcome of a whole batch, index-aligned with the input rows
#[derive(Debug, Clone)]
pub struct Classification {
    pub statuses: Vec<ShoreStatus>,
    pub summary: Summary,
}

pub struct Pipeline<'a, L: LandQuery, C: CoastDistance> {
    classifier: Classifier<'a, L, C>,
    progress: ProgressBar,
}

impl<'a, L: LandQuery, C: CoastDistance> Pipeline<'a, L, C> {
    pub fn new(land: &'a L, coast: &'a C, config: ClassifierConfig) -> Result<Self> {
        Ok(Self {
            classifier: Classifier::new(land, coast, config)?,
            progress: ProgressBar::hidden(),
        })
    }

    /// Report per-point progress on `progress`; its length is set by `run`
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Classify every row. Fails only if no row has valid coordinates.
    pub fn run(&self, rows: &[RawCoordinate]) -> Result<Classification> {
        let points = build_points(rows);

        let invalid = points.invalid_count();
        if invalid > 0 {
            warn!("Found {} rows with invalid coordinates", invalid);
        }

        let valid = points.valid_count();
        if valid == 0 {
            return Err(ShoreError::NoValidCoordinates);
        }

        info!("Processing {} valid coordinates...", valid);
        self.progress.set_length(points.len() as u64);

        let classify = |point: &Option<crate::models::GeoPoint>| {
            let status = self.classifier.status(point.as_ref());
            self.progress.inc(1);
            status
        };

        let statuses: Vec<ShoreStatus> = if self.classifier.config().parallel {
            points.points.par_iter().map(classify).collect()
        } else {
            points.points.iter().map(classify).collect()
        };

        self.progress.finish_and_clear();

        let summary = Summary::new(
            &statuses,
            &points,
            self.classifier.config().onshore_buffer_km,
        );

        Ok(Classification { statuses, summary })
    }
}
