//! Per-run category counts.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::info;

use crate::models::ShoreStatus;
use crate::points::PointSet;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub total: usize,
    /// Count per category, every category present
    pub counts: BTreeMap<ShoreStatus, usize>,
    /// Rows with a missing latitude or longitude
    pub missing: usize,
    /// Rows with coordinates outside the valid range
    pub out_of_range: usize,
    pub onshore_buffer_km: f64,
}

impl Summary {
    pub fn new(statuses: &[ShoreStatus], points: &PointSet, onshore_buffer_km: f64) -> Self {
        let mut counts: BTreeMap<ShoreStatus, usize> =
            ShoreStatus::all().iter().map(|s| (*s, 0)).collect();
        for status in statuses {
            *counts.entry(*status).or_default() += 1;
        }

        Self {
            total: statuses.len(),
            counts,
            missing: points.missing,
            out_of_range: points.out_of_range,
            onshore_buffer_km,
        }
    }

    pub fn count(&self, status: ShoreStatus) -> usize {
        self.counts.get(&status).copied().unwrap_or(0)
    }

    pub fn log(&self) {
        info!("Classification Summary:");
        for (status, count) in &self.counts {
            info!("  {}: {}", status, count);
        }
        if self.missing + self.out_of_range > 0 {
            info!(
                "  ({} rows with missing coordinates, {} out of range)",
                self.missing, self.out_of_range
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawCoordinate;
    use crate::points::build_points;

    #[test]
    fn test_counts_cover_every_category() {
        let rows = vec![RawCoordinate::new(0.0, 0.0), RawCoordinate::missing()];
        let points = build_points(&rows);
        let statuses = vec![ShoreStatus::Offshore, ShoreStatus::Unknown];

        let summary = Summary::new(&statuses, &points, 3.0);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.counts.len(), 5);
        assert_eq!(summary.count(ShoreStatus::Offshore), 1);
        assert_eq!(summary.count(ShoreStatus::Inland), 0);
        assert_eq!(summary.missing, 1);
    }

    #[test]
    fn test_serializes_category_names() {
        let points = build_points(&[]);
        let summary = Summary::new(&[ShoreStatus::Onshore], &points, 3.0);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["counts"]["Onshore"], 1);
        assert_eq!(json["counts"]["Error"], 0);
    }
}
