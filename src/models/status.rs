//! Shoreline classification categories.

use serde::{Deserialize, Serialize};

/// Shoreline-relative category assigned to every input row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub enum ShoreStatus {
    /// Point lies outside every land polygon
    Offshore,
    /// Point is on land within the onshore buffer of the coastline
    Onshore,
    /// Point is on land further than the onshore buffer from the coastline
    Inland,
    /// Row failed coordinate validation
    Unknown,
    /// Geometric evaluation failed for this row
    Error,
}

impl ShoreStatus {
    /// Get all categories in report order
    pub fn all() -> &'static [ShoreStatus] {
        &[
            ShoreStatus::Offshore,
            ShoreStatus::Onshore,
            ShoreStatus::Inland,
            ShoreStatus::Unknown,
            ShoreStatus::Error,
        ]
    }

    /// Name written to output tables
    pub fn as_str(&self) -> &'static str {
        match self {
            ShoreStatus::Offshore => "Offshore",
            ShoreStatus::Onshore => "Onshore",
            ShoreStatus::Inland => "Inland",
            ShoreStatus::Unknown => "Unknown",
            ShoreStatus::Error => "Error",
        }
    }

    /// Human readable meaning, used in the closing legend of the CLI
    pub fn describe(&self, buffer_km: f64) -> String {
        match self {
            ShoreStatus::Offshore => "Points over water".to_string(),
            ShoreStatus::Onshore => format!("Points on land within {}km of coast", buffer_km),
            ShoreStatus::Inland => {
                format!("Points on land more than {}km from coast", buffer_km)
            }
            ShoreStatus::Unknown => "Invalid coordinates".to_string(),
            ShoreStatus::Error => "Processing errors".to_string(),
        }
    }
}

impl std::fmt::Display for ShoreStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_match_output_format() {
        let names: Vec<&str> = ShoreStatus::all().iter().map(|s| s.as_str()).collect();
        assert_eq!(names, ["Offshore", "Onshore", "Inland", "Unknown", "Error"]);
        assert_eq!(ShoreStatus::Inland.to_string(), "Inland");
    }

    #[test]
    fn test_describe_mentions_buffer() {
        assert!(ShoreStatus::Onshore.describe(3.0).contains("3km"));
        assert!(ShoreStatus::Inland.describe(2.5).contains("2.5km"));
    }
}
