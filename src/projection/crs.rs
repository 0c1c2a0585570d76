//! Coordinate reference frames understood by the pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShoreError};

/// Reference frame tag carried by point and polygon geometries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Crs {
    /// Geographic WGS84 longitude/latitude in degrees (EPSG:4326)
    Wgs84,
    /// Spherical Web Mercator in meters (EPSG:3857)
    WebMercator,
}

impl Crs {
    pub fn epsg(&self) -> u32 {
        match self {
            Crs::Wgs84 => 4326,
            Crs::WebMercator => 3857,
        }
    }

    /// Whether planar distances in this frame are in meters
    pub fn is_metric(&self) -> bool {
        matches!(self, Crs::WebMercator)
    }

    /// Parse an authority code such as `EPSG:4326` (the prefix is optional).
    pub fn from_code(code: &str) -> Result<Self> {
        let trimmed = code.trim();
        let number = trimmed
            .strip_prefix("EPSG:")
            .or_else(|| trimmed.strip_prefix("epsg:"))
            .unwrap_or(trimmed);

        match number {
            "4326" => Ok(Crs::Wgs84),
            "3857" | "900913" => Ok(Crs::WebMercator),
            _ => Err(ShoreError::UnsupportedCrs(code.to_string())),
        }
    }

    /// Identify the frame declared by the WKT contents of a `.prj` sidecar.
    pub fn from_wkt(wkt: &str) -> Result<Self> {
        let wkt = wkt.trim();
        let upper = wkt.to_ascii_uppercase();

        if upper.starts_with("GEOGCS") || upper.starts_with("GEOGCRS") {
            return Ok(Crs::Wgs84);
        }

        if upper.starts_with("PROJCS") || upper.starts_with("PROJCRS") {
            let mercator_markers = [
                "PSEUDO-MERCATOR",
                "PSEUDO_MERCATOR",
                "WEB_MERCATOR",
                "MERCATOR_AUXILIARY_SPHERE",
                "\"3857\"",
            ];
            if mercator_markers.iter().any(|m| upper.contains(m)) {
                return Ok(Crs::WebMercator);
            }
        }

        let head: String = wkt.chars().take(60).collect();
        Err(ShoreError::UnsupportedCrs(head))
    }
}

impl std::fmt::Display for Crs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EPSG:{}", self.epsg())
    }
}
