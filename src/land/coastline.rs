//! Coastline boundary index for nearest-distance queries.
//!
//! Every outer and inner ring of every land polygon becomes part of the
//! coastline. Rings are cut into short chunks so the R-tree can prune
//! far-away stretches of long coastlines.

use geo::{BoundingRect, Coord, Distance, Euclidean, LineString, Polygon};
use rstar::{RTree, RTreeObject, AABB};
use tracing::info;

use super::{check_query, CoastDistance, LandMask};
use crate::error::GeometryError;
use crate::models::ProjectedPoint;
use crate::projection::Crs;

/// Maximum number of segments per indexed chunk
const CHUNK_SEGMENTS: usize = 64;

/// First search half-width in frame units (meters for metric frames)
const INITIAL_SEARCH_RADIUS: f64 = 1_000.0;

/// Beyond this half-width the whole tree is scanned
const MAX_SEARCH_RADIUS: f64 = 1.0e9;

/// A contiguous piece of one boundary ring
pub struct CoastChunk {
    pub line: LineString<f64>,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for CoastChunk {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

impl CoastChunk {
    fn new(coords: &[Coord<f64>]) -> Option<Self> {
        let line = LineString::new(coords.to_vec());
        let rect = line.bounding_rect()?;
        Some(Self {
            envelope: AABB::from_corners([rect.min().x, rect.min().y], [rect.max().x, rect.max().y]),
            line,
        })
    }
}

/// Boundary geometry of a land polygon set
pub struct Coastline {
    tree: RTree<CoastChunk>,
    crs: Crs,
    ring_count: usize,
}

impl Coastline {
    /// Extract the boundary of every polygon in `polygons`
    pub fn from_polygons<'a, I>(polygons: I, crs: Crs) -> Self
    where
        I: IntoIterator<Item = &'a Polygon<f64>>,
    {
        let mut chunks = Vec::new();
        let mut ring_count = 0;

        for polygon in polygons {
            let rings = std::iter::once(polygon.exterior()).chain(polygon.interiors());
            for ring in rings {
                if ring.0.len() < 2 {
                    continue;
                }
                ring_count += 1;
                chunks.extend(chunk_ring(&ring.0));
            }
        }

        info!(
            "Coastline built from {} rings ({} indexed chunks)",
            ring_count,
            chunks.len()
        );

        Self {
            tree: RTree::bulk_load(chunks),
            crs,
            ring_count,
        }
    }

    /// Coastline of an existing land mask, in the mask's frame
    pub fn from_mask(mask: &LandMask) -> Self {
        Self::from_polygons(mask.polygons(), mask.crs())
    }

    pub fn crs(&self) -> Crs {
        self.crs
    }

    /// Number of boundary rings (parts) making up the coastline
    pub fn ring_count(&self) -> usize {
        self.ring_count
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Minimum planar distance from `point` to any coastline part.
    pub fn distance_meters(&self, point: &ProjectedPoint) -> Result<f64, GeometryError> {
        check_query(point, self.crs)?;
        if self.is_empty() {
            return Err(GeometryError::EmptyCoastline);
        }

        let mut radius = INITIAL_SEARCH_RADIUS;
        while radius <= MAX_SEARCH_RADIUS {
            let best = self.nearest_within(point, radius);
            if best.is_finite() {
                if best <= radius {
                    return Ok(best);
                }
                // A closer chunk may sit outside the box searched so far
                return Ok(self.nearest_within(point, best));
            }
            radius *= 4.0;
        }

        Ok(self
            .tree
            .iter()
            .map(|chunk| Euclidean.distance(&point.point, &chunk.line))
            .fold(f64::INFINITY, f64::min))
    }

    /// Smallest distance among chunks whose envelope meets the square of
    /// half-width `radius` around the point; infinity if there are none.
    fn nearest_within(&self, point: &ProjectedPoint, radius: f64) -> f64 {
        let (x, y) = (point.x(), point.y());
        let search = AABB::from_corners([x - radius, y - radius], [x + radius, y + radius]);

        self.tree
            .locate_in_envelope_intersecting(&search)
            .map(|chunk| Euclidean.distance(&point.point, &chunk.line))
            .fold(f64::INFINITY, f64::min)
    }
}

impl CoastDistance for Coastline {
    fn distance_meters(&self, point: &ProjectedPoint) -> Result<f64, GeometryError> {
        Coastline::distance_meters(self, point)
    }
}

/// Split a ring into overlapping chunks of at most `CHUNK_SEGMENTS` segments
fn chunk_ring(coords: &[Coord<f64>]) -> Vec<CoastChunk> {
    let mut chunks = Vec::new();
    let last = coords.len() - 1;
    let mut start = 0;

    while start < last {
        let end = (start + CHUNK_SEGMENTS).min(last);
        chunks.extend(CoastChunk::new(&coords[start..=end]));
        start = end;
    }

    chunks
}
