//! R-tree indexed land polygons for containment queries.

use geo::{BoundingRect, Intersects, Polygon};
use rstar::{RTree, RTreeObject, AABB};
use tracing::info;

use super::{check_query, LandQuery};
use crate::error::GeometryError;
use crate::models::ProjectedPoint;
use crate::projection::Crs;

/// Wrapper for R-tree indexing of land polygons
pub struct IndexedPolygon {
    pub polygon: Polygon<f64>,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for IndexedPolygon {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

impl IndexedPolygon {
    pub fn new(polygon: Polygon<f64>) -> Option<Self> {
        let rect = polygon.bounding_rect()?;
        Some(Self {
            envelope: AABB::from_corners([rect.min().x, rect.min().y], [rect.max().x, rect.max().y]),
            polygon,
        })
    }
}

/// Land polygons in a single frame, read-only once built.
pub struct LandMask {
    tree: RTree<IndexedPolygon>,
    crs: Crs,
}

impl LandMask {
    /// Build the mask from polygons already expressed in `crs`
    pub fn build(polygons: Vec<Polygon<f64>>, crs: Crs) -> Self {
        info!("Building land mask for {} polygons...", polygons.len());

        let indexed: Vec<IndexedPolygon> = polygons
            .into_iter()
            .filter_map(IndexedPolygon::new)
            .collect();

        let tree = RTree::bulk_load(indexed);

        info!("Land mask built with {} entries", tree.size());

        Self { tree, crs }
    }

    pub fn crs(&self) -> Crs {
        self.crs
    }

    /// True if the point is inside or on the boundary of any land polygon
    pub fn contains(&self, point: &ProjectedPoint) -> Result<bool, GeometryError> {
        check_query(point, self.crs)?;
        let query_envelope = AABB::from_point([point.x(), point.y()]);

        // Envelope candidates first, then the exact test
        Ok(self
            .tree
            .locate_in_envelope_intersecting(&query_envelope)
            .any(|ip| ip.polygon.intersects(&point.point)))
    }

    /// Iterate over all indexed polygons
    pub fn polygons(&self) -> impl Iterator<Item = &Polygon<f64>> {
        self.tree.iter().map(|ip| &ip.polygon)
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

impl LandQuery for LandMask {
    fn contains(&self, point: &ProjectedPoint) -> Result<bool, GeometryError> {
        LandMask::contains(self, point)
    }
}
