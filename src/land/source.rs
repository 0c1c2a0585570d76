//! Locating and loading the land polygon layer.
//!
//! The layer is picked by an ordered list of [`LayerCandidate`]s; the first
//! one that resolves to an existing file wins.

use std::fs;
use std::path::{Path, PathBuf};

use geo::{Coord, LineString, Polygon};
use shapefile::dbase::{FieldValue, Record};
use shapefile::{PolygonRing, Reader, Shape};
use tracing::{debug, info, warn};

use super::{LandFeature, LandLayer, FEATURE_CLASS_FIELD};
use crate::error::{Result, ShoreError};
use crate::projection::Crs;

/// Default layer file names, most preferred first
pub const DEFAULT_LAYER_FILES: &[&str] = &[
    "ne_10m_land.shp",
    "ne_10m_coastline.shp",
    "ne_10m_ocean.shp",
    "ne_10m_geography_regions_polys.shp",
];

/// One strategy for finding the land layer inside a dataset directory
pub trait LayerCandidate: Send + Sync {
    /// Path of the layer if this candidate finds one
    fn resolve(&self, dir: &Path) -> Option<PathBuf>;

    /// Short label for logs and error messages
    fn describe(&self) -> String;
}

/// A fixed file name (or absolute path)
#[derive(Debug, Clone)]
pub struct FileCandidate(pub PathBuf);

impl LayerCandidate for FileCandidate {
    fn resolve(&self, dir: &Path) -> Option<PathBuf> {
        let path = dir.join(&self.0);
        path.is_file().then_some(path)
    }

    fn describe(&self) -> String {
        self.0.display().to_string()
    }
}

/// Any `*_land.shp` (or `land.shp`) in the directory, alphabetically first
#[derive(Debug, Clone, Default)]
pub struct LandNamedCandidate;

impl LayerCandidate for LandNamedCandidate {
    fn resolve(&self, dir: &Path) -> Option<PathBuf> {
        let mut matches: Vec<PathBuf> = fs::read_dir(dir)
            .ok()?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| is_land_layer_name(path))
            .collect();
        matches.sort();
        matches.into_iter().next()
    }

    fn describe(&self) -> String {
        "*_land.shp".to_string()
    }
}

fn is_land_layer_name(path: &Path) -> bool {
    let is_shp = path
        .extension()
        .map_or(false, |e| e.eq_ignore_ascii_case("shp"));
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase());

    is_shp && stem.map_or(false, |s| s == "land" || s.ends_with("_land"))
}

/// Ordered candidate list; first successful match wins
pub struct LayerResolver {
    candidates: Vec<Box<dyn LayerCandidate>>,
}

impl Default for LayerResolver {
    /// Literal land layer first, then any land-named layer, then the
    /// remaining Natural Earth physical layers.
    fn default() -> Self {
        let mut candidates: Vec<Box<dyn LayerCandidate>> =
            vec![Box::new(FileCandidate(DEFAULT_LAYER_FILES[0].into()))];
        candidates.push(Box::new(LandNamedCandidate));
        for name in &DEFAULT_LAYER_FILES[1..] {
            candidates.push(Box::new(FileCandidate((*name).into())));
        }
        Self { candidates }
    }
}

impl LayerResolver {
    pub fn new(candidates: Vec<Box<dyn LayerCandidate>>) -> Self {
        Self { candidates }
    }

    /// Resolver trying the given file names in order
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PathBuf>,
    {
        Self {
            candidates: names
                .into_iter()
                .map(|n| Box::new(FileCandidate(n.into())) as Box<dyn LayerCandidate>)
                .collect(),
        }
    }

    pub fn resolve(&self, dir: &Path) -> Result<PathBuf> {
        for candidate in &self.candidates {
            if let Some(path) = candidate.resolve(dir) {
                info!("Loading land layer from: {}", path.display());
                return Ok(path);
            }
            debug!("No match for candidate {}", candidate.describe());
        }

        Err(ShoreError::LandDatasetNotFound {
            dir: dir.to_path_buf(),
            tried: self.candidates.iter().map(|c| c.describe()).collect(),
        })
    }
}

/// Read the frame declared by the `.prj` next to `shp_path`.
///
/// `Ok(None)` when there is no `.prj` file.
pub fn read_prj(shp_path: &Path) -> Result<Option<Crs>> {
    let prj = shp_path.with_extension("prj");
    if !prj.is_file() {
        return Ok(None);
    }
    let wkt = fs::read_to_string(&prj)?;
    Crs::from_wkt(&wkt).map(Some)
}

/// Load a polygon shapefile into a [`LandLayer`].
///
/// `assume_crs` is used only when the layer has no `.prj`.
pub fn load_shapefile(path: &Path, assume_crs: Option<Crs>) -> Result<LandLayer> {
    let crs = match read_prj(path)? {
        Some(crs) => Some(crs),
        None => {
            if let Some(crs) = assume_crs {
                warn!(
                    "{} has no .prj; assuming {}",
                    path.display(),
                    crs
                );
            }
            assume_crs
        }
    };

    let mut reader = Reader::from_path(path)?;
    let mut features = Vec::new();
    let mut has_class_field = false;
    let mut skipped = 0usize;

    for result in reader.iter_shapes_and_records() {
        let (shape, record) = result?;

        let class = feature_class(&record);
        has_class_field |= record.get(FEATURE_CLASS_FIELD).is_some();

        match shape_polygons(shape) {
            Some(polygons) => features.push(LandFeature { class, polygons }),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!("Skipped {} non-polygon shapes", skipped);
    }

    let layer = LandLayer {
        path: path.to_path_buf(),
        crs,
        features,
        has_class_field,
    };

    info!(
        "Land layer loaded with {} features ({} polygons)",
        layer.features.len(),
        layer.polygon_count()
    );

    if layer.polygon_count() == 0 {
        return Err(ShoreError::NoPolygons(layer.path));
    }

    Ok(layer)
}

fn feature_class(record: &Record) -> Option<String> {
    match record.get(FEATURE_CLASS_FIELD)? {
        FieldValue::Character(value) => value.clone(),
        FieldValue::Memo(value) => Some(value.clone()),
        _ => None,
    }
}

/// Ring tagged with its role in the shapefile polygon
enum Ring {
    Outer(Vec<Coord<f64>>),
    Inner(Vec<Coord<f64>>),
}

fn to_ring<P>(ring: &PolygonRing<P>, to_coord: impl Fn(&P) -> Coord<f64>) -> Ring {
    match ring {
        PolygonRing::Outer(points) => Ring::Outer(points.iter().map(&to_coord).collect()),
        PolygonRing::Inner(points) => Ring::Inner(points.iter().map(&to_coord).collect()),
    }
}

/// Polygons of a shape, or `None` for non-polygon shapes
fn shape_polygons(shape: Shape) -> Option<Vec<Polygon<f64>>> {
    let rings: Vec<Ring> = match shape {
        Shape::Polygon(p) => p
            .rings()
            .iter()
            .map(|r| to_ring(r, |pt| Coord { x: pt.x, y: pt.y }))
            .collect(),
        Shape::PolygonM(p) => p
            .rings()
            .iter()
            .map(|r| to_ring(r, |pt| Coord { x: pt.x, y: pt.y }))
            .collect(),
        Shape::PolygonZ(p) => p
            .rings()
            .iter()
            .map(|r| to_ring(r, |pt| Coord { x: pt.x, y: pt.y }))
            .collect(),
        _ => return None,
    };

    Some(assemble_polygons(rings))
}

/// Outer rings start a new polygon; inner rings become holes of the
/// preceding outer ring.
fn assemble_polygons(rings: Vec<Ring>) -> Vec<Polygon<f64>> {
    let mut polygons = Vec::new();
    let mut current: Option<(LineString<f64>, Vec<LineString<f64>>)> = None;

    for ring in rings {
        match ring {
            Ring::Outer(coords) => {
                if let Some((exterior, holes)) = current.take() {
                    polygons.push(Polygon::new(exterior, holes));
                }
                current = Some((LineString::new(coords), Vec::new()));
            }
            Ring::Inner(coords) => match current.as_mut() {
                Some((_, holes)) => holes.push(LineString::new(coords)),
                None => warn!("Inner ring without a preceding outer ring; skipped"),
            },
        }
    }

    if let Some((exterior, holes)) = current {
        polygons.push(Polygon::new(exterior, holes));
    }

    polygons
}
