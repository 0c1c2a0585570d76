//! Error types shared across the library.

use std::path::PathBuf;

use thiserror::Error;

/// Setup failures. Any of these aborts the whole run before output is written.
#[derive(Debug, Error)]
pub enum ShoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error("Sheet {sheet:?} not found; available: {}", available.join(", "))]
    SheetNotFound { sheet: String, available: Vec<String> },

    #[error("Shapefile error: {0}")]
    Shapefile(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("No land polygon layer found in {}; tried: {}", dir.display(), tried.join(", "))]
    LandDatasetNotFound { dir: PathBuf, tried: Vec<String> },

    #[error("Land layer {} declares no coordinate reference system", .0.display())]
    MissingCrs(PathBuf),

    #[error("Unsupported coordinate reference system: {0}")]
    UnsupportedCrs(String),

    #[error("No reprojection from {from} to {to}")]
    UnsupportedTransform { from: String, to: String },

    #[error("Land layer {} contains no polygons", .0.display())]
    NoPolygons(PathBuf),

    #[error("Input must have at least {required} columns, found {found}")]
    MissingColumns { required: usize, found: usize },

    #[error("No valid coordinates found in the data")]
    NoValidCoordinates,

    #[error("{statuses} statuses for {rows} rows")]
    RowCountMismatch { rows: usize, statuses: usize },
}

impl From<calamine::Error> for ShoreError {
    fn from(e: calamine::Error) -> Self {
        ShoreError::Spreadsheet(e.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for ShoreError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        ShoreError::Spreadsheet(e.to_string())
    }
}

impl From<shapefile::Error> for ShoreError {
    fn from(e: shapefile::Error) -> Self {
        ShoreError::Shapefile(e.to_string())
    }
}

/// Per-row geometric failure. Maps to `ShoreStatus::Error` for that row only.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("non-finite coordinate ({x}, {y})")]
    NonFinite { x: f64, y: f64 },

    #[error("coastline has no segments")]
    EmptyCoastline,

    #[error("point is in {found}, expected {expected}")]
    FrameMismatch { found: String, expected: String },

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, ShoreError>;
