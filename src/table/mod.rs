//! Tabular input and output around the classification core.
//!
//! Delimited text goes through `csv`; spreadsheets are read with `calamine`
//! and written with `rust_xlsxwriter`. The format is picked from the file
//! extension.

mod excel;
mod reader;
mod writer;

pub use reader::{read_table, Table};
pub use writer::write_table;

use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, ShoreError};

/// Zero-based positions of the coordinate columns, fixed for a whole file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColumnSchema {
    pub latitude_index: usize,
    pub longitude_index: usize,
}

impl Default for ColumnSchema {
    fn default() -> Self {
        Self {
            latitude_index: 0,
            longitude_index: 1,
        }
    }
}

impl ColumnSchema {
    /// Minimum number of columns a row needs
    pub fn required_columns(&self) -> usize {
        self.latitude_index.max(self.longitude_index) + 1
    }
}

/// File layout options shared by both formats
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TableOptions {
    pub has_headers: bool,
    /// CSV only
    pub delimiter: char,
    /// Worksheet to read; the first sheet when unset. Spreadsheets only.
    pub sheet_name: Option<String>,
    /// Name of the appended status column
    pub status_column: String,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            has_headers: true,
            delimiter: ',',
            sheet_name: None,
            status_column: "Shore_Status".to_string(),
        }
    }
}

impl TableOptions {
    pub fn delimiter_byte(&self) -> Result<u8> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| {
                ShoreError::InvalidConfig(format!(
                    "delimiter must be a single ASCII character, got {:?}",
                    self.delimiter
                ))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Spreadsheet,
}

impl TableFormat {
    /// `.xlsx`, `.xlsm`, `.xls` and `.ods` are spreadsheets, anything else is CSV.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("xlsx" | "xlsm" | "xls" | "ods") => TableFormat::Spreadsheet,
            _ => TableFormat::Csv,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(TableFormat::from_path(Path::new("a.csv")), TableFormat::Csv);
        assert_eq!(TableFormat::from_path(Path::new("a.txt")), TableFormat::Csv);
        assert_eq!(TableFormat::from_path(Path::new("noext")), TableFormat::Csv);
        assert_eq!(
            TableFormat::from_path(Path::new("Points.XLSX")),
            TableFormat::Spreadsheet
        );
        assert_eq!(
            TableFormat::from_path(Path::new("old.xls")),
            TableFormat::Spreadsheet
        );
    }
}
