use std::path::Path;

use csv::ReaderBuilder;
use tracing::{info, warn};

use super::{excel, ColumnSchema, TableFormat, TableOptions};
use crate::error::{Result, ShoreError};
use crate::models::RawCoordinate;

/// Rows of the input file, kept verbatim for the output
#[derive(Debug, Clone)]
pub struct Table {
    pub headers: Option<Vec<String>>,
    pub records: Vec<Vec<String>>,
    pub schema: ColumnSchema,
}

impl Table {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// One coordinate per row, in file order
    pub fn coordinates(&self) -> Vec<RawCoordinate> {
        self.records
            .iter()
            .enumerate()
            .map(|(row, record)| {
                let cell = |index: usize| record.get(index).map(String::as_str);
                RawCoordinate {
                    latitude: parse_cell(row, cell(self.schema.latitude_index), "latitude"),
                    longitude: parse_cell(row, cell(self.schema.longitude_index), "longitude"),
                }
            })
            .collect()
    }
}

/// Empty cells and NaN are missing; unparseable text is logged and missing.
fn parse_cell(row: usize, cell: Option<&str>, name: &str) -> Option<f64> {
    let text = cell?.trim();
    if text.is_empty() {
        return None;
    }
    match text.parse::<f64>() {
        Ok(v) if v.is_nan() => None,
        Ok(v) => Some(v),
        Err(_) => {
            warn!("Row {}: Non-numeric {} {:?}", row + 1, name, text);
            None
        }
    }
}

/// Read the input table, CSV or spreadsheet by extension, and check it has
/// the coordinate columns.
pub fn read_table(path: &Path, schema: ColumnSchema, options: &TableOptions) -> Result<Table> {
    info!("Loading data from {}...", path.display());

    let (headers, records) = match TableFormat::from_path(path) {
        TableFormat::Csv => read_csv(path, options)?,
        TableFormat::Spreadsheet => excel::read_workbook(path, options)?,
    };

    let width = headers
        .as_ref()
        .map(|h| h.len())
        .or_else(|| records.iter().map(|r| r.len()).max())
        .unwrap_or(0);

    if width < schema.required_columns() {
        return Err(ShoreError::MissingColumns {
            required: schema.required_columns(),
            found: width,
        });
    }

    info!("Loaded {} rows", records.len());

    Ok(Table {
        headers,
        records,
        schema,
    })
}

fn read_csv(path: &Path, options: &TableOptions) -> Result<(Option<Vec<String>>, Vec<Vec<String>>)> {
    let mut reader = ReaderBuilder::new()
        .has_headers(options.has_headers)
        .delimiter(options.delimiter_byte()?)
        .flexible(true)
        .from_path(path)?;

    let headers = if options.has_headers {
        Some(reader.headers()?.iter().map(str::to_string).collect())
    } else {
        None
    };

    let mut records = Vec::new();
    for result in reader.records() {
        records.push(result?.iter().map(str::to_string).collect());
    }

    Ok((headers, records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(content: &str) -> tempfile::NamedTempFile {
        let file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        fs::write(file.path(), content).unwrap();
        file
    }

    #[test]
    fn test_reads_coordinates_by_position() {
        let file = write("lat,lon,name\n10.5,20.25,a\n,3,b\nabc,4,c\nNaN,1,d\n");
        let table = read_table(file.path(), ColumnSchema::default(), &TableOptions::default()).unwrap();

        assert_eq!(table.len(), 4);
        let coords = table.coordinates();
        assert_eq!(coords[0], RawCoordinate::new(10.5, 20.25));
        assert_eq!(coords[1].latitude, None);
        assert_eq!(coords[1].longitude, Some(3.0));
        assert_eq!(coords[2].latitude, None);
        assert_eq!(coords[3].latitude, None);
    }

    #[test]
    fn test_custom_schema_and_delimiter() {
        let file = write("id;lon;lat\n1;-0.12;51.5\n");
        let schema = ColumnSchema {
            latitude_index: 2,
            longitude_index: 1,
        };
        let options = TableOptions {
            delimiter: ';',
            ..Default::default()
        };
        let table = read_table(file.path(), schema, &options).unwrap();
        assert_eq!(table.coordinates(), vec![RawCoordinate::new(51.5, -0.12)]);
    }

    #[test]
    fn test_short_rows_are_missing() {
        let file = write("lat,lon\n1.0\n");
        let table = read_table(file.path(), ColumnSchema::default(), &TableOptions::default()).unwrap();
        assert_eq!(table.coordinates()[0].longitude, None);
    }

    #[test]
    fn test_too_few_columns_is_fatal() {
        let file = write("only\n1\n");
        let err = read_table(file.path(), ColumnSchema::default(), &TableOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            ShoreError::MissingColumns {
                required: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn test_headerless() {
        let file = write("1,2\n3,4\n");
        let options = TableOptions {
            has_headers: false,
            ..Default::default()
        };
        let table = read_table(file.path(), ColumnSchema::default(), &options).unwrap();
        assert!(table.headers.is_none());
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        let options = TableOptions {
            delimiter: '→',
            ..Default::default()
        };
        assert!(options.delimiter_byte().is_err());
    }
}
