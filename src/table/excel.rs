use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use rust_xlsxwriter::Workbook;
use tracing::{debug, info};

use super::{Table, TableOptions};
use crate::error::{Result, ShoreError};
use crate::models::ShoreStatus;

type Rows = (Option<Vec<String>>, Vec<Vec<String>>);

/// Read one worksheet as text cells, `options.sheet_name` or the first sheet.
pub(super) fn read_workbook(path: &Path, options: &TableOptions) -> Result<Rows> {
    let mut workbook = open_workbook_auto(path)?;
    let available = workbook.sheet_names();

    let sheet = match &options.sheet_name {
        Some(name) if available.contains(name) => name.clone(),
        Some(name) => {
            return Err(ShoreError::SheetNotFound {
                sheet: name.clone(),
                available,
            })
        }
        None => available.first().cloned().ok_or_else(|| {
            ShoreError::Spreadsheet(format!("{} has no sheets", path.display()))
        })?,
    };

    info!("Reading sheet {:?}", sheet);
    let range = workbook.worksheet_range(&sheet)?;

    // The range starts at the first used cell; pad so column indexes match the sheet.
    let offset = range.start().map(|(_, col)| col as usize).unwrap_or(0);
    debug!("Sheet {:?} data starts at column {}", sheet, offset);

    let mut rows = range.rows().map(|row| {
        std::iter::repeat(String::new())
            .take(offset)
            .chain(row.iter().map(cell_text))
            .collect::<Vec<_>>()
    });

    let headers = if options.has_headers { rows.next() } else { None };
    Ok((headers, rows.collect()))
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::DateTimeIso(s) => s.clone(),
        // Empty and error cells read as missing
        _ => String::new(),
    }
}

/// Write every input column plus the status column to a single `.xlsx` sheet.
pub(super) fn write_workbook(
    path: &Path,
    table: &Table,
    statuses: &[ShoreStatus],
    options: &TableOptions,
) -> Result<()> {
    let is_xlsx = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("xlsx"));
    if !is_xlsx {
        return Err(ShoreError::InvalidConfig(format!(
            "spreadsheet output must be .xlsx, got {}",
            path.display()
        )));
    }

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(options.sheet_name.as_deref().unwrap_or("Sheet1"))?;

    let mut row_num: u32 = 0;
    if let Some(headers) = &table.headers {
        let mut col = 0;
        for header in headers {
            worksheet.write_string(row_num, col, header.as_str())?;
            col = next_col(col)?;
        }
        worksheet.write_string(row_num, col, options.status_column.as_str())?;
        row_num += 1;
    }

    for (record, status) in table.records.iter().zip(statuses) {
        let mut col = 0;
        for text in record {
            if let Some(v) = as_number(text) {
                worksheet.write_number(row_num, col, v)?;
            } else if !text.is_empty() {
                worksheet.write_string(row_num, col, text.as_str())?;
            }
            col = next_col(col)?;
        }
        worksheet.write_string(row_num, col, status.as_str())?;
        row_num = row_num.checked_add(1).ok_or_else(|| {
            ShoreError::Spreadsheet("too many rows for a worksheet".to_string())
        })?;
    }

    workbook.save(path)?;
    Ok(())
}

/// Numeric cells are written as numbers only when that round-trips to the
/// same text, so identifiers like "007" stay strings.
fn as_number(text: &str) -> Option<f64> {
    text.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && v.to_string() == text)
}

fn next_col(col: u16) -> Result<u16> {
    col.checked_add(1)
        .ok_or_else(|| ShoreError::Spreadsheet("too many columns for a worksheet".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawCoordinate;
    use crate::table::{read_table, write_table, ColumnSchema};

    /// Two-sheet workbook: "Notes" first, the points on "Points".
    fn write_points_workbook(path: &Path) {
        let mut workbook = Workbook::new();
        let notes = workbook.add_worksheet();
        notes.set_name("Notes").unwrap();
        notes.write_string(0, 0, "not coordinates").unwrap();

        let points = workbook.add_worksheet();
        points.set_name("Points").unwrap();
        points.write_string(0, 0, "lat").unwrap();
        points.write_string(0, 1, "lon").unwrap();
        points.write_string(0, 2, "id").unwrap();
        points.write_number(1, 0, 10.5).unwrap();
        points.write_number(1, 1, -20.25).unwrap();
        points.write_string(1, 2, "007").unwrap();
        points.write_string(2, 0, "abc").unwrap();
        points.write_number(2, 1, 3.0).unwrap();
        points.write_string(2, 2, "b").unwrap();
        workbook.save(path).unwrap();
    }

    #[test]
    fn test_reads_named_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("points.xlsx");
        write_points_workbook(&path);

        let options = TableOptions {
            sheet_name: Some("Points".to_string()),
            ..Default::default()
        };
        let table = read_table(&path, ColumnSchema::default(), &options).unwrap();

        assert_eq!(
            table.headers,
            Some(vec!["lat".to_string(), "lon".to_string(), "id".to_string()])
        );
        assert_eq!(table.len(), 2);
        let coords = table.coordinates();
        assert_eq!(coords[0], RawCoordinate::new(10.5, -20.25));
        assert_eq!(coords[1].latitude, None);
        assert_eq!(coords[1].longitude, Some(3.0));
    }

    #[test]
    fn test_defaults_to_first_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("points.xlsx");
        write_points_workbook(&path);

        // First sheet is "Notes" with a single column
        let err = read_table(&path, ColumnSchema::default(), &TableOptions::default()).unwrap_err();
        assert!(matches!(err, ShoreError::MissingColumns { found: 1, .. }));
    }

    #[test]
    fn test_unknown_sheet_lists_available() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("points.xlsx");
        write_points_workbook(&path);

        let options = TableOptions {
            sheet_name: Some("Missing".to_string()),
            ..Default::default()
        };
        match read_table(&path, ColumnSchema::default(), &options).unwrap_err() {
            ShoreError::SheetNotFound { sheet, available } => {
                assert_eq!(sheet, "Missing");
                assert_eq!(available, vec!["Notes".to_string(), "Points".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_leading_empty_columns_keep_positions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("offset.xlsx");
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_number(0, 2, 1.5).unwrap();
        sheet.write_number(0, 3, 2.5).unwrap();
        workbook.save(&path).unwrap();

        let options = TableOptions {
            has_headers: false,
            ..Default::default()
        };
        let schema = ColumnSchema {
            latitude_index: 2,
            longitude_index: 3,
        };
        let table = read_table(&path, schema, &options).unwrap();
        assert_eq!(table.coordinates(), vec![RawCoordinate::new(1.5, 2.5)]);
    }

    #[test]
    fn test_xlsx_output_appends_status_column() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("points.xlsx");
        let output = dir.path().join("out.xlsx");
        write_points_workbook(&input);

        let options = TableOptions {
            sheet_name: Some("Points".to_string()),
            ..Default::default()
        };
        let table = read_table(&input, ColumnSchema::default(), &options).unwrap();
        write_table(
            &output,
            &table,
            &[ShoreStatus::Offshore, ShoreStatus::Unknown],
            &options,
        )
        .unwrap();

        let mut workbook = open_workbook_auto(&output).unwrap();
        assert_eq!(workbook.sheet_names(), vec!["Points".to_string()]);
        let range = workbook.worksheet_range("Points").unwrap();
        let rows: Vec<Vec<String>> = range
            .rows()
            .map(|row| row.iter().map(cell_text).collect())
            .collect();
        assert_eq!(
            rows,
            vec![
                vec!["lat", "lon", "id", "Shore_Status"],
                vec!["10.5", "-20.25", "007", "Offshore"],
                vec!["abc", "3", "b", "Unknown"],
            ]
        );
        assert_eq!(range.get_value((1, 0)), Some(&Data::Float(10.5)));
        assert_eq!(range.get_value((1, 2)), Some(&Data::String("007".to_string())));
    }

    #[test]
    fn test_legacy_spreadsheet_output_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let table = Table {
            headers: None,
            records: vec![vec!["1".to_string(), "2".to_string()]],
            schema: ColumnSchema::default(),
        };
        let err = write_table(
            &dir.path().join("out.ods"),
            &table,
            &[ShoreStatus::Offshore],
            &TableOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ShoreError::InvalidConfig(_)));
    }
}
