use std::path::Path;

use csv::WriterBuilder;
use tracing::info;

use super::{excel, Table, TableFormat, TableOptions};
use crate::error::{Result, ShoreError};
use crate::models::ShoreStatus;

/// Write every input column plus the status column, CSV or `.xlsx` by
/// extension.
///
/// `statuses` must be index-aligned with `table.records`.
pub fn write_table(
    path: &Path,
    table: &Table,
    statuses: &[ShoreStatus],
    options: &TableOptions,
) -> Result<()> {
    if table.records.len() != statuses.len() {
        return Err(ShoreError::RowCountMismatch {
            rows: table.records.len(),
            statuses: statuses.len(),
        });
    }
    info!("Saving results to {}...", path.display());

    match TableFormat::from_path(path) {
        TableFormat::Csv => write_csv(path, table, statuses, options),
        TableFormat::Spreadsheet => excel::write_workbook(path, table, statuses, options),
    }
}

fn write_csv(
    path: &Path,
    table: &Table,
    statuses: &[ShoreStatus],
    options: &TableOptions,
) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .delimiter(options.delimiter_byte()?)
        .flexible(true)
        .from_path(path)?;

    if let Some(headers) = &table.headers {
        let mut row: Vec<&str> = headers.iter().map(String::as_str).collect();
        row.push(&options.status_column);
        writer.write_record(&row)?;
    }

    for (record, status) in table.records.iter().zip(statuses) {
        let mut row: Vec<&str> = record.iter().map(String::as_str).collect();
        row.push(status.as_str());
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}
