//! CSV and spreadsheet export of the filtered row set.
//!
//! Values come from the column accessors (derivation function first, then
//! dotted path), never from the custom cell renderers, so exported numbers
//! stay numbers.

use super::column::Columns;
use super::error::ExportError;
use super::row::TableRow;
use super::value::CellValue;
use rust_xlsxwriter::Workbook;
use std::path::{Path, PathBuf};

/// Worksheet name used for spreadsheet exports.
pub const SHEET_NAME: &str = "Sheet1";

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// `table_data.csv`
    Csv,
    /// `table_data.xlsx`
    Xlsx,
}

impl ExportFormat {
    /// Fixed artifact name.
    pub fn file_name(self) -> &'static str {
        match self {
            ExportFormat::Csv => "table_data.csv",
            ExportFormat::Xlsx => "table_data.xlsx",
        }
    }

    /// MIME type of the written file.
    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Xlsx => "application/octet-stream",
        }
    }

    /// Name shown in status messages.
    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::Csv => "CSV",
            ExportFormat::Xlsx => "Excel",
        }
    }
}

/// Header row plus one row of values per exported record.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRecords {
    /// Column headers.
    pub headers: Vec<String>,
    /// One value per column for each exported row.
    pub rows: Vec<Vec<CellValue>>,
}

impl ExportRecords {
    /// Extract every column value of `rows`, in the given order.
    pub fn collect<'a, T, I>(columns: &Columns<T>, rows: I) -> Self
    where
        T: TableRow + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let headers = columns.iter().map(|c| c.header().to_string()).collect();
        let rows = rows
            .into_iter()
            .map(|row| columns.iter().map(|c| c.value(row)).collect())
            .collect();
        Self { headers, rows }
    }
}

/// Encode records as CSV with RFC-4180 quoting and `\n` line endings.
pub fn csv_bytes(records: &ExportRecords) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(Vec::new());

    writer.write_record(&records.headers)?;
    for row in &records.rows {
        writer.write_record(row.iter().map(|v| v.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|e| ExportError::Csv(csv::Error::from(e.into_error())))
}

/// CSV export as a string.
pub fn csv_string(records: &ExportRecords) -> Result<String, ExportError> {
    let bytes = csv_bytes(records)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Encode records as a single-sheet OOXML workbook.
pub fn xlsx_bytes(records: &ExportRecords) -> Result<Vec<u8>, ExportError> {
    let too_large = || ExportError::TooLarge {
        rows: records.rows.len(),
        columns: records.headers.len(),
    };

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, header) in records.headers.iter().enumerate() {
        let col = u16::try_from(col).map_err(|_| too_large())?;
        worksheet.write_string(0, col, header)?;
    }

    for (r, row) in records.rows.iter().enumerate() {
        let sheet_row = u32::try_from(r + 1).map_err(|_| too_large())?;
        for (c, value) in row.iter().enumerate() {
            let col = u16::try_from(c).map_err(|_| too_large())?;
            match value {
                CellValue::Empty => {}
                CellValue::Integer(i) => {
                    worksheet.write_number(sheet_row, col, *i as f64)?;
                }
                CellValue::Float(x) => {
                    worksheet.write_number(sheet_row, col, *x)?;
                }
                other => {
                    worksheet.write_string(sheet_row, col, other.to_string())?;
                }
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

/// Encode `records` in `format` and write the artifact into `dir`.
///
/// Returns the path written.
pub fn write_export(
    dir: &Path,
    format: ExportFormat,
    records: &ExportRecords,
) -> Result<PathBuf, ExportError> {
    let bytes = match format {
        ExportFormat::Csv => csv_bytes(records)?,
        ExportFormat::Xlsx => xlsx_bytes(records)?,
    };

    std::fs::create_dir_all(dir).map_err(|source| ExportError::Write {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(format.file_name());
    std::fs::write(&path, bytes).map_err(|source| ExportError::Write {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}
