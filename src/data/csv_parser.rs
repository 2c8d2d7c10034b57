//! CSV file parsing and writing
//!
//! Parses CSV files into a [`TableStore`] with per-column type inference, and
//! writes stores back out.
//!
//! ## Memory Limits
//!
//! To prevent unbounded memory growth:
//! - Files larger than 100MB are rejected (see [`MAX_CSV_SIZE_MB`])
//! - Files with more than 100,000 rows are rejected (see [`MAX_CSV_ROWS`])

use crate::constants::{CSV_DELIMITER, MAX_CSV_ROWS, MAX_CSV_SIZE_MB, UNNAMED_COLUMN_PREFIX};
use crate::data::error::{DataError, DataResult};
use crate::data::store::TableStore;
use crate::types::{DataCell, DataColumn, DataType};
use std::collections::HashSet;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

/// Parse a CSV file into a TableStore
///
/// # Memory Limits
/// - Files larger than [`MAX_CSV_SIZE_MB`]MB will return [`DataError::TooLarge`]
/// - Files with more than [`MAX_CSV_ROWS`] rows will return [`DataError::TooManyRows`]
pub fn parse_csv_file(path: &Path) -> DataResult<TableStore> {
    // Check file size before reading
    let metadata = std::fs::metadata(path)?;
    check_file_size(metadata.len())?;

    let bytes = std::fs::read(path)?;
    let content = String::from_utf8(bytes)
        .map_err(|e| DataError::Parse(format!("File is not valid UTF-8: {}", e.utf8_error())))?;
    let store = parse_csv_content(&content)?;
    info!(
        path = %path.display(),
        rows = store.row_count(),
        columns = store.column_count(),
        "Loaded CSV"
    );
    Ok(store)
}

/// Reject files above [`MAX_CSV_SIZE_MB`], counting every byte
fn check_file_size(len: u64) -> DataResult<()> {
    const MB: u64 = 1024 * 1024;
    if len > MAX_CSV_SIZE_MB as u64 * MB {
        return Err(DataError::TooLarge {
            size_mb: len.div_ceil(MB),
            max_mb: MAX_CSV_SIZE_MB,
        });
    }
    Ok(())
}

/// Parse CSV content from a string
///
/// The first record is the header. Short rows are padded with NULL, long rows
/// are rejected, blank lines are skipped.
pub fn parse_csv_content(content: &str) -> DataResult<TableStore> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(CSV_DELIMITER)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut records = reader.records();

    let header = match records.next() {
        Some(record) => record?,
        None => return Err(DataError::EmptyFile),
    };
    let names = header_names(header.iter());

    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for result in records {
        let record = result?;
        if raw_rows.len() >= MAX_CSV_ROWS {
            return Err(DataError::TooManyRows {
                rows: raw_rows.len() + 1, // +1 for the current row that exceeded limit
                max_rows: MAX_CSV_ROWS,
            });
        }
        if record.len() > names.len() {
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            return Err(DataError::Parse(format!(
                "Expected {} fields in line {}, saw {}",
                names.len(),
                line,
                record.len()
            )));
        }

        let mut row: Vec<String> = record.iter().map(str::to_string).collect();
        row.resize(names.len(), String::new());
        raw_rows.push(row);
    }

    // Infer column types from data
    let columns: Vec<DataColumn> = names
        .iter()
        .enumerate()
        .map(|(i, name)| DataColumn::new(name, infer_column_type(&raw_rows, i)))
        .collect();

    // Convert to typed cells
    let rows: Vec<Vec<DataCell>> = raw_rows
        .iter()
        .map(|row| {
            row.iter()
                .zip(&columns)
                .map(|(value, column)| DataCell::parse(value, column.data_type))
                .collect()
        })
        .collect();

    TableStore::from_parts(columns, rows)
}

/// Turn raw header fields into unique column names.
///
/// Blank names become `Unnamed: <index>`; repeats get `.1`, `.2`, ... suffixes.
fn header_names<'a>(fields: impl Iterator<Item = &'a str>) -> Vec<String> {
    let raw: Vec<String> = fields
        .enumerate()
        .map(|(i, name)| {
            if name.trim().is_empty() {
                format!("{}{}", UNNAMED_COLUMN_PREFIX, i)
            } else {
                name.to_string()
            }
        })
        .collect();

    let mut taken: HashSet<String> = HashSet::with_capacity(raw.len());
    let mut names = Vec::with_capacity(raw.len());
    for name in raw {
        let mut candidate = name.clone();
        let mut suffix = 1;
        while taken.contains(&candidate) {
            candidate = format!("{}.{}", name, suffix);
            suffix += 1;
        }
        taken.insert(candidate.clone());
        names.push(candidate);
    }
    names
}

/// Infer the data type for a column from its non-empty values
fn infer_column_type(rows: &[Vec<String>], col_idx: usize) -> DataType {
    let values: Vec<&str> = rows
        .iter()
        .filter_map(|r| r.get(col_idx).map(String::as_str))
        .filter(|s| !s.is_empty())
        .collect();

    if values.is_empty() {
        return DataType::Text;
    }

    // Numeric types only when every value writes back unchanged, so saving an
    // untouched file never rewrites it
    let exact = |hint: DataType| values.iter().all(|s| reproduces(s, hint));

    if exact(DataType::Integer) {
        return DataType::Integer;
    }

    if exact(DataType::Number) {
        return DataType::Number;
    }

    let all_bools = values
        .iter()
        .all(|s| s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("false"));
    if all_bools {
        return DataType::Boolean;
    }

    DataType::Text
}

/// Whether `value` parses as `hint` and prints back to the same text
fn reproduces(value: &str, hint: DataType) -> bool {
    match DataCell::parse(value, hint) {
        DataCell::Text(_) => false,
        cell => cell.to_string() == value,
    }
}

/// Check if a file path looks like a CSV file
pub fn is_csv_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}

/// Write a TableStore to a CSV file.
///
/// The content goes to a temporary file next to `path` first and is renamed
/// over it once fully written, so a failed save never truncates the original.
pub fn write_csv_file(store: &TableStore, path: &Path) -> DataResult<()> {
    let content = write_csv_content(store)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(content.as_bytes())?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| DataError::Io(e.error))?;

    info!(
        path = %path.display(),
        rows = store.row_count(),
        "Saved CSV"
    );
    Ok(())
}

/// Convert a TableStore to CSV string content
///
/// Header first, one line per row, NULL cells as empty fields.
pub fn write_csv_content(store: &TableStore) -> DataResult<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(CSV_DELIMITER)
        .flexible(true)
        .from_writer(Vec::new());

    if store.column_count() > 0 {
        writer.write_record(store.columns().iter().map(|c| c.name.as_str()))?;
        // The writer quotes a lone empty field, so single-column NULL rows
        // don't come back as blank lines
        for record in store.to_records() {
            writer.write_record(&record)?;
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| DataError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| DataError::Parse(e.to_string()))
}
