//! Loader for delimited lineage files.
//!
//! The first line holds the column headers, every following line is one
//! lineage edge. Rows whose field count does not match the header are
//! skipped and counted rather than aborting the load.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info, warn};

use super::types::{ColumnMapping, LineageRow};

/// Errors that can occur while loading a lineage file.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Failed to read the file from disk.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// The header line could not be read.
    #[error("Failed to read CSV header: {0}")]
    CsvError(#[from] csv::Error),

    /// The input had no header line at all.
    #[error("Input is empty: expected a header line")]
    EmptyInput,

    /// A required semantic column is absent from the header.
    #[error("Missing required column '{0}' in header")]
    MissingColumn(String),

    /// The configured delimiter cannot be used by the reader.
    #[error("Delimiter {0:?} is not a single-byte ASCII character")]
    InvalidDelimiter(char),
}

/// Result type alias for loader operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Rows read from one input, with the count of rejected lines.
#[derive(Debug, Clone, Default)]
pub struct LoadedRows {
    /// Trimmed header names in file order.
    pub headers: Vec<String>,
    /// Accepted rows in file order.
    pub rows: Vec<LineageRow>,
    /// Lines rejected for a field-count mismatch or unreadable content.
    pub skipped_rows: usize,
}

/// Loads lineage rows from a file path.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use lineagescope::parser::{parse_file, ColumnMapping};
///
/// let loaded = parse_file(Path::new("parent_child_lineage.csv"), &ColumnMapping::default()).unwrap();
/// println!("{} rows, {} skipped", loaded.rows.len(), loaded.skipped_rows);
/// ```
pub fn parse_file(path: &Path, mapping: &ColumnMapping) -> ParseResult<LoadedRows> {
    let file = File::open(path)?;
    let loaded = parse_reader(file, mapping)?;
    info!(
        path = %path.display(),
        rows = loaded.rows.len(),
        skipped = loaded.skipped_rows,
        "loaded lineage file"
    );
    Ok(loaded)
}

/// Loads lineage rows from an in-memory string.
///
/// # Example
///
/// ```
/// use lineagescope::parser::{parse_str, ColumnMapping};
///
/// let text = "childTableName,childTableType,relationship,parentTableName,parentTableType\n\
///             b,View,reads,a,Table\n\
///             broken,row\n";
/// let loaded = parse_str(text, &ColumnMapping::default()).unwrap();
/// assert_eq!(loaded.rows.len(), 1);
/// assert_eq!(loaded.skipped_rows, 1);
/// ```
pub fn parse_str(content: &str, mapping: &ColumnMapping) -> ParseResult<LoadedRows> {
    parse_reader(content.as_bytes(), mapping)
}

/// Loads lineage rows from any reader.
pub fn parse_reader<R: Read>(reader: R, mapping: &ColumnMapping) -> ParseResult<LoadedRows> {
    if !mapping.delimiter.is_ascii() {
        return Err(ParseError::InvalidDelimiter(mapping.delimiter));
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(mapping.delimiter as u8)
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(ParseError::EmptyInput);
    }

    let positions = required_positions(&headers, mapping)?;

    let mut rows = Vec::new();
    let mut skipped_rows = 0;

    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!(error = %e, "skipping unreadable row");
                skipped_rows += 1;
                continue;
            }
        };

        let line = record.position().map_or(0, |p| p.line());

        if record.len() != headers.len() {
            warn!(
                line,
                expected = headers.len(),
                found = record.len(),
                "skipping row with incorrect column count"
            );
            skipped_rows += 1;
            continue;
        }

        rows.push(build_row(&record, &headers, &positions));
    }

    debug!(rows = rows.len(), skipped_rows, "parsed lineage rows");

    Ok(LoadedRows {
        headers,
        rows,
        skipped_rows,
    })
}

/// Header positions of the five semantic columns, in `ColumnMapping::required` order.
fn required_positions(headers: &[String], mapping: &ColumnMapping) -> ParseResult<[usize; 5]> {
    let mut positions = [0; 5];
    for (slot, column) in positions.iter_mut().zip(mapping.required()) {
        *slot = headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| ParseError::MissingColumn(column.to_string()))?;
    }
    Ok(positions)
}

fn build_row(record: &csv::StringRecord, headers: &[String], positions: &[usize; 5]) -> LineageRow {
    let field = |idx: usize| record.get(idx).unwrap_or_default().to_string();

    let mut row = LineageRow::new(
        field(positions[0]),
        field(positions[1]),
        field(positions[2]),
        field(positions[3]),
        field(positions[4]),
    );

    for (idx, header) in headers.iter().enumerate() {
        if !positions.contains(&idx) {
            row.extra.insert(header.clone(), field(idx));
        }
    }

    row
}
