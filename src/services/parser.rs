// src/services/parser.rs

//! Sheet CSV parser.
//!
//! The published export is read record by record with the `csv` crate. The
//! header is skipped and fields are mapped by position, never by column
//! name. A field wrapped in double quotes may contain commas, doubled quotes
//! and line breaks; a quote anywhere else in a field is literal.

use csv::{ReaderBuilder, StringRecord, Trim};
use thiserror::Error;

use crate::models::{SheetRow, column};

/// Why a data record was not turned into a row.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    #[error("expected at least {min} fields, found {found}", min = column::MIN_FIELDS)]
    TooFewFields { found: usize },

    #[error("identifier column is empty")]
    MissingIdentifier,

    #[error("unreadable record: {0}")]
    Malformed(String),
}

/// Rows of one payload, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedSheet {
    pub rows: Vec<SheetRow>,

    /// Data records rejected as incomplete
    pub skipped: usize,
}

impl ParsedSheet {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One data record and the line it starts on.
pub type ParsedRecord = (u64, Result<SheetRow, RowError>);

fn reader_builder(has_headers: bool) -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder
        .has_headers(has_headers)
        .flexible(true)
        .trim(Trim::All);
    builder
}

/// Parse a full CSV payload. The first record is treated as the header.
pub fn parse_sheet(text: &str) -> ParsedSheet {
    let mut sheet = ParsedSheet::default();

    for (_, result) in parse_records(text) {
        match result {
            Ok(row) => sheet.rows.push(row),
            Err(_) => sheet.skipped += 1,
        }
    }

    sheet
}

/// Parse every data record of a payload, keeping rejects with their reason.
pub fn parse_records(text: &str) -> Vec<ParsedRecord> {
    let mut reader = reader_builder(true).from_reader(text.trim().as_bytes());

    reader
        .records()
        .map(|result| match result {
            Ok(record) => {
                let line = record.position().map_or(0, |p| p.line());
                (line, row_from_record(&record))
            }
            Err(e) => {
                let line = e.position().map_or(0, |p| p.line());
                (line, Err(RowError::Malformed(e.to_string())))
            }
        })
        .collect()
}

/// Parse a single data record without a header.
pub fn parse_line(line: &str) -> Result<SheetRow, RowError> {
    let mut reader = reader_builder(false).from_reader(line.as_bytes());
    let mut record = StringRecord::new();

    match reader.read_record(&mut record) {
        Ok(true) => row_from_record(&record),
        Ok(false) => Err(RowError::TooFewFields { found: 0 }),
        Err(e) => Err(RowError::Malformed(e.to_string())),
    }
}

fn row_from_record(record: &StringRecord) -> Result<SheetRow, RowError> {
    let fields: Vec<&str> = record.iter().collect();

    if fields.len() < column::MIN_FIELDS {
        return Err(RowError::TooFewFields {
            found: fields.len(),
        });
    }
    if fields[column::IDENTIFIER].is_empty() {
        return Err(RowError::MissingIdentifier);
    }

    Ok(SheetRow::from_fields(&fields))
}
