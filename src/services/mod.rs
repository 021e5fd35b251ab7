//! Service layer for the sheet pipeline.
//!
//! This module contains the business logic for:
//! - Sheet retrieval (`SheetSource`, `HttpSheetSource`, `FileSheetSource`)
//! - CSV parsing (`parse_sheet`)
//! - Row normalization (`normalize_rows`)

pub mod normalize;
pub mod parser;
mod source;

pub use normalize::{normalize_rows, site_from_row, ticket_from_row};
pub use parser::{ParsedRecord, ParsedSheet, RowError, parse_line, parse_records, parse_sheet};
pub use source::{FileSheetSource, HttpSheetSource, SheetSource};
