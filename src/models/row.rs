//! Positional sheet row record.

/// Fixed column positions of the sheet template.
pub mod column {
    pub const IDENTIFIER: usize = 0;
    pub const TECHNOLOGY: usize = 1;
    pub const LATITUDE: usize = 2;
    pub const LONGITUDE: usize = 3;
    pub const TICKET_ID: usize = 4;
    pub const ISSUE: usize = 5;
    pub const SEVERITY: usize = 6;
    pub const STATUS: usize = 7;
    pub const CREATED_AT: usize = 8;
    pub const UPDATED_AT: usize = 9;
    pub const NOTES: usize = 10;
    /// Optional trailing column carrying the site's network status.
    pub const NETWORK_STATUS: usize = 11;

    /// Rows with fewer fields than this are incomplete.
    pub const MIN_FIELDS: usize = 4;
}

/// One data record of the sheet, after unquoting and trimming.
///
/// The four leading columns are always present. Every other column is `None`
/// when missing or blank.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SheetRow {
    pub identifier: String,
    pub technology: String,
    pub latitude: String,
    pub longitude: String,
    pub ticket_id: Option<String>,
    pub issue: Option<String>,
    pub severity: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub notes: Option<String>,
    pub network_status: Option<String>,
}

impl SheetRow {
    /// Build a row from already-split fields.
    ///
    /// Callers guarantee at least [`column::MIN_FIELDS`] entries.
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> Self {
        let required = |idx: usize| {
            fields
                .get(idx)
                .map(|v| v.as_ref().to_string())
                .unwrap_or_default()
        };
        let optional = |idx: usize| {
            fields
                .get(idx)
                .map(|v| v.as_ref().trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        Self {
            identifier: required(column::IDENTIFIER),
            technology: required(column::TECHNOLOGY),
            latitude: required(column::LATITUDE),
            longitude: required(column::LONGITUDE),
            ticket_id: optional(column::TICKET_ID),
            issue: optional(column::ISSUE),
            severity: optional(column::SEVERITY),
            status: optional(column::STATUS),
            created_at: optional(column::CREATED_AT),
            updated_at: optional(column::UPDATED_AT),
            notes: optional(column::NOTES),
            network_status: optional(column::NETWORK_STATUS),
        }
    }
}
