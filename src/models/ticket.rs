//! Ticket data structure and keyword classification rules.
//!
//! Severity and status come from free-text sheet cells. Both are classified
//! with an ordered rule table: the cell is lowercased and the first rule with
//! a keyword contained in it wins. A cell mentioning several keywords (e.g.
//! "high priority, escalated to critical") therefore resolves by table order,
//! not by any business meaning of the words.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An ordered classification rule: any of the keywords maps to the value.
pub type KeywordRule<T> = (&'static [&'static str], T);

/// Ticket severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

/// Severity rules, checked top to bottom.
pub const SEVERITY_RULES: &[KeywordRule<Severity>] = &[
    (&["critical"], Severity::Critical),
    (&["high"], Severity::High),
    (&["low"], Severity::Low),
    (&["medium"], Severity::Medium),
];

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }

    /// Classify a raw cell, `Medium` when nothing matches.
    pub fn classify(raw: Option<&str>) -> Self {
        raw.and_then(|value| classify(value, SEVERITY_RULES))
            .unwrap_or_default()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ticket workflow status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TicketStatus {
    #[default]
    Open,
    InProgress,
    Resolved,
}

/// Status rules, checked top to bottom.
pub const STATUS_RULES: &[KeywordRule<TicketStatus>] = &[
    (&["resolved", "closed"], TicketStatus::Resolved),
    (
        &["in-progress", "in progress", "assigned", "pending"],
        TicketStatus::InProgress,
    ),
    (&["open"], TicketStatus::Open),
];

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::InProgress => "in-progress",
            TicketStatus::Resolved => "resolved",
        }
    }

    /// Classify a raw cell, `Open` when nothing matches.
    pub fn classify(raw: Option<&str>) -> Self {
        raw.and_then(|value| classify(value, STATUS_RULES))
            .unwrap_or_default()
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First-match-wins substring classification, case-insensitive.
pub fn classify<T: Copy>(raw: &str, rules: &[KeywordRule<T>]) -> Option<T> {
    let haystack = raw.trim().to_lowercase();
    if haystack.is_empty() {
        return None;
    }

    rules
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| haystack.contains(k)))
        .map(|(_, value)| *value)
}

/// An open issue reported against a site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: String,

    /// Site identifier; not guaranteed to resolve to a loaded site
    pub site_id: String,

    /// Site display name, same value as `site_id`
    pub site_name: String,

    pub issue: String,
    pub severity: Severity,
    pub status: TicketStatus,

    /// ISO-8601 creation timestamp
    pub created_at: String,

    /// ISO-8601 last update timestamp
    pub updated_at: String,

    pub dispatcher_notes: String,
}
