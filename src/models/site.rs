//! Monitored site data structure.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Operational state of a site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SiteStatus {
    #[default]
    Operational,
    Warning,
    Critical,
}

impl SiteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SiteStatus::Operational => "operational",
            SiteStatus::Warning => "warning",
            SiteStatus::Critical => "critical",
        }
    }

    /// Exact, case-insensitive keyword match. Anything unrecognised is
    /// operational.
    pub fn from_keyword(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "critical" => SiteStatus::Critical,
            "warning" => SiteStatus::Warning,
            _ => SiteStatus::Operational,
        }
    }
}

impl fmt::Display for SiteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A monitored network node (cell-on-wheels unit, tower, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    /// Site identifier (sheet column 0)
    pub id: String,

    /// Display name, same value as `id`
    pub name: String,

    /// Free-text location; the sheet has no location column so this is the name
    pub location: String,

    /// Latitude, `NaN` when the sheet value is not numeric
    pub latitude: f64,

    /// Longitude, `NaN` when the sheet value is not numeric
    pub longitude: f64,

    /// Primary radio technology, e.g. "4G"
    pub technology: String,

    pub status: SiteStatus,

    /// ISO-8601 timestamp of the last update
    pub last_update: String,
}

impl Site {
    /// Whether the site has coordinates a map can place.
    pub fn is_plottable(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    pub fn is_operational(&self) -> bool {
        self.status == SiteStatus::Operational
    }
}
