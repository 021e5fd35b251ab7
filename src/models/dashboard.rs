//! Pipeline output handed to display consumers.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{DashboardStats, Site, Ticket};

/// Why the fallback dataset replaced live data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "kebab-case")]
pub enum FallbackReason {
    /// Transport failure, non-success status or empty body
    Fetch(String),
    /// The payload parsed, but no row survived
    NoRows,
}

/// Where the dashboard data came from.
///
/// Consumers render both the same way; this only makes the substitution
/// observable, since the fallback is otherwise indistinguishable from a
/// healthy sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "kebab-case")]
pub enum DataOrigin {
    Live,
    Fallback { reason: FallbackReason },
}

impl DataOrigin {
    pub fn is_fallback(&self) -> bool {
        matches!(self, DataOrigin::Fallback { .. })
    }
}

/// Sites and tickets from one pipeline run.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub sites: Vec<Site>,
    pub tickets: Vec<Ticket>,
    pub origin: DataOrigin,
    pub fetched_at: DateTime<Utc>,

    /// Decimals used when formatting availability
    pub availability_decimals: usize,
}

/// Serialized form of a [`Dashboard`], stats included.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardPayload<'a> {
    pub sites: &'a [Site],
    pub tickets: &'a [Ticket],
    pub stats: DashboardStats,
    pub origin: &'a DataOrigin,
    pub fetched_at: DateTime<Utc>,
}

impl Dashboard {
    /// Recompute the stats block from the current collections.
    pub fn stats(&self) -> DashboardStats {
        DashboardStats::compute_with_decimals(&self.sites, &self.tickets, self.availability_decimals)
    }

    pub fn is_fallback(&self) -> bool {
        self.origin.is_fallback()
    }

    /// Sites a map can place.
    pub fn plottable_sites(&self) -> impl Iterator<Item = &Site> {
        self.sites.iter().filter(|s| s.is_plottable())
    }

    pub fn payload(&self) -> DashboardPayload<'_> {
        DashboardPayload {
            sites: &self.sites,
            tickets: &self.tickets,
            stats: self.stats(),
            origin: &self.origin,
            fetched_at: self.fetched_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SiteStatus;

    fn dashboard(origin: DataOrigin) -> Dashboard {
        Dashboard {
            sites: vec![Site {
                id: "CWH022".to_string(),
                name: "CWH022".to_string(),
                location: "CWH022".to_string(),
                latitude: 25.63587,
                longitude: 46.83091,
                technology: "2G".to_string(),
                status: SiteStatus::Warning,
                last_update: "2025-12-09T12:30:00Z".to_string(),
            }],
            tickets: Vec::new(),
            origin,
            fetched_at: Utc::now(),
            availability_decimals: 0,
        }
    }

    #[test]
    fn test_stats_follow_collections() {
        let mut dash = dashboard(DataOrigin::Live);
        assert_eq!(dash.stats().availability, "0");

        dash.sites[0].status = SiteStatus::Operational;
        assert_eq!(dash.stats().availability, "100");
    }

    #[test]
    fn test_payload_shape() {
        let dash = dashboard(DataOrigin::Fallback {
            reason: FallbackReason::Fetch("HTTP status 500".to_string()),
        });
        let json = serde_json::to_value(dash.payload()).unwrap();

        assert_eq!(json["stats"]["totalSites"], 1);
        assert_eq!(json["origin"]["source"], "fallback");
        assert_eq!(json["origin"]["reason"]["kind"], "fetch");
        assert!(json.get("fetchedAt").is_some());
    }

    #[test]
    fn test_live_origin_serialization() {
        let json = serde_json::to_value(DataOrigin::Live).unwrap();
        assert_eq!(json["source"], "live");
        assert!(!DataOrigin::Live.is_fallback());
    }
}
