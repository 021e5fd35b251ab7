//! Sample dataset substituted when live sheet data is unavailable.

use serde::{Deserialize, Serialize};

use crate::models::{Severity, Site, SiteStatus, Ticket, TicketStatus};

/// A fixed set of sites and tickets shown instead of live data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackDataset {
    #[serde(default)]
    pub sites: Vec<Site>,

    #[serde(default)]
    pub tickets: Vec<Ticket>,
}

impl Default for FallbackDataset {
    fn default() -> Self {
        Self {
            sites: vec![
                site("CWH076", "2G", 25.59805, 46.87754, SiteStatus::Operational),
                site("CWH022", "2G", 25.63587, 46.83091, SiteStatus::Operational),
                site("CWH188", "2G", 25.64236, 46.81855, SiteStatus::Operational),
                site("CWH943", "2G", 25.72473, 46.89682, SiteStatus::Warning),
                site("CWS808", "2G", 25.6609, 46.86093, SiteStatus::Operational),
            ],
            tickets: vec![
                ticket(
                    "PT-2025-001",
                    "CWH076",
                    "Power outage, generator on standby",
                    Severity::Critical,
                    TicketStatus::Open,
                    "2025-12-09T13:45:00Z",
                ),
                ticket(
                    "PT-2025-002",
                    "CWH022",
                    "Intermittent power supply",
                    Severity::High,
                    TicketStatus::InProgress,
                    "2025-12-09T12:30:00Z",
                ),
                ticket(
                    "PT-2025-003",
                    "CWH943",
                    "Degraded signal strength",
                    Severity::Medium,
                    TicketStatus::Open,
                    "2025-12-09T11:20:00Z",
                ),
            ],
        }
    }
}

fn site(id: &str, technology: &str, latitude: f64, longitude: f64, status: SiteStatus) -> Site {
    Site {
        id: id.to_string(),
        name: id.to_string(),
        location: id.to_string(),
        latitude,
        longitude,
        technology: technology.to_string(),
        status,
        last_update: "2025-12-09T14:00:00Z".to_string(),
    }
}

fn ticket(
    id: &str,
    site_id: &str,
    issue: &str,
    severity: Severity,
    status: TicketStatus,
    created_at: &str,
) -> Ticket {
    Ticket {
        id: id.to_string(),
        site_id: site_id.to_string(),
        site_name: site_id.to_string(),
        issue: issue.to_string(),
        severity,
        status,
        created_at: created_at.to_string(),
        updated_at: created_at.to_string(),
        dispatcher_notes: String::new(),
    }
}
