//! Aggregate statistics over sites and tickets.

use serde::Serialize;

use crate::models::{Severity, Site, SiteStatus, Ticket, TicketStatus};

/// Default number of decimals in the availability string.
pub const DEFAULT_AVAILABILITY_DECIMALS: usize = 0;

/// Largest precision accepted for percentage strings.
pub const MAX_AVAILABILITY_DECIMALS: usize = 6;

/// Summary block shown above the site map and ticket table.
///
/// Always derived from the current collections, never stored on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_sites: usize,
    pub operational_sites: usize,
    pub warning_sites: usize,
    pub critical_sites: usize,
    pub plottable_sites: usize,

    /// Operational share of all sites in percent, e.g. "98"
    pub availability: String,

    pub total_tickets: usize,
    pub open_tickets: usize,
    pub in_progress_tickets: usize,
    pub resolved_tickets: usize,
    pub critical_tickets: usize,
    pub high_tickets: usize,
    pub medium_tickets: usize,
    pub low_tickets: usize,
}

impl DashboardStats {
    /// Compute with the default availability precision.
    pub fn compute(sites: &[Site], tickets: &[Ticket]) -> Self {
        Self::compute_with_decimals(sites, tickets, DEFAULT_AVAILABILITY_DECIMALS)
    }

    pub fn compute_with_decimals(sites: &[Site], tickets: &[Ticket], decimals: usize) -> Self {
        let sites_with = |status: SiteStatus| sites.iter().filter(|s| s.status == status).count();
        let tickets_with =
            |status: TicketStatus| tickets.iter().filter(|t| t.status == status).count();
        let severity_of =
            |severity: Severity| tickets.iter().filter(|t| t.severity == severity).count();

        let operational_sites = sites_with(SiteStatus::Operational);

        Self {
            total_sites: sites.len(),
            operational_sites,
            warning_sites: sites_with(SiteStatus::Warning),
            critical_sites: sites_with(SiteStatus::Critical),
            plottable_sites: sites.iter().filter(|s| s.is_plottable()).count(),
            availability: format_availability(operational_sites, sites.len(), decimals),
            total_tickets: tickets.len(),
            open_tickets: tickets_with(TicketStatus::Open),
            in_progress_tickets: tickets_with(TicketStatus::InProgress),
            resolved_tickets: tickets_with(TicketStatus::Resolved),
            critical_tickets: severity_of(Severity::Critical),
            high_tickets: severity_of(Severity::High),
            medium_tickets: severity_of(Severity::Medium),
            low_tickets: severity_of(Severity::Low),
        }
    }
}

/// Format `operational / total * 100` as a fixed-point string.
///
/// Halves round away from zero. An empty site list yields "0".
pub fn format_availability(operational: usize, total: usize, decimals: usize) -> String {
    if total == 0 {
        return "0".to_string();
    }

    format_percent(operational as f64 / total as f64 * 100.0, decimals)
}

/// Format a percentage with at most [`MAX_AVAILABILITY_DECIMALS`] decimals,
/// rounding halves away from zero.
pub fn format_percent(percent: f64, decimals: usize) -> String {
    let decimals = decimals.min(MAX_AVAILABILITY_DECIMALS);
    // Bounded above, so the cast and the scale stay finite
    let scale = 10f64.powi(decimals as i32);
    let rounded = (percent * scale).round() / scale;
    format!("{:.*}", decimals, rounded)
}
