//! Power tickets, outage events and their summary.
//!
//! Downtime is measured against a fixed observation window: every minute of
//! an unresolved ticket counts against it, resolved tickets do not.

use serde::{Deserialize, Serialize};

use crate::models::stats::format_percent;
use crate::models::{Severity, TicketStatus};

/// Default observation window, one eight-hour shift.
pub const DEFAULT_WINDOW_MINUTES: u64 = 480;

/// Decimals in the power availability string.
pub const POWER_AVAILABILITY_DECIMALS: usize = 2;

/// What a power ticket reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PowerTicketKind {
    /// Supply lost entirely
    #[default]
    Outage,
    /// Degraded supply or generator work
    Power,
}

/// A ticket raised against a site's power supply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerTicket {
    pub id: String,
    pub location: String,
    #[serde(default)]
    pub severity: Severity,
    #[serde(rename = "type", default)]
    pub kind: PowerTicketKind,
    #[serde(default)]
    pub status: TicketStatus,
    pub created_at: String,

    /// Minutes without power, when known
    #[serde(rename = "duration", default)]
    pub duration_minutes: Option<u64>,

    #[serde(default)]
    pub affected_area: Option<String>,
}

impl PowerTicket {
    fn minutes(&self) -> u64 {
        self.duration_minutes.unwrap_or(0)
    }
}

/// A zone-wide outage shown on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutageEvent {
    pub id: String,
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    pub start_time: String,
    #[serde(rename = "duration")]
    pub duration_minutes: u64,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default)]
    pub affected_devices: u64,
}

/// Power tickets and outage events with the window they are measured in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerDataset {
    pub window_minutes: u64,
    pub tickets: Vec<PowerTicket>,
    pub events: Vec<OutageEvent>,
}

impl PowerDataset {
    pub fn stats(&self) -> PowerStats {
        PowerStats::compute(&self.tickets, &self.events, self.window_minutes)
    }
}

impl Default for PowerDataset {
    fn default() -> Self {
        use PowerTicketKind::{Outage, Power};
        use Severity::{Critical, High, Low, Medium};
        use TicketStatus::{InProgress, Open, Resolved};

        Self {
            window_minutes: DEFAULT_WINDOW_MINUTES,
            tickets: vec![
                ticket("PT-2025-001", "COW076", Critical, Outage, Open, "2025-12-09T13:45:00Z", 12, "North Zone"),
                ticket("PT-2025-002", "COW022", Critical, Power, InProgress, "2025-12-09T12:30:00Z", 84, "Central Zone"),
                ticket("PT-2025-003", "COW188", High, Outage, Open, "2025-12-09T11:20:00Z", 155, "East Zone"),
                ticket("PT-2025-004", "COW094", High, Power, Open, "2025-12-09T10:15:00Z", 260, "South Zone"),
                ticket("PT-2025-005", "COW652", Medium, Outage, Resolved, "2025-12-09T09:00:00Z", 45, "West Zone"),
                ticket("PT-2025-006", "CWS808", Medium, Power, Resolved, "2025-12-08T20:30:00Z", 120, "North Zone"),
                ticket("PT-2025-007", "COW636", Low, Outage, Resolved, "2025-12-08T18:45:00Z", 30, "Central Zone"),
                ticket("PT-2025-008", "CWH352", Low, Power, Resolved, "2025-12-08T16:20:00Z", 25, "East Zone"),
            ],
            events: vec![
                event("OE-001", "North Zone", 25.72, 46.87, "2025-12-09T13:45:00Z", 12, Critical, 2345),
                event("OE-002", "Central Zone", 25.63, 46.83, "2025-12-09T12:30:00Z", 84, Critical, 3456),
                event("OE-003", "East Zone", 25.68, 46.89, "2025-12-09T11:20:00Z", 155, High, 1234),
            ],
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn ticket(
    id: &str,
    location: &str,
    severity: Severity,
    kind: PowerTicketKind,
    status: TicketStatus,
    created_at: &str,
    duration_minutes: u64,
    affected_area: &str,
) -> PowerTicket {
    PowerTicket {
        id: id.to_string(),
        location: location.to_string(),
        severity,
        kind,
        status,
        created_at: created_at.to_string(),
        duration_minutes: Some(duration_minutes),
        affected_area: Some(affected_area.to_string()),
    }
}

#[allow(clippy::too_many_arguments)]
fn event(
    id: &str,
    location: &str,
    latitude: f64,
    longitude: f64,
    start_time: &str,
    duration_minutes: u64,
    severity: Severity,
    affected_devices: u64,
) -> OutageEvent {
    OutageEvent {
        id: id.to_string(),
        location: location.to_string(),
        latitude,
        longitude,
        start_time: start_time.to_string(),
        duration_minutes,
        severity,
        affected_devices,
    }
}

/// Summary block of the power panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerStats {
    pub total_tickets: usize,
    pub critical_count: usize,
    pub high_count: usize,
    pub medium_count: usize,
    pub low_count: usize,
    pub open_count: usize,
    pub in_progress_count: usize,
    pub resolved_count: usize,

    /// Minutes reported by outage-type tickets
    pub total_outage_duration: u64,

    /// Unresolved downtime against the window, e.g. "23.54"; never negative
    pub availability: String,

    pub total_affected_devices: u64,
}

impl PowerStats {
    pub fn compute(tickets: &[PowerTicket], events: &[OutageEvent], window_minutes: u64) -> Self {
        let severity_of = |severity: Severity| tickets.iter().filter(|t| t.severity == severity).count();
        let status_of = |status: TicketStatus| tickets.iter().filter(|t| t.status == status).count();

        let total_outage_duration = tickets
            .iter()
            .filter(|t| t.kind == PowerTicketKind::Outage)
            .map(PowerTicket::minutes)
            .sum();
        let downtime: u64 = tickets
            .iter()
            .filter(|t| t.status != TicketStatus::Resolved)
            .map(PowerTicket::minutes)
            .sum();

        Self {
            total_tickets: tickets.len(),
            critical_count: severity_of(Severity::Critical),
            high_count: severity_of(Severity::High),
            medium_count: severity_of(Severity::Medium),
            low_count: severity_of(Severity::Low),
            open_count: status_of(TicketStatus::Open),
            in_progress_count: status_of(TicketStatus::InProgress),
            resolved_count: status_of(TicketStatus::Resolved),
            total_outage_duration,
            availability: window_availability(downtime, window_minutes),
            total_affected_devices: events.iter().map(|e| e.affected_devices).sum(),
        }
    }
}

/// Share of the window left after `downtime`, clamped at zero.
pub fn window_availability(downtime: u64, window_minutes: u64) -> String {
    if window_minutes == 0 {
        return format_percent(0.0, POWER_AVAILABILITY_DECIMALS);
    }

    let up = window_minutes.saturating_sub(downtime);
    format_percent(
        up as f64 / window_minutes as f64 * 100.0,
        POWER_AVAILABILITY_DECIMALS,
    )
}
