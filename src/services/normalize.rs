// src/services/normalize.rs

//! Row normalizer.
//!
//! Maps parsed sheet rows to sites and tickets. Every field with a missing,
//! blank or unrecognised value gets an explicit default; no field can reject
//! a row at this stage.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::models::{Severity, SheetRow, Site, SiteStatus, Ticket, TicketStatus};

/// Technology assumed when the sheet leaves it blank.
pub const DEFAULT_TECHNOLOGY: &str = "4G";

/// Issue text for tickets without a description.
pub const DEFAULT_ISSUE: &str = "No description";

/// Format a timestamp the way the sheet consumers expect, e.g.
/// `2025-12-09T13:45:00.000Z`.
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Primary technology from a composite cell such as "2G/4G/5G".
pub fn primary_technology(raw: &str) -> String {
    raw.split('/')
        .next()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_TECHNOLOGY)
        .to_string()
}

/// Parse a coordinate cell, `NaN` when it is not a number.
pub fn parse_coordinate(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(f64::NAN)
}

/// Build the site for a row. Never fails.
pub fn site_from_row(row: &SheetRow, now: DateTime<Utc>) -> Site {
    let status = row
        .network_status
        .as_deref()
        .map(SiteStatus::from_keyword)
        .unwrap_or_default();

    Site {
        id: row.identifier.clone(),
        name: row.identifier.clone(),
        location: row.identifier.clone(),
        latitude: parse_coordinate(&row.latitude),
        longitude: parse_coordinate(&row.longitude),
        technology: primary_technology(&row.technology),
        status,
        last_update: row
            .updated_at
            .clone()
            .unwrap_or_else(|| iso_timestamp(now)),
    }
}

/// Build the ticket for a row, `None` when the row carries no ticket id.
pub fn ticket_from_row(row: &SheetRow, now: DateTime<Utc>) -> Option<Ticket> {
    let id = row.ticket_id.clone()?;

    Some(Ticket {
        id,
        site_id: row.identifier.clone(),
        site_name: row.identifier.clone(),
        issue: row.issue.clone().unwrap_or_else(|| DEFAULT_ISSUE.to_string()),
        severity: Severity::classify(row.severity.as_deref()),
        status: TicketStatus::classify(row.status.as_deref()),
        created_at: row
            .created_at
            .clone()
            .unwrap_or_else(|| iso_timestamp(now)),
        updated_at: row
            .updated_at
            .clone()
            .unwrap_or_else(|| iso_timestamp(now)),
        dispatcher_notes: row.notes.clone().unwrap_or_default(),
    })
}

/// Normalize all rows, keeping their order.
///
/// Every row yields a site; only rows with a ticket id yield a ticket, so
/// there are never more tickets than sites.
pub fn normalize_rows(rows: &[SheetRow], now: DateTime<Utc>) -> (Vec<Site>, Vec<Ticket>) {
    let sites = rows.iter().map(|row| site_from_row(row, now)).collect();
    let tickets = rows
        .iter()
        .filter_map(|row| ticket_from_row(row, now))
        .collect();
    (sites, tickets)
}
