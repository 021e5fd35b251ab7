// src/models/mod.rs

//! Domain models for the sheet pipeline.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod dashboard;
mod fallback;
mod network;
mod power;
mod row;
mod site;
pub mod stats;
mod ticket;

// Re-export all public types
pub use config::{Config, RefreshConfig, SourceConfig, StatsConfig};
pub use dashboard::{Dashboard, DashboardPayload, DataOrigin, FallbackReason};
pub use fallback::FallbackDataset;
pub use network::{NetworkDataset, NetworkStats, UnitMetrics, UnitStatus};
pub use power::{OutageEvent, PowerDataset, PowerStats, PowerTicket, PowerTicketKind};
pub use row::{SheetRow, column};
pub use site::{Site, SiteStatus};
pub use stats::DashboardStats;
pub use ticket::{KeywordRule, SEVERITY_RULES, STATUS_RULES, Severity, Ticket, TicketStatus};
