// src/pipeline/load.rs

//! Fetch → parse → normalize, with fallback substitution.

use chrono::{DateTime, Utc};

use crate::models::{Dashboard, DataOrigin, FallbackDataset, FallbackReason};
use crate::models::stats::DEFAULT_AVAILABILITY_DECIMALS;
use crate::services::{SheetSource, normalize_rows, parse_sheet};

/// Options for one pipeline run.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub availability_decimals: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            availability_decimals: DEFAULT_AVAILABILITY_DECIMALS,
        }
    }
}

/// Run the pipeline once. Never fails.
///
/// If the fetch fails or nothing parses, the fallback dataset is returned
/// instead and `origin` records why. A broken sheet therefore looks like a
/// healthy one to anything that ignores `origin`; the warning logged here is
/// the only other trace of it.
pub async fn load_dashboard(
    source: &dyn SheetSource,
    fallback: &FallbackDataset,
    options: &LoadOptions,
    now: DateTime<Utc>,
) -> Dashboard {
    let text = match source.fetch().await {
        Ok(text) => text,
        Err(e) => {
            log::warn!(
                "Failed to fetch sheet from {}: {}. Showing fallback data.",
                source.describe(),
                e
            );
            return fallback_dashboard(fallback, FallbackReason::Fetch(e.to_string()), options, now);
        }
    };

    let sheet = parse_sheet(&text);
    if sheet.is_empty() {
        log::warn!(
            "Sheet from {} has no usable rows ({} skipped). Showing fallback data.",
            source.describe(),
            sheet.skipped
        );
        return fallback_dashboard(fallback, FallbackReason::NoRows, options, now);
    }

    let (sites, tickets) = normalize_rows(&sheet.rows, now);
    log::info!(
        "Loaded {} sites and {} tickets from {} ({} rows skipped)",
        sites.len(),
        tickets.len(),
        source.describe(),
        sheet.skipped
    );

    Dashboard {
        sites,
        tickets,
        origin: DataOrigin::Live,
        fetched_at: now,
        availability_decimals: options.availability_decimals,
    }
}

fn fallback_dashboard(
    fallback: &FallbackDataset,
    reason: FallbackReason,
    options: &LoadOptions,
    now: DateTime<Utc>,
) -> Dashboard {
    Dashboard {
        sites: fallback.sites.clone(),
        tickets: fallback.tickets.clone(),
        origin: DataOrigin::Fallback { reason },
        fetched_at: now,
        availability_decimals: options.availability_decimals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, Result};
    use crate::models::{Severity, SiteStatus, TicketStatus};
    use async_trait::async_trait;

    const EXAMPLE: &str = "\
COWName,Tech,Lat,Long,TicketID,Issue,Severity,Status,CreatedAt,LastUpdate,Notes
CWH001,5G,26.6868,37.9833,,,,,,,
CWH002,4G,26.70,38.00,TKT01,\"Signal, weak\",High,Open,2024-01-01,2024-01-02,\"Check \"\"antenna\"\"\"
";

    enum StubSource {
        Text(&'static str),
        Fail,
    }

    #[async_trait]
    impl SheetSource for StubSource {
        async fn fetch(&self) -> Result<String> {
            match self {
                StubSource::Text(text) => Ok(text.to_string()),
                StubSource::Fail => Err(AppError::status(500, "stub://sheet")),
            }
        }

        fn describe(&self) -> String {
            "stub".to_string()
        }
    }

    async fn load(source: StubSource) -> Dashboard {
        load_dashboard(
            &source,
            &FallbackDataset::default(),
            &LoadOptions::default(),
            Utc::now(),
        )
        .await
    }

    #[tokio::test]
    async fn test_example_sheet() {
        let dash = load(StubSource::Text(EXAMPLE)).await;
        assert_eq!(dash.origin, DataOrigin::Live);

        assert_eq!(dash.sites.len(), 2);
        assert_eq!(dash.sites[0].id, "CWH001");
        assert_eq!(dash.sites[0].technology, "5G");
        assert_eq!(dash.sites[0].status, SiteStatus::Operational);
        assert_eq!(dash.sites[1].id, "CWH002");
        assert_eq!(dash.sites[1].technology, "4G");
        assert_eq!(dash.sites[1].status, SiteStatus::Operational);

        assert_eq!(dash.tickets.len(), 1);
        let ticket = &dash.tickets[0];
        assert_eq!(ticket.id, "TKT01");
        assert_eq!(ticket.severity, Severity::High);
        assert_eq!(ticket.status, TicketStatus::Open);
        assert_eq!(ticket.issue, "Signal, weak");
        assert_eq!(ticket.dispatcher_notes, "Check \"antenna\"");

        assert_eq!(dash.stats().availability, "100");
    }

    #[tokio::test]
    async fn test_fetch_failure_uses_fallback() {
        let dash = load(StubSource::Fail).await;
        let fallback = FallbackDataset::default();

        assert!(dash.is_fallback());
        assert!(matches!(
            dash.origin,
            DataOrigin::Fallback {
                reason: FallbackReason::Fetch(_)
            }
        ));
        assert_eq!(dash.sites.len(), fallback.sites.len());
        assert_eq!(dash.tickets.len(), fallback.tickets.len());
        assert_eq!(dash.stats().total_sites, fallback.sites.len());
    }

    #[tokio::test]
    async fn test_zero_rows_uses_fallback() {
        let dash = load(StubSource::Text("COWName,Tech,Lat,Long\nshort,row\n")).await;
        assert_eq!(
            dash.origin,
            DataOrigin::Fallback {
                reason: FallbackReason::NoRows
            }
        );
        assert_eq!(dash.sites, FallbackDataset::default().sites);
    }

    #[tokio::test]
    async fn test_custom_fallback_and_decimals() {
        let fallback = FallbackDataset {
            sites: FallbackDataset::default().sites[..2].to_vec(),
            tickets: Vec::new(),
        };
        let options = LoadOptions {
            availability_decimals: 2,
        };
        let dash = load_dashboard(&StubSource::Fail, &fallback, &options, Utc::now()).await;

        assert_eq!(dash.sites.len(), 2);
        assert!(dash.tickets.is_empty());
        assert_eq!(dash.stats().availability, "100.00");
    }
}
