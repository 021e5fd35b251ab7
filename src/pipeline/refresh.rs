// src/pipeline/refresh.rs

//! Periodic refresh driver.
//!
//! Each tick runs the whole pipeline and replaces the published dashboard.
//! A tick that arrives while the previous run is still waiting on the
//! network is skipped rather than queued.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};

use crate::models::{Dashboard, FallbackDataset};
use crate::services::SheetSource;

use super::load::{LoadOptions, load_dashboard};

/// Result of a refresh request.
#[derive(Debug, Clone)]
pub enum RefreshOutcome {
    /// The pipeline ran and its result was published
    Completed(Arc<Dashboard>),
    /// Another refresh was still in flight
    Skipped,
}

/// Runs the pipeline on demand or on an interval and publishes the latest
/// dashboard.
pub struct Refresher {
    source: Arc<dyn SheetSource>,
    fallback: FallbackDataset,
    options: LoadOptions,
    in_flight: AtomicBool,
    latest: watch::Sender<Option<Arc<Dashboard>>>,
}

/// Clears the in-flight flag when a refresh ends, including on cancellation.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Refresher {
    pub fn new(source: Arc<dyn SheetSource>, fallback: FallbackDataset, options: LoadOptions) -> Self {
        let (latest, _) = watch::channel(None);
        Self {
            source,
            fallback,
            options,
            in_flight: AtomicBool::new(false),
            latest,
        }
    }

    /// Receiver for published dashboards. Starts at `None` until the first
    /// refresh completes.
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<Dashboard>>> {
        self.latest.subscribe()
    }

    /// Most recently published dashboard.
    pub fn latest(&self) -> Option<Arc<Dashboard>> {
        self.latest.borrow().clone()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Run the pipeline once unless a run is already in flight.
    pub async fn refresh(&self) -> RefreshOutcome {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            log::debug!("Refresh already in flight, skipping");
            return RefreshOutcome::Skipped;
        }
        let _guard = InFlightGuard(&self.in_flight);

        let dashboard = Arc::new(
            load_dashboard(
                self.source.as_ref(),
                &self.fallback,
                &self.options,
                Utc::now(),
            )
            .await,
        );
        self.latest.send_replace(Some(Arc::clone(&dashboard)));

        RefreshOutcome::Completed(dashboard)
    }

    /// Refresh every `period` until `shutdown` resolves. The first refresh
    /// happens immediately. A refresh still in flight at shutdown is dropped.
    pub async fn run(&self, period: Duration, shutdown: impl Future<Output = ()>) {
        let mut ticker = time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = async {
                    ticker.tick().await;
                    self.refresh().await
                } => {}
            }
        }

        log::info!("Refresh loop stopping");
    }
}
