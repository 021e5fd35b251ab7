//! sitewatch CLI
//!
//! Runs the sheet pipeline once, on an interval, or against a local export.

use std::future::Future;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde::Serialize;
use sitewatch::{
    config::{load_config, load_options},
    error::Result,
    models::{Config, Dashboard, NetworkStats, PowerStats},
    pipeline::{Refresher, load_dashboard},
    services::{FileSheetSource, HttpSheetSource, SheetSource, parse_records},
};

/// sitewatch - Festival network sheet monitor
#[derive(Parser, Debug)]
#[command(name = "sitewatch", version, about = "Festival network sheet monitor")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "data/config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the sheet once and print the dashboard as JSON
    Fetch {
        /// Read a saved CSV export instead of the configured URL
        #[arg(long)]
        file: Option<PathBuf>,

        /// Print single-line JSON
        #[arg(long)]
        compact: bool,
    },

    /// Refresh on an interval until interrupted
    Watch {
        /// Seconds between refreshes (default: refresh.interval_secs)
        #[arg(long)]
        interval: Option<u64>,
    },

    /// Report how each record of a saved CSV export parses
    Parse {
        /// Path to the CSV file
        path: PathBuf,
    },

    /// Print power and network summaries from the configured datasets
    Report {
        /// Print single-line JSON
        #[arg(long)]
        compact: bool,
    },

    /// Validate the configuration file
    Validate,
}

/// Output of the `report` command.
#[derive(Serialize)]
struct Report {
    power: PowerStats,
    network: NetworkStats,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn build_source(config: &Config, file: Option<PathBuf>) -> Result<Arc<dyn SheetSource>> {
    Ok(match file {
        Some(path) => Arc::new(FileSheetSource::new(path)),
        None => Arc::new(HttpSheetSource::new(&config.source)?),
    })
}

/// Resolve when the shutdown signal arrives, or at once if it cannot be
/// installed.
async fn wait_for_shutdown(signal: impl Future<Output = io::Result<()>>) {
    if let Err(e) = signal.await {
        log::error!("Failed to listen for Ctrl-C, stopping: {}", e);
    }
}

fn log_summary(dashboard: &Dashboard) {
    let stats = dashboard.stats();
    if dashboard.is_fallback() {
        log::warn!("Showing fallback data: {:?}", dashboard.origin);
    }
    log::info!(
        "{} sites ({} operational, {} warning, {} critical), availability {}%, {} tickets ({} open)",
        stats.total_sites,
        stats.operational_sites,
        stats.warning_sites,
        stats.critical_sites,
        stats.availability,
        stats.total_tickets,
        stats.open_tickets
    );
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Fetch { file, compact } => {
            let config = load_config(&cli.config)?;
            let source = build_source(&config, file)?;

            let dashboard = load_dashboard(
                source.as_ref(),
                &config.fallback,
                &load_options(&config),
                chrono::Utc::now(),
            )
            .await;
            log_summary(&dashboard);

            let payload = dashboard.payload();
            let json = if compact {
                serde_json::to_string(&payload)?
            } else {
                serde_json::to_string_pretty(&payload)?
            };
            println!("{json}");
        }

        Command::Watch { interval } => {
            let config = load_config(&cli.config)?;
            let period = Duration::from_secs(interval.unwrap_or(config.refresh.interval_secs).max(1));
            let refresher = Refresher::new(
                build_source(&config, None)?,
                config.fallback.clone(),
                load_options(&config),
            );

            let mut updates = refresher.subscribe();
            let reporter = tokio::spawn(async move {
                while updates.changed().await.is_ok() {
                    let latest = updates.borrow_and_update().clone();
                    if let Some(dashboard) = latest {
                        log_summary(&dashboard);
                    }
                }
            });

            log::info!("Refreshing every {}s, press Ctrl-C to stop", period.as_secs());
            refresher
                .run(period, wait_for_shutdown(tokio::signal::ctrl_c()))
                .await;

            drop(refresher);
            let _ = reporter.await;
        }

        Command::Parse { path } => {
            let text = FileSheetSource::new(&path).fetch().await?;

            let mut accepted = 0usize;
            let mut rejected = 0usize;
            for (line, result) in parse_records(&text) {
                match result {
                    Ok(row) => {
                        accepted += 1;
                        log::debug!("line {}: {}", line, row.identifier);
                    }
                    Err(e) => {
                        rejected += 1;
                        log::info!("line {} skipped: {}", line, e);
                    }
                }
            }

            log::info!(
                "{}: {} rows accepted, {} skipped",
                path.display(),
                accepted,
                rejected
            );
        }

        Command::Report { compact } => {
            let config = load_config(&cli.config)?;
            let report = Report {
                power: config.power.stats(),
                network: config.network.stats(),
            };
            log::info!(
                "Power availability {}% over {} min, {} units ({} warning)",
                report.power.availability,
                config.power.window_minutes,
                report.network.total_units,
                report.network.warning_units
            );

            let json = if compact {
                serde_json::to_string(&report)?
            } else {
                serde_json::to_string_pretty(&report)?
            };
            println!("{json}");
        }

        Command::Validate => {
            log::info!("Validating {}...", cli.config.display());

            let config = Config::load(&cli.config)?;
            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!(
                "✓ Config OK (source {}, {} fallback sites)",
                config.source.url,
                config.fallback.sites.len()
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_shutdown_signal_failure_resolves() {
        let failed = async { Err::<(), _>(io::Error::other("no signal handler")) };
        tokio::time::timeout(Duration::from_secs(1), wait_for_shutdown(failed))
            .await
            .unwrap();
    }

    #[test]
    fn test_cli_parses_report() {
        let cli = Cli::try_parse_from(["sitewatch", "report", "--compact"]).unwrap();
        assert!(matches!(cli.command, Command::Report { compact: true }));
    }
}
