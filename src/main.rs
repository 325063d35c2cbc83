//! Court Booker - command line entry point
//!
//! Loads the configuration and weekly schedule, then books the next
//! occurrence of every scheduled block at the facility portal.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::Parser;
use court_booker::app::{build_requests, portal_options, run_bookings, DryRunSink};
use court_booker::config::{validate_config, ConfigLoader, DEFAULT_ENV_PREFIX};
use court_booker::orchestrator::{ActionSink, AvailabilitySource};
use court_booker::portal::PortalClient;
use court_booker_telemetry::init_tracing;
use tracing::{info, warn};

/// Court Booker CLI
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (TOML, YAML or JSON)
    #[arg(long, default_value = "/etc/court-booker/config.toml")]
    config: PathBuf,

    /// Schedule file, overriding `schedule.path` from the configuration
    #[arg(long)]
    schedule: Option<PathBuf>,

    /// Reference date for resolving weekdays, as YYYY-MM-DD
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Resolve layouts and log reservations without booking anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = ConfigLoader::load(&args.config, DEFAULT_ENV_PREFIX)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    if let Some(schedule) = args.schedule {
        config.schedule.path = Some(schedule);
    }

    validate_config(&config).context("Invalid configuration")?;

    init_tracing(&config.logging).context("Failed to initialize logging")?;

    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let requests = build_requests(&config.schedule, today).context("Failed to read schedule")?;

    if requests.is_empty() {
        warn!("Schedule is empty, nothing to book");
        return Ok(());
    }

    info!(
        today = %today,
        requests = requests.len(),
        dry_run = args.dry_run,
        "Starting Court Booker"
    );

    if config.portal.session_cookie.is_none() {
        warn!("No session cookie configured, the portal will treat requests as anonymous");
    }

    let portal = Arc::new(
        PortalClient::new(portal_options(&config.portal))
            .context("Failed to create portal client")?,
    );

    let source: Arc<dyn AvailabilitySource> = portal.clone();
    let sink: Arc<dyn ActionSink> = if args.dry_run {
        Arc::new(DryRunSink)
    } else {
        portal
    };

    let report = run_bookings(source, sink, &requests, args.dry_run)
        .await
        .context("Booking run aborted")?;

    info!(
        reserved = report.reserved(),
        unsuccessful = report.unsuccessful(),
        unavailable = report.unavailable(),
        without_layout = report.without_layout(),
        "Court Booker finished"
    );

    Ok(())
}
