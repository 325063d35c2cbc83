//! Wiring between configuration, the portal and the orchestrator

use async_trait::async_trait;
use chrono::NaiveDate;
use court_booker_config::{load_schedule_file, PortalConfig, ScheduleConfig, ScheduleEntry};
use court_booker_orchestrator::{
    ActionSink, AvailabilitySource, BookingOrchestrator, OrchestratorError, RequestOutcome,
    RunReport, SinkError,
};
use court_booker_portal::PortalOptions;
use court_booker_telemetry::{ErrorContext, RunSpan};
use court_booker_types::{BookingRequest, SessionId};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn, Instrument};

/// Sink that logs reservations instead of performing them
#[derive(Debug, Default)]
pub struct DryRunSink;

#[async_trait]
impl ActionSink for DryRunSink {
    async fn reserve(&self, session_id: &SessionId) -> Result<bool, SinkError> {
        info!(session_id = %session_id, "Dry run, not reserving");
        Ok(true)
    }
}

/// Schedule entries from the schedule file followed by inline entries
pub fn schedule_entries(config: &ScheduleConfig) -> court_booker_config::Result<Vec<ScheduleEntry>> {
    let mut entries = match &config.path {
        Some(path) => load_schedule_file(path)?,
        None => Vec::new(),
    };

    for line in &config.entries {
        entries.push(line.parse::<ScheduleEntry>()?);
    }

    Ok(entries)
}

/// Booking requests for the schedule, relative to `today`
pub fn build_requests(
    config: &ScheduleConfig,
    today: NaiveDate,
) -> court_booker_config::Result<Vec<BookingRequest>> {
    Ok(schedule_entries(config)?
        .iter()
        .map(|entry| entry.to_request(today))
        .collect())
}

pub fn portal_options(config: &PortalConfig) -> PortalOptions {
    PortalOptions {
        sessions_url: config.sessions_url.clone(),
        booking_url: config.booking_url.clone(),
        sessions_window: config.sessions_window,
        session_cookie: config.session_cookie.clone(),
        timeout: Duration::from_millis(config.timeout_ms),
    }
}

/// Run every request inside one correlated span
pub async fn run_bookings(
    source: Arc<dyn AvailabilitySource>,
    sink: Arc<dyn ActionSink>,
    requests: &[BookingRequest],
    dry_run: bool,
) -> Result<RunReport, OrchestratorError> {
    let run = RunSpan::new(requests.len(), dry_run);

    let orchestrator = BookingOrchestrator::new(source, sink);

    let report = orchestrator
        .run(requests)
        .instrument(run.span())
        .await
        .with_run_id(run.run_id)?;

    log_summary(&report);

    Ok(report)
}

/// One log line per request
pub fn log_summary(report: &RunReport) {
    for entry in &report.requests {
        match &entry.outcome {
            RequestOutcome::Attempted { tier, report } => info!(
                request = %entry.request,
                tier = %tier,
                status = ?report.status(),
                reserved = report.reserved(),
                unsuccessful = report.unsuccessful(),
                "Request finished"
            ),
            RequestOutcome::Unavailable(reason) => {
                warn!(request = %entry.request, reason = %reason, "Request not offered")
            }
            RequestOutcome::NoLayoutFound => {
                warn!(request = %entry.request, "No court layout for request")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    #[test]
    fn test_build_requests_from_inline_entries() {
        let config = ScheduleConfig {
            path: None,
            entries: vec!["Mon 18:00-19:00".to_string(), "Tue 07:00-07:30".to_string()],
        };

        let requests = build_requests(&config, monday()).unwrap();

        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].date.as_str(), "20240115");
        assert_eq!(requests[0].hours.len(), 2);
        assert_eq!(requests[1].date.as_str(), "20240116");
        assert_eq!(requests[1].hours[0].as_str(), "07:00");
    }

    #[test]
    fn test_file_entries_come_first() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Sun 10:00-11:00").unwrap();

        let config = ScheduleConfig {
            path: Some(file.path().to_path_buf()),
            entries: vec!["Mon 18:00-19:00".to_string()],
        };

        let entries = schedule_entries(&config).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].to_string(), "Sun 10:00-11:00");
    }

    #[test]
    fn test_invalid_inline_entry() {
        let config = ScheduleConfig {
            path: None,
            entries: vec!["Mon 18:00-18:00".to_string()],
        };

        assert!(build_requests(&config, monday()).is_err());
    }

    #[test]
    fn test_portal_options_from_config() {
        let config = PortalConfig {
            timeout_ms: 1500,
            session_cookie: Some("sessionid=1".to_string()),
            ..Default::default()
        };

        let options = portal_options(&config);
        assert_eq!(options.timeout, Duration::from_millis(1500));
        assert_eq!(options.session_cookie.as_deref(), Some("sessionid=1"));
        assert_eq!(options.booking_url, config.booking_url);
    }

    #[tokio::test]
    async fn test_dry_run_sink_accepts() {
        let accepted = DryRunSink.reserve(&SessionId::from("42")).await.unwrap();
        assert!(accepted);
    }
}
