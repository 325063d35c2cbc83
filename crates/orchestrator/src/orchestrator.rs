use court_booker_resolver::LayoutResolver;
use court_booker_types::{BookingRequest, LayoutTier, TimeSlotGrid, UnavailableSlot};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::ports::{ActionSink, AvailabilitySource, SourceError};
use crate::sequencer::{BookingSequencer, BookingStatus, SequenceReport};

/// Builder error
#[derive(Debug, Error)]
pub enum BuilderError {
    #[error("missing required field: {field}")]
    MissingField { field: String },
}

/// Builder for BookingOrchestrator
#[derive(Default)]
pub struct BookingOrchestratorBuilder {
    source: Option<Arc<dyn AvailabilitySource>>,
    sink: Option<Arc<dyn ActionSink>>,
}

impl BookingOrchestratorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the availability source
    pub fn with_source(mut self, source: Arc<dyn AvailabilitySource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Set the reservation sink
    pub fn with_sink(mut self, sink: Arc<dyn ActionSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Build the BookingOrchestrator, validating that all required fields are set
    pub fn build(self) -> Result<BookingOrchestrator, BuilderError> {
        let source = self.source.ok_or_else(|| BuilderError::MissingField {
            field: "source".to_string(),
        })?;

        let sink = self.sink.ok_or_else(|| BuilderError::MissingField {
            field: "sink".to_string(),
        })?;

        Ok(BookingOrchestrator::new(source, sink))
    }
}

/// What happened to one booking request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    /// A requested slot is not offered by the facility
    Unavailable(UnavailableSlot),

    /// Slots are offered but no court layout could be assigned
    NoLayoutFound,

    /// A layout was resolved and its reservations were attempted
    Attempted {
        tier: LayoutTier,
        report: SequenceReport,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestReport {
    pub request: BookingRequest,
    pub outcome: RequestOutcome,
}

impl RequestReport {
    /// `None` unless reservations were attempted
    pub fn status(&self) -> Option<BookingStatus> {
        match &self.outcome {
            RequestOutcome::Attempted { report, .. } => Some(report.status()),
            _ => None,
        }
    }
}

/// Outcome of one orchestrator run, one report per request in request order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub requests: Vec<RequestReport>,
}

impl RunReport {
    pub fn reserved(&self) -> usize {
        self.sequence_reports().map(SequenceReport::reserved).sum()
    }

    pub fn unsuccessful(&self) -> usize {
        self.sequence_reports()
            .map(SequenceReport::unsuccessful)
            .sum()
    }

    pub fn unavailable(&self) -> usize {
        self.requests
            .iter()
            .filter(|r| matches!(r.outcome, RequestOutcome::Unavailable(_)))
            .count()
    }

    pub fn without_layout(&self) -> usize {
        self.requests
            .iter()
            .filter(|r| matches!(r.outcome, RequestOutcome::NoLayoutFound))
            .count()
    }

    /// True when some reservations went through and others did not, or some
    /// requests could not be served at all
    pub fn is_partial(&self) -> bool {
        let served = self.reserved() > 0;
        let missed = self.unsuccessful() > 0 || self.unavailable() > 0 || self.without_layout() > 0;
        served && missed
    }

    fn sequence_reports(&self) -> impl Iterator<Item = &SequenceReport> {
        self.requests.iter().filter_map(|r| match &r.outcome {
            RequestOutcome::Attempted { report, .. } => Some(report),
            _ => None,
        })
    }
}

/// Drives a booking run: one grid fetch, then every request in order
pub struct BookingOrchestrator {
    source: Arc<dyn AvailabilitySource>,
    sequencer: BookingSequencer,
    resolver: LayoutResolver,
}

impl BookingOrchestrator {
    /// Create a new builder for constructing a BookingOrchestrator
    pub fn builder() -> BookingOrchestratorBuilder {
        BookingOrchestratorBuilder::new()
    }

    pub fn new(source: Arc<dyn AvailabilitySource>, sink: Arc<dyn ActionSink>) -> Self {
        Self {
            source,
            sequencer: BookingSequencer::new(sink),
            resolver: LayoutResolver::new(),
        }
    }

    /// Fetch availability once and process every request against it
    ///
    /// Only a source failure aborts the run. Problems with individual
    /// requests are recorded in the report.
    pub async fn run(&self, requests: &[BookingRequest]) -> Result<RunReport, OrchestratorError> {
        info!(requests = requests.len(), "Starting bookings");

        let grid = self.source.fetch().await.map_err(|e| {
            error!(error = %e, "Failed to fetch court availability");
            OrchestratorError::Source(e)
        })?;

        info!(
            dates = grid.dates().count(),
            slots = grid.slot_count(),
            "Fetched court availability"
        );

        let report = self.run_with_grid(&grid, requests).await;

        info!(
            reserved = report.reserved(),
            unsuccessful = report.unsuccessful(),
            unavailable = report.unavailable(),
            without_layout = report.without_layout(),
            "Bookings complete"
        );

        Ok(report)
    }

    /// Process requests against an already fetched grid
    pub async fn run_with_grid(&self, grid: &TimeSlotGrid, requests: &[BookingRequest]) -> RunReport {
        let mut reports = Vec::with_capacity(requests.len());

        for request in requests {
            let outcome = self.process_request(grid, request).await;
            reports.push(RequestReport {
                request: request.clone(),
                outcome,
            });
        }

        RunReport { requests: reports }
    }

    /// Resolve and book a single request
    pub async fn process_request(&self, grid: &TimeSlotGrid, request: &BookingRequest) -> RequestOutcome {
        info!(date = %request.date, hours = ?request.hours, "Starting booking courts");

        if let Err(unavailable) = grid.check_offered(&request.date, &request.hours) {
            warn!(date = %request.date, reason = %unavailable, "Cannot book courts");
            return RequestOutcome::Unavailable(unavailable);
        }

        let Some(layout) = self.resolver.resolve(grid, &request.date, &request.hours) else {
            warn!(date = %request.date, hours = ?request.hours, "No available courts found");
            return RequestOutcome::NoLayoutFound;
        };

        info!(
            date = %request.date,
            tier = %layout.tier,
            reservations = layout.reservation_count(),
            "Resolved court layout"
        );

        let report = self.sequencer.execute(&layout).await;

        info!(
            date = %request.date,
            status = ?report.status(),
            reserved = report.reserved(),
            attempted = report.attempted(),
            "Booking complete"
        );

        RequestOutcome::Attempted {
            tier: layout.tier,
            report,
        }
    }
}

/// Orchestrator errors
#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("availability source failed: {0}")]
    Source(#[from] SourceError),
}
