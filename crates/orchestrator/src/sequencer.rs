use court_booker_types::{DateKey, Layout, SessionId, SlotAssignment, TimeOfDay};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::ports::ActionSink;

/// Why an entry produced no reservation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    AlreadyHeld,
    Unassigned,
}

/// Result of one layout entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReservationOutcome {
    /// Facility accepted the reservation
    Reserved { hour: TimeOfDay, session_id: SessionId },

    /// Facility answered but declined
    Rejected { hour: TimeOfDay, session_id: SessionId },

    /// Sink could not complete the call
    Failed {
        hour: TimeOfDay,
        session_id: SessionId,
        error: String,
    },

    /// No side effect for this hour
    Skipped { hour: TimeOfDay, reason: SkipReason },
}

impl ReservationOutcome {
    pub fn hour(&self) -> &TimeOfDay {
        match self {
            ReservationOutcome::Reserved { hour, .. }
            | ReservationOutcome::Rejected { hour, .. }
            | ReservationOutcome::Failed { hour, .. }
            | ReservationOutcome::Skipped { hour, .. } => hour,
        }
    }

    pub fn is_attempt(&self) -> bool {
        !matches!(self, ReservationOutcome::Skipped { .. })
    }

    pub fn is_reserved(&self) -> bool {
        matches!(self, ReservationOutcome::Reserved { .. })
    }
}

/// Overall result of sequencing one layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    /// Every attempted reservation was accepted
    Complete,

    /// Some attempts were accepted, some were not
    Partial,

    /// Attempts were made and none was accepted
    Failed,

    /// The layout had nothing to reserve
    NothingToReserve,
}

/// Per-entry outcomes, in layout order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceReport {
    pub outcomes: Vec<ReservationOutcome>,
}

impl SequenceReport {
    pub fn attempted(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_attempt()).count()
    }

    pub fn reserved(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_reserved()).count()
    }

    pub fn unsuccessful(&self) -> usize {
        self.attempted() - self.reserved()
    }

    pub fn status(&self) -> BookingStatus {
        match (self.attempted(), self.reserved()) {
            (0, _) => BookingStatus::NothingToReserve,
            (attempted, reserved) if reserved == attempted => BookingStatus::Complete,
            (_, 0) => BookingStatus::Failed,
            _ => BookingStatus::Partial,
        }
    }
}

/// Reserves the sessions of a layout one at a time
///
/// Each reservation is awaited before the next starts: the facility session
/// behind the sink must not be used concurrently.
pub struct BookingSequencer {
    sink: Arc<dyn ActionSink>,
}

impl BookingSequencer {
    pub fn new(sink: Arc<dyn ActionSink>) -> Self {
        Self { sink }
    }

    /// Attempt every `Reserve` entry of `layout` in order
    ///
    /// A rejected or failed reservation is recorded and the remaining
    /// entries are still attempted.
    pub async fn execute(&self, layout: &Layout) -> SequenceReport {
        let mut outcomes = Vec::with_capacity(layout.len());

        for entry in &layout.entries {
            let hour = entry.hour.clone();

            let outcome = match &entry.assignment {
                SlotAssignment::Reserve(session_id) => {
                    self.reserve(&layout.date, hour, session_id).await
                }
                SlotAssignment::AlreadyHeld => {
                    debug!(date = %layout.date, hour = %hour, "Already booked, skipping");
                    ReservationOutcome::Skipped {
                        hour,
                        reason: SkipReason::AlreadyHeld,
                    }
                }
                SlotAssignment::Unassigned => {
                    debug!(date = %layout.date, hour = %hour, "No court assigned, skipping");
                    ReservationOutcome::Skipped {
                        hour,
                        reason: SkipReason::Unassigned,
                    }
                }
            };

            outcomes.push(outcome);
        }

        SequenceReport { outcomes }
    }

    async fn reserve(
        &self,
        date: &DateKey,
        hour: TimeOfDay,
        session_id: &SessionId,
    ) -> ReservationOutcome {
        match self.sink.reserve(session_id).await {
            Ok(true) => {
                info!(date = %date, hour = %hour, session_id = %session_id, "Court reserved");
                ReservationOutcome::Reserved {
                    hour,
                    session_id: session_id.clone(),
                }
            }
            Ok(false) => {
                warn!(
                    date = %date,
                    hour = %hour,
                    session_id = %session_id,
                    "Reservation rejected by facility"
                );
                ReservationOutcome::Rejected {
                    hour,
                    session_id: session_id.clone(),
                }
            }
            Err(e) => {
                warn!(
                    date = %date,
                    hour = %hour,
                    session_id = %session_id,
                    error = %e,
                    "Reservation failed"
                );
                ReservationOutcome::Failed {
                    hour,
                    session_id: session_id.clone(),
                    error: e.to_string(),
                }
            }
        }
    }
}
