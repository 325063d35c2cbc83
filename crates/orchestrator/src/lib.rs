pub mod orchestrator;
pub mod ports;
pub mod sequencer;


// Re-export main types
pub use orchestrator::{
    BookingOrchestrator, BookingOrchestratorBuilder, BuilderError, OrchestratorError,
    RequestOutcome, RequestReport, RunReport,
};
pub use ports::{ActionSink, AvailabilitySource, SinkError, SourceError};
pub use sequencer::{BookingSequencer, BookingStatus, ReservationOutcome, SequenceReport, SkipReason};
