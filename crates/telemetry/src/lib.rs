//! Log setup and run correlation for the court booker

mod tracing;

pub use crate::tracing::{init_tracing, ErrorContext, RunId, RunSpan, TracingError};
