use court_booker_config::LoggingConfig;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Crates whose events follow the configured level; everything else logs warnings only
const CRATE_TARGET: &str = "court_booker";

/// Initialize the global subscriber from the logging configuration
///
/// `RUST_LOG` takes precedence over the configured level when set.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), TracingError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directives(&config.level)))
        .map_err(|e| TracingError::InitError(e.to_string()))?;

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = if config.json {
        registry
            .with(fmt::layer().with_target(true).with_level(true).json())
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(false).with_level(true))
            .try_init()
    };

    result.map_err(|e| TracingError::InitError(e.to_string()))
}

fn default_directives(level: &str) -> String {
    format!("warn,{CRATE_TARGET}={}", level.to_lowercase())
}

/// Correlation ID shared by every event of one booking run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunId(uuid::Uuid);

impl RunId {
    /// Generate a new run ID
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Get the run ID as a string
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Span context for one booking run
#[derive(Debug, Clone)]
pub struct RunSpan {
    pub run_id: RunId,
    pub requests: usize,
    pub dry_run: bool,
}

impl RunSpan {
    pub fn new(requests: usize, dry_run: bool) -> Self {
        Self {
            run_id: RunId::new(),
            requests,
            dry_run,
        }
    }

    /// Span carrying the run fields; attach it to the run future with
    /// `tracing::Instrument::instrument`
    pub fn span(&self) -> tracing::Span {
        tracing::info_span!(
            "booking_run",
            run_id = %self.run_id,
            requests = self.requests,
            dry_run = self.dry_run,
        )
    }
}

/// Log an error with run context before propagating it
pub trait ErrorContext {
    fn with_run_id(self, run_id: RunId) -> Self;
}

impl<T, E> ErrorContext for Result<T, E>
where
    E: std::fmt::Display,
{
    fn with_run_id(self, run_id: RunId) -> Self {
        self.map_err(|e| {
            tracing::error!(
                run_id = %run_id,
                error = %e,
                "booking run failed"
            );
            e
        })
    }
}

/// Tracing error types
#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    #[error("tracing initialization error: {0}")]
    InitError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_id_generation() {
        let id1 = RunId::new();
        let id2 = RunId::new();

        assert_ne!(id1, id2);
        assert_eq!(id1.as_str().len(), 36);
    }

    #[test]
    fn test_run_span_creation() {
        let span = RunSpan::new(3, true);

        assert_eq!(span.requests, 3);
        assert!(span.dry_run);
        let _entered = span.span().entered();
    }

    #[test]
    fn test_default_directives() {
        assert_eq!(default_directives("DEBUG"), "warn,court_booker=debug");
    }

    #[test]
    fn test_error_context_passes_error_through() {
        let result: Result<(), String> = Err("portal down".to_string());
        assert_eq!(result.with_run_id(RunId::new()), Err("portal down".to_string()));
    }

    #[test]
    fn test_init_twice_fails() {
        let config = LoggingConfig::default();
        let _ = init_tracing(&config);
        assert!(matches!(
            init_tracing(&config),
            Err(TracingError::InitError(_))
        ));
    }
}
