use court_booker_orchestrator::{SinkError, SourceError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PortalError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("portal rejected credentials (status {status})")]
    Unauthorized { status: u16 },

    #[error("portal returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid session cookie: {0}")]
    InvalidCookie(String),

    #[error("unexpected payload: {0}")]
    Payload(String),
}

impl From<serde_json::Error> for PortalError {
    fn from(e: serde_json::Error) -> Self {
        PortalError::Payload(e.to_string())
    }
}

impl From<PortalError> for SourceError {
    fn from(e: PortalError) -> Self {
        match e {
            PortalError::Unauthorized { .. } | PortalError::InvalidCookie(_) => {
                SourceError::Authentication(e.to_string())
            }
            PortalError::Payload(msg) => SourceError::Payload(msg),
            PortalError::Http(_) | PortalError::Status { .. } => {
                SourceError::Transport(e.to_string())
            }
        }
    }
}

impl From<PortalError> for SinkError {
    fn from(e: PortalError) -> Self {
        match e {
            PortalError::Payload(msg) => SinkError::Payload(msg),
            other => SinkError::Transport(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_maps_to_authentication_failure() {
        let err: SourceError = PortalError::Unauthorized { status: 403 }.into();
        assert!(matches!(err, SourceError::Authentication(_)));
    }

    #[test]
    fn test_payload_error_keeps_message() {
        let err: SinkError = PortalError::Payload("not json".to_string()).into();
        match err {
            SinkError::Payload(msg) => assert_eq!(msg, "not json"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
