//! Core configuration structures for the court booker

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Booking portal connection
    #[serde(default)]
    pub portal: PortalConfig,

    /// Weekly booking schedule
    #[serde(default)]
    pub schedule: ScheduleConfig,

    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Booking portal configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalConfig {
    /// Endpoint listing court sessions
    #[serde(default = "default_sessions_url")]
    pub sessions_url: String,

    /// Endpoint booking one session
    #[serde(default = "default_booking_url")]
    pub booking_url: String,

    /// How far ahead the session listing reaches, as the portal counts it
    #[serde(default = "default_sessions_window")]
    pub sessions_window: u32,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// `Cookie` header of a logged-in portal session
    #[serde(default)]
    pub session_cookie: Option<String>,
}

/// Which courts to book each week
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Schedule file with one `<Weekday> HH:MM-HH:MM` entry per line
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Entries given inline, booked after those from `path`
    #[serde(default)]
    pub entries: Vec<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

// Default value functions
fn default_sessions_url() -> String {
    "https://www.sit.no/ibooking-api/callback/get-sessions-court-multiple".to_string()
}

fn default_booking_url() -> String {
    "https://www.sit.no/ibooking-api/callback/book-session".to_string()
}

fn default_sessions_window() -> u32 {
    3
}

fn default_timeout_ms() -> u64 {
    30000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            sessions_url: default_sessions_url(),
            booking_url: default_booking_url(),
            sessions_window: default_sessions_window(),
            timeout_ms: default_timeout_ms(),
            session_cookie: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.portal.sessions_window, 3);
        assert_eq!(config.portal.timeout_ms, 30000);
        assert!(config.portal.session_cookie.is_none());
        assert!(config.schedule.entries.is_empty());
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.portal.booking_url, default_booking_url());
        assert!(config.schedule.path.is_none());
    }

    #[test]
    fn test_retired_portal_keys_are_ignored() {
        let config: AppConfig = toml::from_str(
            r#"
            [portal]
            facility_url = "https://www.sit.no/trening/hall"
            timeout_ms = 5000
            "#,
        )
        .unwrap();
        assert_eq!(config.portal.timeout_ms, 5000);
        assert_eq!(config.portal.sessions_url, default_sessions_url());
    }
}
