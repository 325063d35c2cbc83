//! Configuration validation

use crate::schedule::ScheduleEntry;
use crate::{AppConfig, ConfigError, Result};

/// Validation error details
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate the entire application configuration
///
/// Every problem is collected so a broken file can be fixed in one pass.
pub fn validate_config(config: &AppConfig) -> Result<()> {
    let mut errors = Vec::new();

    // Portal
    for (field, url) in [
        ("portal.sessions_url", &config.portal.sessions_url),
        ("portal.booking_url", &config.portal.booking_url),
    ] {
        if let Err(e) = validate_url(url) {
            errors.push(ValidationError::new(field, e));
        }
    }

    if config.portal.sessions_window == 0 {
        errors.push(ValidationError::new(
            "portal.sessions_window",
            "must be greater than 0",
        ));
    }

    if config.portal.timeout_ms == 0 {
        errors.push(ValidationError::new(
            "portal.timeout_ms",
            "must be greater than 0",
        ));
    }

    if let Some(cookie) = &config.portal.session_cookie {
        if cookie.trim().is_empty() {
            errors.push(ValidationError::new(
                "portal.session_cookie",
                "must not be empty when set",
            ));
        }
    }

    // Schedule
    for (index, line) in config.schedule.entries.iter().enumerate() {
        if let Err(e) = line.parse::<ScheduleEntry>() {
            errors.push(ValidationError::new(
                format!("schedule.entries[{index}]"),
                e.to_string(),
            ));
        }
    }

    // Logging
    if let Err(e) = validate_log_level(&config.logging.level) {
        errors.push(e);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        let error_messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        Err(ConfigError::ValidationError(error_messages.join("; ")))
    }
}

/// Validate URL format
pub fn validate_url(url: &str) -> std::result::Result<(), String> {
    if url.is_empty() {
        return Err("URL cannot be empty".to_string());
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err("URL must start with http:// or https://".to_string());
    }

    Ok(())
}

/// Validate log level
fn validate_log_level(level: &str) -> std::result::Result<(), ValidationError> {
    match level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ValidationError::new(
            "logging.level",
            format!(
                "invalid log level '{level}', must be one of: trace, debug, info, warn, error"
            ),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LoggingConfig, PortalConfig, ScheduleConfig};

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_validate_collects_every_error() {
        let config = AppConfig {
            portal: PortalConfig {
                booking_url: "ftp://example.com".to_string(),
                timeout_ms: 0,
                ..Default::default()
            },
            logging: LoggingConfig {
                level: "loud".to_string(),
                json: false,
            },
            ..Default::default()
        };

        match validate_config(&config) {
            Err(ConfigError::ValidationError(msg)) => {
                assert!(msg.contains("portal.booking_url"));
                assert!(msg.contains("portal.timeout_ms"));
                assert!(msg.contains("logging.level"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_schedule_entries() {
        let config = AppConfig {
            schedule: ScheduleConfig {
                path: None,
                entries: vec!["Mon 18:00-20:00".to_string(), "Funday 18:00-19:00".to_string()],
            },
            ..Default::default()
        };

        match validate_config(&config) {
            Err(ConfigError::ValidationError(msg)) => {
                assert!(msg.contains("schedule.entries[1]"));
                assert!(!msg.contains("schedule.entries[0]"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_empty_cookie() {
        let config = AppConfig {
            portal: PortalConfig {
                session_cookie: Some("  ".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };

        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("https://example.com").is_ok());
        assert!(validate_url("http://localhost:8080").is_ok());

        assert!(validate_url("").is_err());
        assert!(validate_url("not-a-url").is_err());
        assert!(validate_url("ftp://example.com").is_err());
    }
}
