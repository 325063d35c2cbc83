//! Configuration management for the court booker
//!
//! This crate provides:
//! - Config files in TOML, YAML or JSON
//! - Environment variable overrides
//! - Config validation
//! - Weekly schedule parsing into booking requests

mod config;
mod loader;
pub mod schedule;
mod validation;

pub use config::*;
pub use loader::*;
pub use schedule::{load_schedule_file, parse_schedule, ScheduleEntry, ScheduleError};
pub use validation::*;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    LoadError(String),

    #[error("Config validation failed: {0}")]
    ValidationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config library error: {0}")]
    ConfigLibError(#[from] ::config::ConfigError),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Schedule error: {0}")]
    ScheduleError(#[from] ScheduleError),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
