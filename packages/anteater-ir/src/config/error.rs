//! Configuration error types. Fatal at start-up (spec §7).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for '{field}': {value} is not in range {min}..={max}")]
    OutOfRange {
        field: String,
        value: String,
        min: String,
        max: String,
    },

    #[error("severity override names unknown rule '{rule_id}'")]
    UnknownRule { rule_id: String },

    #[error("invalid exclude glob '{pattern}': {reason}")]
    InvalidGlob { pattern: String, reason: String },

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
