//! Error types.
//!
//! - `AppError`: binary-boundary error carrying a process exit code
//! - `FetchError`: a single indicator could not be read (always contained)
//! - `ConfigError`: the indicator table is malformed (fatal at startup)

use thiserror::Error;

use crate::domain::Dimension;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::new(2, format!("Configuration error: {err}"))
    }
}

/// Any reason an indicator reading could not be obtained.
///
/// The observation builder swallows these and substitutes the indicator's
/// fallback, so they never reach the caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("data source is offline")]
    Offline,

    #[error("no series mapped for indicator '{0}'")]
    Unmapped(String),

    #[error("request failed: {0}")]
    Request(String),

    #[error("provider returned status {0}")]
    Status(u16),

    #[error("malformed payload: {0}")]
    Parse(String),

    #[error("no observations returned for series '{0}'")]
    Empty(String),

    #[error("series '{series_id}' needs {needed} observations, got {got}")]
    InsufficientHistory {
        series_id: String,
        needed: usize,
        got: usize,
    },

    #[error("non-finite reading {0}")]
    NonFinite(f64),
}

/// Malformed indicator table.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("indicator table is empty")]
    EmptyTable,

    #[error("duplicate indicator id '{0}'")]
    DuplicateId(String),

    #[error("duplicate indicator name '{name}' in dimension {dimension}")]
    DuplicateName { dimension: Dimension, name: String },

    #[error("indicator '{id}' has an invalid scoring rule: {reason}")]
    InvalidRule { id: String, reason: String },

    #[error("indicator '{id}' has an invalid fallback: {reason}")]
    InvalidFallback { id: String, reason: String },

    #[error("indicator '{id}' has an invalid series mapping: {reason}")]
    InvalidSeries { id: String, reason: String },

    #[error("indicator '{0}' has an empty id or name")]
    MissingName(String),

    #[error("failed to read indicator table '{path}': {reason}")]
    Read { path: String, reason: String },

    #[error("invalid indicator table JSON: {0}")]
    Json(String),
}
