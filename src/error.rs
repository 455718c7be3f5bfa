//! Error types for configuration and workload loading.
//!
//! Errors only surface from mutating entry points (`configure`,
//! `load_workload`, workload generation). Once a run starts, stepping is
//! infallible.

use thiserror::Error;

use crate::validation::ValidationError;

/// Scheduler configuration error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Aging interval must be at least one tick.
    #[error("aging interval must be positive, got {0}")]
    NonPositiveAgingInterval(i64),

    /// Configuration text could not be parsed.
    #[error("configuration parsing error: {0}")]
    Parse(String),
}

/// Unified error type for the crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchedError {
    /// Rejected scheduler configuration.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Rejected workload; carries every problem found.
    #[error("invalid workload:\n{}", format_validation_errors(.0))]
    Workload(Vec<ValidationError>),

    /// Rejected workload-generation parameters.
    #[error("invalid workload parameters: {0}")]
    InvalidParameters(String),
}

impl From<Vec<ValidationError>> for SchedError {
    fn from(errors: Vec<ValidationError>) -> Self {
        SchedError::Workload(errors)
    }
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {}", e.message))
        .collect::<Vec<_>>()
        .join("\n")
}
