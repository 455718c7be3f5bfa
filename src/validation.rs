//! Input validation for workloads.
//!
//! Checks the structural integrity of a process set before any simulation
//! state is created. Detects:
//! - Empty IDs
//! - Duplicate IDs
//! - Non-positive burst times
//! - Negative arrival times
//! - Negative priorities

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{ProcessRecord, ProcessSpec};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// A process has an empty ID.
    EmptyId,
    /// Two processes share the same ID.
    DuplicateId,
    /// Burst time is zero or negative.
    NonPositiveBurst,
    /// Arrival time is before tick 0.
    NegativeArrival,
    /// Base priority is below 0.
    NegativePriority,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validates a workload.
///
/// Checks, per process:
/// 1. ID is non-empty
/// 2. ID is unique within the set
/// 3. Burst time > 0
/// 4. Arrival time >= 0
/// 5. Priority >= 0
///
/// An empty workload is valid.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_workload(specs: &[ProcessSpec]) -> ValidationResult {
    check_specs(specs)
}

/// Validates already-built records by their static attributes.
///
/// Same checks as [`validate_workload`].
pub fn validate_records(records: &[ProcessRecord]) -> ValidationResult {
    check_specs(records.iter().map(ProcessRecord::spec))
}

fn check_specs<'a, I>(specs: I) -> ValidationResult
where
    I: IntoIterator<Item = &'a ProcessSpec>,
{
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for (position, spec) in specs.into_iter().enumerate() {
        if spec.id.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyId,
                format!("Process at position {position} has an empty ID"),
            ));
        } else if !ids.insert(spec.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate process ID: {}", spec.id),
            ));
        }

        if spec.burst_time <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveBurst,
                format!(
                    "Process '{}' has non-positive burst time {}",
                    spec.id, spec.burst_time
                ),
            ));
        }

        if spec.arrival_time < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeArrival,
                format!(
                    "Process '{}' has negative arrival time {}",
                    spec.id, spec.arrival_time
                ),
            ));
        }

        if spec.priority < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativePriority,
                format!(
                    "Process '{}' has negative priority {}",
                    spec.id, spec.priority
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
