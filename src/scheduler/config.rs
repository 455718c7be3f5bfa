//! Scheduler configuration.
//!
//! | option | effect |
//! |--------|--------|
//! | `mode` | Whether a better-ranked ready process may interrupt the running one |
//! | `aging_enabled` | Whether waiting ready processes receive periodic priority boosts |
//! | `aging_interval` | Waiting ticks between two boosts (must be positive) |

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::models::Tick;

/// Default number of waiting ticks between aging boosts.
pub const DEFAULT_AGING_INTERVAL: Tick = 5;

/// Preemption mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SchedulingMode {
    /// A strictly better ready process takes the CPU immediately.
    #[default]
    Preemptive,
    /// The running process keeps the CPU until it finishes.
    NonPreemptive,
}

/// Scheduler configuration.
///
/// Deserializes from partial input; missing fields take the defaults
/// (preemptive, aging off, interval 5).
///
/// # Example
/// ```
/// use sjf_sched::scheduler::{SchedulerConfig, SchedulingMode};
///
/// let config = SchedulerConfig::from_json(r#"{"mode": "NON_PREEMPTIVE", "aging_enabled": true}"#)
///     .unwrap();
/// assert_eq!(config.mode, SchedulingMode::NonPreemptive);
/// assert_eq!(config.aging_interval, 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Preemption mode.
    pub mode: SchedulingMode,
    /// Whether aging boosts are applied.
    pub aging_enabled: bool,
    /// Waiting ticks between boosts.
    pub aging_interval: Tick,
}

impl SchedulerConfig {
    /// Creates a validated configuration.
    pub fn new(
        mode: SchedulingMode,
        aging_enabled: bool,
        aging_interval: Tick,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            mode,
            aging_enabled,
            aging_interval,
        };
        config.validate()?;
        Ok(config)
    }

    /// Sets the preemption mode.
    pub fn with_mode(mut self, mode: SchedulingMode) -> Self {
        self.mode = mode;
        self
    }

    /// Enables aging with the given interval.
    pub fn with_aging(mut self, interval: Tick) -> Self {
        self.aging_enabled = true;
        self.aging_interval = interval;
        self
    }

    /// Disables aging. The interval is kept.
    pub fn without_aging(mut self) -> Self {
        self.aging_enabled = false;
        self
    }

    pub fn is_preemptive(&self) -> bool {
        self.mode == SchedulingMode::Preemptive
    }

    /// Rejects a non-positive aging interval, whether or not aging is enabled.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.aging_interval <= 0 {
            return Err(ConfigError::NonPositiveAgingInterval(self.aging_interval));
        }
        Ok(())
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            mode: SchedulingMode::Preemptive,
            aging_enabled: false,
            aging_interval: DEFAULT_AGING_INTERVAL,
        }
    }
}
