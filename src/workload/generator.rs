//! Random workload generation.
//!
//! The random source is passed in explicitly, so a seeded generator
//! reproduces the same workloads run after run.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::SchedError;
use crate::models::{Priority, ProcessSpec, Tick};

/// Parameters for random workload generation. All ranges are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkloadParams {
    /// Number of processes per workload.
    pub count: usize,
    /// Arrivals are drawn from `0..=max_arrival`.
    pub max_arrival: Tick,
    pub min_burst: Tick,
    pub max_burst: Tick,
    pub min_priority: Priority,
    pub max_priority: Priority,
}

impl WorkloadParams {
    /// Creates parameters for `count` processes with default ranges.
    pub fn new(count: usize) -> Self {
        Self {
            count,
            ..Default::default()
        }
    }

    /// Sets the latest possible arrival tick.
    pub fn with_max_arrival(mut self, max_arrival: Tick) -> Self {
        self.max_arrival = max_arrival;
        self
    }

    /// Sets the burst range.
    pub fn with_burst_range(mut self, min: Tick, max: Tick) -> Self {
        self.min_burst = min;
        self.max_burst = max;
        self
    }

    /// Sets the priority range.
    pub fn with_priority_range(mut self, min: Priority, max: Priority) -> Self {
        self.min_priority = min;
        self.max_priority = max;
        self
    }

    /// Checks that every range is non-empty and yields valid processes.
    pub fn validate(&self) -> Result<(), SchedError> {
        let invalid = |msg: String| -> Result<(), SchedError> {
            Err(SchedError::InvalidParameters(msg))
        };

        if self.max_arrival < 0 {
            return invalid(format!("max_arrival must be >= 0, got {}", self.max_arrival));
        }
        if self.min_burst < 1 {
            return invalid(format!("min_burst must be >= 1, got {}", self.min_burst));
        }
        if self.min_burst > self.max_burst {
            return invalid(format!(
                "burst range is empty: {}..={}",
                self.min_burst, self.max_burst
            ));
        }
        if self.min_priority < 0 {
            return invalid(format!(
                "min_priority must be >= 0, got {}",
                self.min_priority
            ));
        }
        if self.min_priority > self.max_priority {
            return invalid(format!(
                "priority range is empty: {}..={}",
                self.min_priority, self.max_priority
            ));
        }
        Ok(())
    }
}

impl Default for WorkloadParams {
    fn default() -> Self {
        Self {
            count: 5,
            max_arrival: 10,
            min_burst: 1,
            max_burst: 10,
            min_priority: 0,
            max_priority: 5,
        }
    }
}

/// Generates random process sets with ids `P1..Pn`.
#[derive(Debug, Clone)]
pub struct RandomWorkloadGenerator<R: Rng = StdRng> {
    rng: R,
}

impl RandomWorkloadGenerator<StdRng> {
    /// Deterministic generator for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomWorkloadGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Draws one workload.
    pub fn generate(&mut self, params: &WorkloadParams) -> Result<Vec<ProcessSpec>, SchedError> {
        params.validate()?;
        let specs = (1..=params.count)
            .map(|i| {
                ProcessSpec::new(format!("P{i}"))
                    .with_arrival(self.rng.random_range(0..=params.max_arrival))
                    .with_burst(self.rng.random_range(params.min_burst..=params.max_burst))
                    .with_priority(
                        self.rng
                            .random_range(params.min_priority..=params.max_priority),
                    )
            })
            .collect();
        Ok(specs)
    }
}
