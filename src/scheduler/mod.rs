//! Scheduling policies, configuration, and run statistics.
//!
//! # Algorithm
//!
//! [`SjfPriorityScheduler`] is a hybrid of priority scheduling and
//! shortest-job-first: ready processes are ranked by effective priority,
//! then remaining time, then arrival. Aging lowers the effective priority of
//! processes that keep waiting, which bounds starvation.
//!
//! # Statistics
//!
//! [`SimulationStats`] computes waiting and turnaround metrics for a
//! process set.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

mod config;
mod sjf_priority;
mod stats;

pub use config::{SchedulerConfig, SchedulingMode, DEFAULT_AGING_INTERVAL};
pub use sjf_priority::SjfPriorityScheduler;
pub use stats::SimulationStats;

use crate::error::SchedError;
use crate::models::{ProcessRecord, ProcessSpec, Tick};

/// A tick-driven CPU scheduling policy.
///
/// The policy owns the canonical process records. Callers advance it with
/// [`step`](Scheduler::step) using tick indices 0, 1, 2, ... and read state
/// back through [`processes`](Scheduler::processes) or an owned
/// [`snapshot`](Scheduler::snapshot).
pub trait Scheduler {
    /// Current configuration.
    fn config(&self) -> &SchedulerConfig;

    /// Replaces the configuration. Takes effect from the next step; a
    /// rejected configuration leaves the previous one in place.
    fn configure(&mut self, config: SchedulerConfig) -> Result<(), SchedError>;

    /// Builds records from a workload and initializes them.
    ///
    /// Nothing changes if validation fails.
    fn load_workload(&mut self, specs: Vec<ProcessSpec>) -> Result<(), SchedError> {
        self.initialize(specs.into_iter().map(ProcessRecord::new).collect())
    }

    /// Takes ownership of a process set, orders it by arrival (stable), and
    /// resets every runtime attribute. Must precede the first step.
    ///
    /// The set is validated first; a rejected set leaves the previous one
    /// in place.
    fn initialize(&mut self, processes: Vec<ProcessRecord>) -> Result<(), SchedError>;

    /// Re-initializes the current process set for a fresh run.
    fn reset(&mut self);

    /// Advances one tick at `time` and returns the process that occupied the
    /// CPU during it, or `None` when idle or already finished.
    fn step(&mut self, time: Tick) -> Option<&ProcessRecord>;

    /// Whether every process has finished.
    fn is_finished(&self) -> bool;

    /// Read-view of all processes, in arrival order.
    fn processes(&self) -> &[ProcessRecord];

    /// Independent deep copy of all processes.
    fn snapshot(&self) -> Vec<ProcessRecord> {
        self.processes().to_vec()
    }
}
