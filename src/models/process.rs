//! Process model.
//!
//! A process is a unit of CPU work: it arrives at some tick, needs a fixed
//! number of CPU ticks (its burst), and carries a base priority.
//!
//! Static attributes live in [`ProcessSpec`]; [`ProcessRecord`] wraps a spec
//! with the runtime state mutated by a scheduler while a run is active.
//!
//! # Reference
//! Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5

use serde::{Deserialize, Serialize};

/// Discrete simulated time (one tick = one unit of CPU time).
pub type Tick = i64;

/// Scheduling priority. Lower = more urgent.
pub type Priority = i32;

/// Lifecycle state of a simulated process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessState {
    /// Created, not yet arrived.
    #[default]
    New,
    /// Arrived and waiting for the CPU.
    Ready,
    /// Occupying the CPU.
    Running,
    /// All burst ticks consumed.
    Finished,
}

/// Static description of a process, as supplied by a workload source.
///
/// Nothing here changes while a simulation runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSpec {
    /// Unique process identifier.
    pub id: String,
    /// Tick at which the process becomes eligible to run.
    pub arrival_time: Tick,
    /// Total CPU ticks required.
    pub burst_time: Tick,
    /// Base priority (lower = more urgent).
    pub priority: Priority,
}

impl ProcessSpec {
    /// Creates a spec arriving at tick 0 with burst 1 and priority 0.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            arrival_time: 0,
            burst_time: 1,
            priority: 0,
        }
    }

    /// Sets the arrival tick.
    pub fn with_arrival(mut self, arrival_time: Tick) -> Self {
        self.arrival_time = arrival_time;
        self
    }

    /// Sets the burst time.
    pub fn with_burst(mut self, burst_time: Tick) -> Self {
        self.burst_time = burst_time;
        self
    }

    /// Sets the base priority.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }
}

/// Runtime state of one simulated process.
///
/// Runtime fields are only mutated by the crate's schedulers. Clones are
/// fully independent, which is what snapshots hand out to listeners.
///
/// # Invariants
/// - `remaining_time == 0` iff `state == Finished`
/// - `finish_time` is set iff `state == Finished`
/// - `effective_priority <= priority`, equal right after [`reset`](Self::reset)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRecord {
    spec: ProcessSpec,
    remaining_time: Tick,
    effective_priority: Priority,
    state: ProcessState,
    start_time: Option<Tick>,
    finish_time: Option<Tick>,
    accumulated_waiting: Tick,
}

impl ProcessRecord {
    /// Creates a fresh record in state `New`.
    pub fn new(spec: ProcessSpec) -> Self {
        let remaining_time = spec.burst_time;
        let effective_priority = spec.priority;
        Self {
            spec,
            remaining_time,
            effective_priority,
            state: ProcessState::New,
            start_time: None,
            finish_time: None,
            accumulated_waiting: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.spec.id
    }

    pub fn arrival_time(&self) -> Tick {
        self.spec.arrival_time
    }

    pub fn burst_time(&self) -> Tick {
        self.spec.burst_time
    }

    /// Base priority as loaded.
    pub fn base_priority(&self) -> Priority {
        self.spec.priority
    }

    pub fn spec(&self) -> &ProcessSpec {
        &self.spec
    }

    pub fn remaining_time(&self) -> Tick {
        self.remaining_time
    }

    /// Base priority minus aging boosts, floored at 0.
    pub fn effective_priority(&self) -> Priority {
        self.effective_priority
    }

    pub fn state(&self) -> ProcessState {
        self.state
    }

    /// First tick this process occupied the CPU.
    pub fn start_time(&self) -> Option<Tick> {
        self.start_time
    }

    /// Tick right after the last tick of execution.
    pub fn finish_time(&self) -> Option<Tick> {
        self.finish_time
    }

    /// Consecutive READY ticks since the last dispatch. Drives aging only.
    pub fn accumulated_waiting(&self) -> Tick {
        self.accumulated_waiting
    }

    pub fn is_finished(&self) -> bool {
        self.remaining_time <= 0
    }

    /// `finish - arrival`, or 0 while unfinished.
    pub fn turnaround_time(&self) -> Tick {
        match self.finish_time {
            Some(finish) => finish - self.spec.arrival_time,
            None => 0,
        }
    }

    /// `turnaround - burst`, or 0 while unfinished.
    pub fn waiting_time(&self) -> Tick {
        match self.finish_time {
            Some(_) => self.turnaround_time() - self.spec.burst_time,
            None => 0,
        }
    }

    /// Restores the runtime state to what [`new`](Self::new) produces.
    pub(crate) fn reset(&mut self) {
        self.remaining_time = self.spec.burst_time;
        self.effective_priority = self.spec.priority;
        self.state = ProcessState::New;
        self.start_time = None;
        self.finish_time = None;
        self.accumulated_waiting = 0;
    }

    pub(crate) fn set_state(&mut self, state: ProcessState) {
        self.state = state;
    }

    /// Moves the process onto the CPU at `time`.
    pub(crate) fn dispatch(&mut self, time: Tick) {
        self.state = ProcessState::Running;
        self.accumulated_waiting = 0;
        if self.start_time.is_none() {
            self.start_time = Some(time);
        }
    }

    pub(crate) fn record_waiting_tick(&mut self) {
        self.accumulated_waiting += 1;
    }

    /// One aging step. Returns `false` when already at priority 0.
    pub(crate) fn improve_priority(&mut self) -> bool {
        if self.effective_priority > 0 {
            self.effective_priority -= 1;
            true
        } else {
            false
        }
    }

    /// Consumes the tick at `time`. Returns `true` if this finished the process.
    pub(crate) fn execute_tick(&mut self, time: Tick) -> bool {
        if self.remaining_time <= 0 {
            return false;
        }
        self.remaining_time -= 1;
        if self.remaining_time == 0 {
            self.state = ProcessState::Finished;
            self.finish_time = Some(time + 1);
            true
        } else {
            false
        }
    }
}

impl From<ProcessSpec> for ProcessRecord {
    fn from(spec: ProcessSpec) -> Self {
        Self::new(spec)
    }
}
