//! Listener contract between the simulation driver and its consumers.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::models::{ProcessRecord, Tick};

/// Receives driver notifications.
///
/// Every record handed over is an owned copy; the listener may keep or
/// mutate it without affecting the simulation.
pub trait SimulationListener {
    /// One tick was executed. `running` is the process that held the CPU
    /// during `time`, `snapshot` the state of every process after it.
    fn on_time_advanced(
        &mut self,
        time: Tick,
        running: Option<ProcessRecord>,
        snapshot: Vec<ProcessRecord>,
    );

    /// Informational log line, emitted for idle and busy ticks alike.
    fn on_log_event(&mut self, message: &str);

    /// The run completed. Fired once per run.
    fn on_simulation_finished(&mut self);
}

impl<L: SimulationListener + ?Sized> SimulationListener for &mut L {
    fn on_time_advanced(
        &mut self,
        time: Tick,
        running: Option<ProcessRecord>,
        snapshot: Vec<ProcessRecord>,
    ) {
        (**self).on_time_advanced(time, running, snapshot);
    }

    fn on_log_event(&mut self, message: &str) {
        (**self).on_log_event(message);
    }

    fn on_simulation_finished(&mut self) {
        (**self).on_simulation_finished();
    }
}

/// One entry of a run trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickRecord {
    pub time: Tick,
    /// Id of the process on the CPU, `None` when idle.
    pub running: Option<String>,
}

/// Listener that records everything it is told.
///
/// Keeps the full tick trace and the latest snapshot. Log lines can be
/// capped to the most recent `n`.
#[derive(Debug, Clone, Default)]
pub struct TraceRecorder {
    ticks: Vec<TickRecord>,
    logs: VecDeque<String>,
    log_capacity: Option<usize>,
    last_snapshot: Vec<ProcessRecord>,
    finished_count: usize,
}

impl TraceRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps only the most recent `capacity` log lines.
    pub fn with_log_capacity(mut self, capacity: usize) -> Self {
        self.log_capacity = Some(capacity);
        self
    }

    pub fn ticks(&self) -> &[TickRecord] {
        &self.ticks
    }

    /// Running id per tick, in tick order.
    pub fn running_ids(&self) -> Vec<Option<&str>> {
        self.ticks.iter().map(|t| t.running.as_deref()).collect()
    }

    pub fn logs(&self) -> impl Iterator<Item = &str> {
        self.logs.iter().map(String::as_str)
    }

    pub fn last_snapshot(&self) -> &[ProcessRecord] {
        &self.last_snapshot
    }

    /// How many finished notifications arrived.
    pub fn finished_count(&self) -> usize {
        self.finished_count
    }

    /// Forgets everything recorded so far.
    pub fn clear(&mut self) {
        self.ticks.clear();
        self.logs.clear();
        self.last_snapshot.clear();
        self.finished_count = 0;
    }
}

impl SimulationListener for TraceRecorder {
    fn on_time_advanced(
        &mut self,
        time: Tick,
        running: Option<ProcessRecord>,
        snapshot: Vec<ProcessRecord>,
    ) {
        self.ticks.push(TickRecord {
            time,
            running: running.map(|p| p.id().to_string()),
        });
        self.last_snapshot = snapshot;
    }

    fn on_log_event(&mut self, message: &str) {
        self.logs.push_back(message.to_string());
        if let Some(cap) = self.log_capacity {
            while self.logs.len() > cap {
                self.logs.pop_front();
            }
        }
    }

    fn on_simulation_finished(&mut self) {
        self.finished_count += 1;
    }
}
