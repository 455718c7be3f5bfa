//! Run statistics.
//!
//! Computes standard CPU scheduling performance indicators from a
//! process set.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Turnaround | finish - arrival |
//! | Waiting | turnaround - burst |
//! | Makespan | Latest finish time |
//! | Utilization | Total burst / makespan |
//!
//! Unfinished processes count as 0 for waiting and turnaround.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2: Scheduling Criteria

use serde::{Deserialize, Serialize};

use crate::models::{ProcessRecord, Tick};

/// Waiting/turnaround statistics of one run.
///
/// All time values are in ticks.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SimulationStats {
    /// Number of processes.
    pub process_count: usize,
    /// Number of finished processes.
    pub completed_count: usize,
    /// Mean waiting time.
    pub avg_waiting_time: f64,
    /// Mean turnaround time.
    pub avg_turnaround_time: f64,
    /// Largest waiting time of any process.
    pub max_waiting_time: Tick,
    /// Largest turnaround time of any process.
    pub max_turnaround_time: Tick,
    /// Sum of burst times.
    pub total_burst_time: Tick,
    /// Latest finish time (0 if nothing finished).
    pub makespan: Tick,
    /// Busy fraction of the CPU over the makespan (0.0..1.0).
    pub cpu_utilization: f64,
}

impl SimulationStats {
    /// Computes statistics over a process set.
    pub fn from_processes(processes: &[ProcessRecord]) -> Self {
        let n = processes.len();
        if n == 0 {
            return Self::default();
        }

        let mut total_wait: Tick = 0;
        let mut total_turn: Tick = 0;
        let mut max_wait: Tick = 0;
        let mut max_turn: Tick = 0;
        let mut total_burst: Tick = 0;
        let mut makespan: Tick = 0;
        let mut completed = 0;

        for p in processes {
            let w = p.waiting_time();
            let t = p.turnaround_time();
            total_wait += w;
            total_turn += t;
            max_wait = max_wait.max(w);
            max_turn = max_turn.max(t);
            total_burst += p.burst_time();

            if let Some(finish) = p.finish_time() {
                completed += 1;
                makespan = makespan.max(finish);
            }
        }

        let cpu_utilization = if makespan == 0 {
            0.0
        } else {
            // Only meaningful once every process finished.
            (total_burst as f64 / makespan as f64).min(1.0)
        };

        Self {
            process_count: n,
            completed_count: completed,
            avg_waiting_time: total_wait as f64 / n as f64,
            avg_turnaround_time: total_turn as f64 / n as f64,
            max_waiting_time: max_wait,
            max_turnaround_time: max_turn,
            total_burst_time: total_burst,
            makespan,
            cpu_utilization,
        }
    }

    /// Whether every process finished.
    pub fn is_complete(&self) -> bool {
        self.completed_count == self.process_count
    }
}
