//! Human-readable log lines for the driver.

use crate::models::{ProcessRecord, Tick};
use crate::scheduler::SimulationStats;

/// Header of the per-process summary table.
pub const SUMMARY_HEADER: &str = "process|priority|arrival|burst|finish|waiting|turnaround";

/// Log line for one tick.
///
/// `running` reflects the state after the tick, so `remaining` has already
/// been decremented.
pub fn tick_message(time: Tick, running: Option<&ProcessRecord>) -> String {
    match running {
        Some(p) => format!(
            "t={time}: running {} (priority={}, remaining={})",
            p.id(),
            p.effective_priority(),
            p.remaining_time()
        ),
        None => format!("t={time}: CPU idle"),
    }
}

/// Lines describing a completed run: banner, averages, and one table row
/// per process sorted by id.
pub fn summary_lines(processes: &[ProcessRecord]) -> Vec<String> {
    let stats = SimulationStats::from_processes(processes);
    let mut lines = Vec::with_capacity(processes.len() + 3);
    lines.push("simulation finished".to_string());
    lines.push(format!(
        "average waiting={:.3}, average turnaround={:.3}",
        stats.avg_waiting_time, stats.avg_turnaround_time
    ));
    lines.push(SUMMARY_HEADER.to_string());

    let mut sorted: Vec<&ProcessRecord> = processes.iter().collect();
    sorted.sort_by(|a, b| a.id().cmp(b.id()));
    for p in sorted {
        lines.push(format!(
            "{}|{}|{}|{}|{}|{}|{}",
            p.id(),
            p.base_priority(),
            p.arrival_time(),
            p.burst_time(),
            p.finish_time().unwrap_or(0),
            p.waiting_time(),
            p.turnaround_time()
        ));
    }
    lines
}
