//! Built-in dispatching rules.
//!
//! All rules read the *current* runtime state of a process, so their
//! scores move as the simulation advances (remaining time shrinks, aging
//! lowers the effective priority).
//!
//! # Score Convention
//! All rules return lower scores for processes that should run first.

use super::{DispatchingRule, RuleScore};
use crate::models::ProcessRecord;

/// Effective priority, after aging.
///
/// Lower numeric priority = more urgent.
#[derive(Debug, Clone, Copy)]
pub struct EffectivePriority;

impl DispatchingRule for EffectivePriority {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn evaluate(&self, process: &ProcessRecord) -> RuleScore {
        RuleScore::from(process.effective_priority())
    }

    fn description(&self) -> &'static str {
        "Effective Priority"
    }
}

/// Shortest Remaining Time.
///
/// The shortest-job-first key: prefers the process closest to completion.
///
/// # Reference
/// Smith (1956), optimal for minimizing mean flow time on a single machine.
#[derive(Debug, Clone, Copy)]
pub struct ShortestRemaining;

impl DispatchingRule for ShortestRemaining {
    fn name(&self) -> &'static str {
        "SRT"
    }

    fn evaluate(&self, process: &ProcessRecord) -> RuleScore {
        process.remaining_time()
    }

    fn description(&self) -> &'static str {
        "Shortest Remaining Time"
    }
}

/// First Come First Served.
#[derive(Debug, Clone, Copy)]
pub struct EarliestArrival;

impl DispatchingRule for EarliestArrival {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn evaluate(&self, process: &ProcessRecord) -> RuleScore {
        process.arrival_time()
    }

    fn description(&self) -> &'static str {
        "First Come First Served"
    }
}
