//! Dispatching rules and the multi-key rule engine.
//!
//! A scheduler picks the next process by comparing candidates key by key:
//! the first rule that tells two processes apart decides, later rules only
//! break ties.
//!
//! # Usage
//!
//! ```
//! use sjf_sched::dispatching::{rules, RuleEngine};
//!
//! // Equivalent to RuleEngine::sjf_with_priority()
//! let engine = RuleEngine::new()
//!     .with_rule(rules::EffectivePriority)
//!     .with_tie_breaker(rules::ShortestRemaining)
//!     .with_tie_breaker(rules::EarliestArrival);
//! assert_eq!(engine.rule_names(), vec!["PRIORITY", "SRT", "FCFS"]);
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3
//! - Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

mod engine;
pub mod rules;

pub use engine::RuleEngine;

use crate::models::ProcessRecord;
use std::fmt::Debug;

/// Score returned by a dispatching rule.
///
/// Lower scores = higher priority (dispatched first).
pub type RuleScore = i64;

/// A dispatching rule that scores a process for selection.
///
/// # Score Convention
/// **Lower score = higher priority.**
pub trait DispatchingRule: Send + Sync + Debug {
    /// Rule name (e.g., "SRT", "PRIORITY").
    fn name(&self) -> &'static str;

    /// Scores a process in its current runtime state.
    fn evaluate(&self, process: &ProcessRecord) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
