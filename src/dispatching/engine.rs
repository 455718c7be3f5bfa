//! Rule engine for multi-key dispatching.
//!
//! Composes dispatching rules into a lexicographic ordering: the first rule
//! whose scores differ decides, later rules break ties.
//!
//! # Reference
//! Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

use std::cmp::Ordering;
use std::sync::Arc;

use super::{rules, DispatchingRule};
use crate::models::ProcessRecord;

/// A composable, sequential rule engine.
///
/// # Example
/// ```
/// use std::cmp::Ordering;
/// use sjf_sched::dispatching::RuleEngine;
/// use sjf_sched::models::{ProcessRecord, ProcessSpec};
///
/// let engine = RuleEngine::sjf_with_priority();
/// let short = ProcessRecord::new(ProcessSpec::new("short").with_burst(2).with_priority(1));
/// let long = ProcessRecord::new(ProcessSpec::new("long").with_burst(9).with_priority(1));
/// assert_eq!(engine.compare(&short, &long), Ordering::Less);
/// ```
#[derive(Clone)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn DispatchingRule>>,
}

impl RuleEngine {
    /// Creates an empty rule engine. With no rules every pair compares equal.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// The hybrid SJF-with-priority ordering:
    /// effective priority, then remaining time, then arrival time.
    pub fn sjf_with_priority() -> Self {
        Self::new()
            .with_rule(rules::EffectivePriority)
            .with_tie_breaker(rules::ShortestRemaining)
            .with_tie_breaker(rules::EarliestArrival)
    }

    /// Adds a primary rule.
    pub fn with_rule<R: DispatchingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Alias of [`with_rule`](Self::with_rule).
    ///
    /// Rules are compared in insertion order, so every rule after the first
    /// is a tie-breaker.
    pub fn with_tie_breaker<R: DispatchingRule + 'static>(self, rule: R) -> Self {
        self.with_rule(rule)
    }

    /// Names of the configured rules, in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Three-way comparison. `Less` means `a` should run before `b`.
    pub fn compare(&self, a: &ProcessRecord, b: &ProcessRecord) -> Ordering {
        for rule in &self.rules {
            match rule.evaluate(a).cmp(&rule.evaluate(b)) {
                Ordering::Equal => continue,
                decided => return decided,
            }
        }
        Ordering::Equal
    }

    /// Whether `a` ranks strictly ahead of `b`.
    pub fn is_better(&self, a: &ProcessRecord, b: &ProcessRecord) -> bool {
        self.compare(a, b) == Ordering::Less
    }

    /// Returns the index of the best candidate.
    ///
    /// On a full tie the earliest candidate in iteration order wins, so the
    /// result is deterministic for a given candidate order.
    pub fn select_best<'a, I>(&self, candidates: I) -> Option<usize>
    where
        I: IntoIterator<Item = (usize, &'a ProcessRecord)>,
    {
        let mut best: Option<(usize, &ProcessRecord)> = None;
        for (idx, process) in candidates {
            match best {
                Some((_, current)) if !self.is_better(process, current) => {}
                _ => best = Some((idx, process)),
            }
        }
        best.map(|(idx, _)| idx)
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::sjf_with_priority()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rule_names())
            .finish()
    }
}
