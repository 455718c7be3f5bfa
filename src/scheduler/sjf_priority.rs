//! Shortest-job-first with priority, preemption and aging.
//!
//! # Algorithm (per tick)
//!
//! 1. Admission: NEW processes with `arrival <= time` become READY.
//! 2. Aging: READY processes whose waiting counter is a positive multiple
//!    of the interval gain one priority step.
//! 3. Non-preemptive mode keeps a running process on the CPU (skip to 5).
//! 4. Selection: the best READY process by (effective priority, remaining
//!    time, arrival). It takes the CPU if the CPU is free, or in preemptive
//!    mode if it ranks strictly ahead of the running process.
//! 5. Every process still READY records a waiting tick.
//! 6. The running process consumes the tick; at zero remaining it finishes
//!    at `time + 1`.
//! 7. The finished flag is recomputed.
//!
//! # Complexity
//! O(n) per tick for n processes.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3.2-5.3.3

use tracing::{debug, trace};

use super::{Scheduler, SchedulerConfig};
use crate::dispatching::RuleEngine;
use crate::error::SchedError;
use crate::models::{ProcessRecord, ProcessState, Tick};
use crate::validation::validate_records;

/// Hybrid SJF/priority scheduler.
///
/// The running process is tracked by index into the owned process list.
///
/// # Example
///
/// ```
/// use sjf_sched::models::ProcessSpec;
/// use sjf_sched::scheduler::{Scheduler, SchedulerConfig, SchedulingMode, SjfPriorityScheduler};
///
/// let config = SchedulerConfig::default().with_mode(SchedulingMode::Preemptive);
/// let mut scheduler = SjfPriorityScheduler::with_config(config).unwrap();
/// scheduler
///     .load_workload(vec![
///         ProcessSpec::new("A").with_arrival(0).with_burst(5).with_priority(2),
///         ProcessSpec::new("B").with_arrival(1).with_burst(3).with_priority(0),
///     ])
///     .unwrap();
///
/// assert_eq!(scheduler.step(0).map(|p| p.id().to_string()), Some("A".into()));
/// assert_eq!(scheduler.step(1).map(|p| p.id().to_string()), Some("B".into()));
/// ```
#[derive(Debug, Clone)]
pub struct SjfPriorityScheduler {
    config: SchedulerConfig,
    rules: RuleEngine,
    processes: Vec<ProcessRecord>,
    current: Option<usize>,
    time: Tick,
    finished: bool,
}

impl SjfPriorityScheduler {
    /// Creates a scheduler with the default configuration and no processes.
    ///
    /// An empty scheduler is already finished; stepping it is an idle no-op.
    pub fn new() -> Self {
        Self {
            config: SchedulerConfig::default(),
            rules: RuleEngine::sjf_with_priority(),
            processes: Vec::new(),
            current: None,
            time: 0,
            finished: true,
        }
    }

    /// Creates a scheduler with a validated configuration.
    pub fn with_config(config: SchedulerConfig) -> Result<Self, SchedError> {
        let mut scheduler = Self::new();
        scheduler.configure(config)?;
        Ok(scheduler)
    }

    /// Replaces the selection ordering.
    pub fn with_rule_engine(mut self, rules: RuleEngine) -> Self {
        self.rules = rules;
        self
    }

    /// The process currently holding the CPU.
    pub fn running(&self) -> Option<&ProcessRecord> {
        self.current.map(|idx| &self.processes[idx])
    }

    /// Last tick index passed to `step`.
    pub fn time(&self) -> Tick {
        self.time
    }

    fn admit(&mut self, time: Tick) {
        for p in &mut self.processes {
            if p.state() == ProcessState::New && p.arrival_time() <= time {
                p.set_state(ProcessState::Ready);
                trace!(process = p.id(), time, "admitted");
            }
        }
    }

    fn apply_aging(&mut self) {
        let interval = self.config.aging_interval;
        for p in &mut self.processes {
            let waited = p.accumulated_waiting();
            if p.state() == ProcessState::Ready
                && waited > 0
                && waited % interval == 0
                && p.improve_priority()
            {
                trace!(
                    process = p.id(),
                    waited,
                    priority = p.effective_priority(),
                    "aged"
                );
            }
        }
    }

    fn select_candidate(&self) -> Option<usize> {
        self.rules.select_best(
            self.processes
                .iter()
                .enumerate()
                .filter(|(_, p)| p.state() == ProcessState::Ready),
        )
    }

    fn should_preempt(&self, candidate: usize) -> bool {
        match self.current {
            None => true,
            Some(running) => self
                .rules
                .is_better(&self.processes[candidate], &self.processes[running]),
        }
    }

    fn switch_to(&mut self, candidate: usize, time: Tick) {
        if let Some(prev) = self.current.take() {
            self.processes[prev].set_state(ProcessState::Ready);
            debug!(
                process = self.processes[prev].id(),
                by = self.processes[candidate].id(),
                time,
                "preempted"
            );
        }
        let next = &mut self.processes[candidate];
        next.dispatch(time);
        debug!(process = next.id(), time, "dispatched");
        self.current = Some(candidate);
    }

    fn record_waiting(&mut self) {
        for p in &mut self.processes {
            if p.state() == ProcessState::Ready {
                p.record_waiting_tick();
            }
        }
    }

    fn execute_current(&mut self, time: Tick) {
        let Some(idx) = self.current else {
            return;
        };
        let p = &mut self.processes[idx];
        if p.execute_tick(time) {
            debug!(process = p.id(), finish = time + 1, "finished");
            self.current = None;
        }
    }

    fn update_finished(&mut self) {
        self.finished = self.processes.iter().all(ProcessRecord::is_finished);
    }
}

impl Default for SjfPriorityScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for SjfPriorityScheduler {
    fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    fn configure(&mut self, config: SchedulerConfig) -> Result<(), SchedError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    fn initialize(&mut self, mut processes: Vec<ProcessRecord>) -> Result<(), SchedError> {
        validate_records(&processes)?;
        processes.sort_by_key(ProcessRecord::arrival_time);
        self.processes = processes;
        self.reset();
        Ok(())
    }

    fn reset(&mut self) {
        for p in &mut self.processes {
            p.reset();
        }
        self.current = None;
        self.time = 0;
        self.update_finished();
    }

    fn step(&mut self, time: Tick) -> Option<&ProcessRecord> {
        self.time = time;
        if self.finished {
            return None;
        }

        self.admit(time);
        if self.config.aging_enabled {
            self.apply_aging();
        }

        let keeps_cpu = self.current.is_some() && !self.config.is_preemptive();
        if !keeps_cpu {
            let candidate = self.select_candidate();
            if candidate.is_none() && self.current.is_none() {
                trace!(time, "cpu idle");
                self.update_finished();
                return None;
            }
            if let Some(candidate) = candidate {
                if self.should_preempt(candidate) {
                    self.switch_to(candidate, time);
                }
            }
        }

        self.record_waiting();

        let ran = self.current;
        self.execute_current(time);
        self.update_finished();

        ran.map(|idx| &self.processes[idx])
    }

    fn is_finished(&self) -> bool {
        self.finished
    }

    fn processes(&self) -> &[ProcessRecord] {
        &self.processes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatching::rules;
    use crate::models::ProcessSpec;
    use crate::scheduler::SchedulingMode;
    use crate::validation::ValidationErrorKind;
    use proptest::prelude::*;

    fn spec(id: &str, arrival: i64, burst: i64, priority: i32) -> ProcessSpec {
        ProcessSpec::new(id)
            .with_arrival(arrival)
            .with_burst(burst)
            .with_priority(priority)
    }

    fn scheduler(config: SchedulerConfig, specs: Vec<ProcessSpec>) -> SjfPriorityScheduler {
        let mut s = SjfPriorityScheduler::with_config(config).unwrap();
        s.load_workload(specs).unwrap();
        s
    }

    fn step_id(s: &mut SjfPriorityScheduler, time: Tick) -> Option<String> {
        s.step(time).map(|p| p.id().to_string())
    }

    /// Runs to completion and returns the per-tick trace.
    fn run_trace(s: &mut SjfPriorityScheduler) -> Vec<Option<String>> {
        let mut trace = Vec::new();
        let mut time = 0;
        while !s.is_finished() {
            trace.push(step_id(s, time));
            time += 1;
        }
        trace
    }

    fn find<'a>(s: &'a SjfPriorityScheduler, id: &str) -> &'a ProcessRecord {
        s.processes().iter().find(|p| p.id() == id).unwrap()
    }

    #[test]
    fn test_preemptive_switches_to_higher_priority() {
        let mut s = scheduler(
            SchedulerConfig::default(),
            vec![spec("A", 0, 5, 2), spec("B", 1, 3, 0)],
        );
        assert_eq!(step_id(&mut s, 0).as_deref(), Some("A"));
        assert_eq!(step_id(&mut s, 1).as_deref(), Some("B"));
        assert_eq!(find(&s, "A").state(), ProcessState::Ready);
    }

    #[test]
    fn test_non_preemptive_keeps_current() {
        let config = SchedulerConfig::default().with_mode(SchedulingMode::NonPreemptive);
        let mut s = scheduler(config, vec![spec("A", 0, 5, 2), spec("B", 1, 3, 0)]);
        assert_eq!(step_id(&mut s, 0).as_deref(), Some("A"));
        assert_eq!(step_id(&mut s, 1).as_deref(), Some("A"));
    }

    #[test]
    fn test_preemptive_vs_non_preemptive_full_trace() {
        let specs = vec![spec("A", 0, 5, 2), spec("B", 1, 3, 0)];
        let mut pre = scheduler(SchedulerConfig::default(), specs.clone());
        let mut non = scheduler(
            SchedulerConfig::default().with_mode(SchedulingMode::NonPreemptive),
            specs,
        );

        let a = || Some("A".to_string());
        let b = || Some("B".to_string());
        assert_eq!(run_trace(&mut pre), vec![a(), b(), b(), b(), a(), a(), a(), a()]);
        assert_eq!(run_trace(&mut non), vec![a(), a(), a(), a(), a(), b(), b(), b()]);

        // A: finish 8, turnaround 8, waiting 3
        assert_eq!(find(&pre, "A").finish_time(), Some(8));
        assert_eq!(find(&pre, "A").waiting_time(), 3);
        // B: finish 8, arrival 1, turnaround 7, waiting 4
        assert_eq!(find(&non, "B").turnaround_time(), 7);
        assert_eq!(find(&non, "B").waiting_time(), 4);
    }

    #[test]
    fn test_aging_tie_does_not_preempt_until_strictly_better() {
        let config = SchedulerConfig::default().with_aging(1);
        let mut s = scheduler(config, vec![spec("LONG", 0, 5, 2), spec("WAITING", 0, 2, 5)]);

        assert_eq!(step_id(&mut s, 0).as_deref(), Some("LONG"));
        assert_eq!(find(&s, "WAITING").effective_priority(), 5);
        assert_eq!(step_id(&mut s, 1).as_deref(), Some("LONG"));
        assert_eq!(find(&s, "WAITING").effective_priority(), 4);
        assert_eq!(step_id(&mut s, 2).as_deref(), Some("LONG"));
        assert_eq!(find(&s, "WAITING").effective_priority(), 3);

        // Tick 3: WAITING reaches priority 2 but ties LONG on every key.
        assert_eq!(step_id(&mut s, 3).as_deref(), Some("LONG"));
        assert_eq!(find(&s, "WAITING").effective_priority(), 2);

        // Tick 4: priority 1 beats LONG outright.
        assert_eq!(step_id(&mut s, 4).as_deref(), Some("WAITING"));
        assert_eq!(find(&s, "WAITING").effective_priority(), 1);
        assert_eq!(find(&s, "LONG").effective_priority(), 2);
    }

    #[test]
    fn test_aging_disabled_never_boosts() {
        let mut s = scheduler(
            SchedulerConfig::default(),
            vec![spec("LONG", 0, 5, 2), spec("WAITING", 0, 2, 5)],
        );
        let trace = run_trace(&mut s);
        assert!(trace[..5].iter().all(|id| id.as_deref() == Some("LONG")));
        assert_eq!(find(&s, "WAITING").effective_priority(), 5);
    }

    #[test]
    fn test_aging_reboosts_periodically() {
        // WAITING sits behind a long urgent process for 9 ticks: boosts at 3, 6, 9.
        let config = SchedulerConfig::default().with_aging(3);
        let mut s = scheduler(config, vec![spec("HOG", 0, 10, 0), spec("WAITING", 0, 1, 9)]);
        for t in 0..10 {
            s.step(t);
        }
        assert_eq!(find(&s, "WAITING").effective_priority(), 6);
    }

    #[test]
    fn test_waiting_counter_resets_on_dispatch() {
        let mut s = scheduler(
            SchedulerConfig::default(),
            vec![spec("A", 0, 2, 1), spec("B", 0, 3, 1)],
        );
        s.step(0);
        s.step(1);
        assert_eq!(find(&s, "B").accumulated_waiting(), 2);
        s.step(2);
        assert_eq!(find(&s, "B").accumulated_waiting(), 0);
        assert_eq!(find(&s, "B").state(), ProcessState::Running);
    }

    #[test]
    fn test_sjf_tie_break_on_remaining_time() {
        let mut s = scheduler(
            SchedulerConfig::default(),
            vec![spec("long", 0, 4, 1), spec("short", 0, 2, 1)],
        );
        assert_eq!(step_id(&mut s, 0).as_deref(), Some("short"));
    }

    #[test]
    fn test_arrival_tie_break() {
        let mut s = scheduler(
            SchedulerConfig::default().with_mode(SchedulingMode::NonPreemptive),
            vec![spec("late", 2, 3, 1), spec("early", 0, 3, 1), spec("urgent", 0, 2, 0)],
        );
        assert_eq!(
            run_trace(&mut s),
            ["urgent", "urgent", "early", "early", "early", "late", "late", "late"]
                .iter()
                .map(|id| Some(id.to_string()))
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_equal_candidate_does_not_preempt() {
        let mut s = scheduler(
            SchedulerConfig::default(),
            vec![spec("first", 0, 3, 1), spec("second", 1, 2, 1)],
        );
        // At tick 1 both have priority 1 and 2 ticks left; first arrived earlier.
        assert_eq!(step_id(&mut s, 0).as_deref(), Some("first"));
        assert_eq!(step_id(&mut s, 1).as_deref(), Some("first"));
    }

    #[test]
    fn test_idle_until_arrival() {
        let mut s = scheduler(SchedulerConfig::default(), vec![spec("P1", 2, 1, 0)]);
        assert_eq!(step_id(&mut s, 0), None);
        assert_eq!(step_id(&mut s, 1), None);
        assert!(!s.is_finished());
        assert_eq!(step_id(&mut s, 2).as_deref(), Some("P1"));
        assert!(s.is_finished());

        let p = find(&s, "P1");
        assert_eq!(p.start_time(), Some(2));
        assert_eq!(p.finish_time(), Some(3));
        assert_eq!(p.waiting_time(), 0);
    }

    #[test]
    fn test_finishing_tick_returns_process() {
        let mut s = scheduler(SchedulerConfig::default(), vec![spec("P1", 0, 1, 0)]);
        assert_eq!(step_id(&mut s, 0).as_deref(), Some("P1"));
        assert!(s.running().is_none());
        assert!(s.is_finished());
    }

    #[test]
    fn test_step_after_finish_is_noop() {
        let mut s = scheduler(SchedulerConfig::default(), vec![spec("P1", 0, 1, 0)]);
        s.step(0);
        let before = s.snapshot();
        assert_eq!(step_id(&mut s, 1), None);
        assert_eq!(step_id(&mut s, 2), None);
        assert_eq!(s.snapshot(), before);
    }

    #[test]
    fn test_empty_workload_is_finished() {
        let mut s = SjfPriorityScheduler::new();
        assert!(s.is_finished());
        assert_eq!(step_id(&mut s, 0), None);

        s.load_workload(Vec::new()).unwrap();
        assert!(s.is_finished());
    }

    #[test]
    fn test_initialize_sorts_stably_by_arrival() {
        let mut s = SjfPriorityScheduler::new();
        s.initialize(
            vec![spec("c", 3, 1, 0), spec("a", 0, 1, 0), spec("b", 3, 1, 0), spec("d", 1, 1, 0)]
                .into_iter()
                .map(ProcessRecord::new)
                .collect(),
        )
        .unwrap();
        let ids: Vec<&str> = s.processes().iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec!["a", "d", "c", "b"]);
    }

    #[test]
    fn test_reset_reproduces_run() {
        let config = SchedulerConfig::default().with_aging(2);
        let specs = vec![spec("A", 0, 6, 3), spec("B", 1, 2, 4), spec("C", 2, 3, 1)];
        let mut s = scheduler(config, specs);

        let first = run_trace(&mut s);
        s.reset();
        assert!(!s.is_finished());
        assert!(s.processes().iter().all(|p| p.state() == ProcessState::New
            && p.effective_priority() == p.base_priority()));
        assert_eq!(run_trace(&mut s), first);
    }

    #[test]
    fn test_load_workload_rejects_invalid() {
        let mut s = scheduler(SchedulerConfig::default(), vec![spec("keep", 0, 1, 0)]);
        let err = s
            .load_workload(vec![spec("X", 0, 1, 0), spec("X", 0, 0, 0)])
            .unwrap_err();
        match err {
            SchedError::Workload(errors) => {
                assert!(errors.iter().any(|e| e.kind == ValidationErrorKind::DuplicateId));
                assert!(errors
                    .iter()
                    .any(|e| e.kind == ValidationErrorKind::NonPositiveBurst));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        // Previous workload untouched
        assert_eq!(s.processes().len(), 1);
        assert_eq!(s.processes()[0].id(), "keep");
    }

    #[test]
    fn test_initialize_rejects_invalid_records() {
        let mut s = scheduler(
            SchedulerConfig::default().with_mode(SchedulingMode::NonPreemptive),
            vec![spec("keep", 0, 1, 0)],
        );
        let records = vec![spec("X", 0, 0, 0), spec("Y", 0, 1, 0), spec("Y", 1, 1, 0)]
            .into_iter()
            .map(ProcessRecord::new)
            .collect();
        match s.initialize(records).unwrap_err() {
            SchedError::Workload(errors) => {
                assert!(errors
                    .iter()
                    .any(|e| e.kind == ValidationErrorKind::NonPositiveBurst));
                assert!(errors.iter().any(|e| e.kind == ValidationErrorKind::DuplicateId));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        // Previous set still runs to completion
        assert_eq!(s.processes().len(), 1);
        assert_eq!(run_trace(&mut s), vec![Some("keep".to_string())]);
    }

    #[test]
    fn test_non_preemptive_ages_while_cpu_is_held() {
        let config = SchedulerConfig::default()
            .with_mode(SchedulingMode::NonPreemptive)
            .with_aging(1);
        let mut s = scheduler(config, vec![spec("HOG", 0, 5, 0), spec("W", 0, 1, 5)]);
        for t in 0..5 {
            assert_eq!(step_id(&mut s, t).as_deref(), Some("HOG"));
        }

        let w = find(&s, "W");
        assert_eq!(w.state(), ProcessState::Ready);
        assert_eq!(w.accumulated_waiting(), 5);
        assert_eq!(w.effective_priority(), 1);
    }

    #[test]
    fn test_configure_rejects_and_keeps_previous() {
        let mut s = SjfPriorityScheduler::with_config(SchedulerConfig::default().with_aging(2))
            .unwrap();
        assert!(s.configure(SchedulerConfig::default().with_aging(0)).is_err());
        assert_eq!(s.config().aging_interval, 2);
        assert!(SjfPriorityScheduler::with_config(SchedulerConfig::default().with_aging(-1)).is_err());
    }

    #[test]
    fn test_configure_mid_run_applies_to_next_step() {
        let mut s = scheduler(
            SchedulerConfig::default().with_mode(SchedulingMode::NonPreemptive),
            vec![spec("A", 0, 5, 2), spec("B", 2, 3, 0)],
        );
        s.step(0);
        s.step(1);
        s.configure(SchedulerConfig::default()).unwrap();
        assert_eq!(step_id(&mut s, 2).as_deref(), Some("B"));
    }

    #[test]
    fn test_custom_rule_engine_fcfs() {
        let mut s = SjfPriorityScheduler::new()
            .with_rule_engine(RuleEngine::new().with_rule(rules::EarliestArrival));
        s.configure(SchedulerConfig::default().with_mode(SchedulingMode::NonPreemptive))
            .unwrap();
        s.load_workload(vec![spec("first", 0, 3, 9), spec("urgent", 1, 1, 0)])
            .unwrap();
        let trace = run_trace(&mut s);
        assert_eq!(trace[3].as_deref(), Some("urgent"));
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut s = scheduler(SchedulerConfig::default(), vec![spec("P1", 0, 3, 0)]);
        s.step(0);
        let snap = s.snapshot();
        s.step(1);
        assert_eq!(snap[0].remaining_time(), 2);
        assert_eq!(s.processes()[0].remaining_time(), 1);
    }

    fn arb_specs() -> impl Strategy<Value = Vec<ProcessSpec>> {
        prop::collection::vec((0i64..15, 1i64..8, 0i32..6), 0..8).prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (arrival, burst, priority))| {
                    spec(&format!("P{}", i + 1), arrival, burst, priority)
                })
                .collect()
        })
    }

    fn arb_config() -> impl Strategy<Value = SchedulerConfig> {
        (any::<bool>(), any::<bool>(), 1i64..5).prop_map(|(preemptive, aging, interval)| {
            let mode = if preemptive {
                SchedulingMode::Preemptive
            } else {
                SchedulingMode::NonPreemptive
            };
            SchedulerConfig::new(mode, aging, interval).unwrap()
        })
    }

    proptest! {
        #[test]
        fn prop_run_completes_with_exact_burst_attribution(
            specs in arb_specs(),
            config in arb_config(),
        ) {
            let mut s = scheduler(config, specs.clone());
            let mut last_priority: Vec<i32> =
                s.processes().iter().map(|p| p.effective_priority()).collect();
            let mut trace = Vec::new();
            let mut time = 0;

            while !s.is_finished() {
                let ran = step_id(&mut s, time);
                let running = s
                    .processes()
                    .iter()
                    .filter(|p| p.state() == ProcessState::Running)
                    .count();
                prop_assert!(running <= 1);

                for (p, last) in s.processes().iter().zip(last_priority.iter_mut()) {
                    prop_assert!(p.effective_priority() <= *last);
                    prop_assert!(p.effective_priority() <= p.base_priority());
                    prop_assert!(p.effective_priority() >= 0);
                    *last = p.effective_priority();
                }

                trace.push(ran);
                time += 1;
                prop_assert!(time < 500, "run did not terminate");
            }

            for spec in &specs {
                let p = find(&s, &spec.id);
                let ticks = trace
                    .iter()
                    .filter(|id| id.as_deref() == Some(spec.id.as_str()))
                    .count() as i64;
                prop_assert_eq!(ticks, spec.burst_time);
                prop_assert_eq!(p.remaining_time(), 0);
                prop_assert_eq!(p.state(), ProcessState::Finished);
                let finish = p.finish_time().unwrap();
                prop_assert!(finish > spec.arrival_time);
                prop_assert!(p.waiting_time() >= 0);
                prop_assert_eq!(p.waiting_time(), p.turnaround_time() - spec.burst_time);
                prop_assert!(p.start_time().unwrap() >= spec.arrival_time);
            }
        }

        #[test]
        fn prop_runs_are_deterministic(specs in arb_specs(), config in arb_config()) {
            let mut first = scheduler(config, specs.clone());
            let mut second = scheduler(config, specs);
            prop_assert_eq!(run_trace(&mut first), run_trace(&mut second));
            prop_assert_eq!(first.snapshot(), second.snapshot());
        }
    }
}
