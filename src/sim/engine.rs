//! Tick driver.
//!
//! # State machine
//!
//! ```text
//!            start()                     pause() / run completes
//! STOPPED ───────────▶ RUNNING ─────────────────────────────▶ STOPPED
//!    ▲                                                          │
//!    └───────────────────── reset(): time = 0 ◀─────────────────┘
//! ```
//!
//! The driver owns simulated time. An external trigger (timer, event loop,
//! test loop) calls [`SimulationEngine::tick`]; calls must be serialized.

use tracing::{debug, info};

use super::report;
use super::SimulationListener;
use crate::error::SchedError;
use crate::models::{ProcessSpec, Tick};
use crate::scheduler::{Scheduler, SchedulerConfig};

/// Drives a [`Scheduler`] one tick at a time and reports to a listener.
///
/// # Example
/// ```
/// use sjf_sched::models::ProcessSpec;
/// use sjf_sched::scheduler::SjfPriorityScheduler;
/// use sjf_sched::sim::{SimulationEngine, TraceRecorder};
///
/// let mut engine = SimulationEngine::new(SjfPriorityScheduler::new(), TraceRecorder::new());
/// engine
///     .load_workload(vec![ProcessSpec::new("P1").with_burst(2)])
///     .unwrap();
///
/// engine.start();
/// while engine.is_running() {
///     engine.tick();
/// }
/// assert_eq!(engine.listener().running_ids(), vec![Some("P1"), Some("P1")]);
/// assert_eq!(engine.listener().finished_count(), 1);
/// ```
#[derive(Debug)]
pub struct SimulationEngine<S: Scheduler, L: SimulationListener> {
    scheduler: S,
    listener: L,
    time: Tick,
    running: bool,
    finish_reported: bool,
}

impl<S: Scheduler, L: SimulationListener> SimulationEngine<S, L> {
    /// Wraps an already initialized scheduler. The driver starts stopped at time 0.
    pub fn new(scheduler: S, listener: L) -> Self {
        Self {
            scheduler,
            listener,
            time: 0,
            running: false,
            finish_reported: false,
        }
    }

    /// Replaces the scheduler configuration.
    pub fn configure(&mut self, config: SchedulerConfig) -> Result<(), SchedError> {
        self.scheduler.configure(config)
    }

    /// Replaces the workload and resets the driver.
    pub fn load_workload(&mut self, specs: Vec<ProcessSpec>) -> Result<(), SchedError> {
        self.scheduler.load_workload(specs)?;
        self.reset();
        Ok(())
    }

    /// Stops, rewinds to time 0 and re-initializes the scheduler.
    pub fn reset(&mut self) {
        self.running = false;
        self.time = 0;
        self.finish_reported = false;
        self.scheduler.reset();
        info!(
            processes = self.scheduler.processes().len(),
            "simulation reset"
        );
    }

    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            info!(time = self.time, "simulation started");
        }
    }

    /// Stops ticking. The last tick's results stay as they are.
    pub fn pause(&mut self) {
        if self.running {
            self.running = false;
            info!(time = self.time, "simulation paused");
        }
    }

    /// Executes one tick if running.
    ///
    /// The tick that observes completion stops the driver and emits the
    /// summary and the finished notification instead of stepping.
    pub fn tick(&mut self) {
        if !self.running {
            return;
        }

        if self.scheduler.is_finished() {
            self.running = false;
            if !self.finish_reported {
                self.finish_reported = true;
                self.report_finished();
            }
            return;
        }

        let time = self.time;
        let running = self.scheduler.step(time).cloned();
        let snapshot = self.scheduler.snapshot();
        let message = report::tick_message(time, running.as_ref());
        debug!(time, running = running.as_ref().map(|p| p.id()), "tick");

        self.listener.on_time_advanced(time, running, snapshot);
        self.listener.on_log_event(&message);
        self.time += 1;
    }

    /// Starts and ticks until the run completes. Returns the number of
    /// ticks executed.
    pub fn run_to_completion(&mut self) -> Tick {
        let from = self.time;
        self.start();
        while self.running {
            self.tick();
        }
        self.time - from
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Index of the next tick to execute.
    pub fn current_time(&self) -> Tick {
        self.time
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    pub fn into_parts(self) -> (S, L) {
        (self.scheduler, self.listener)
    }

    fn report_finished(&mut self) {
        for line in report::summary_lines(self.scheduler.processes()) {
            self.listener.on_log_event(&line);
        }
        self.listener.on_simulation_finished();
        info!(ticks = self.time, "simulation run finished");
    }
}
