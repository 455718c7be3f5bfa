//! Simulation driver and listener contract.
//!
//! ```text
//! WorkloadSource ─▶ Scheduler::load_workload ─▶ SimulationEngine::tick (repeated)
//!                                                  │ Scheduler::step(time)
//!                                                  ▼
//!                                   SimulationListener (owned snapshots)
//! ```
//!
//! The driver is single-threaded and performs no locking; a host that ticks
//! it from a timer must serialize calls.

mod engine;
mod listener;
pub mod report;

pub use engine::SimulationEngine;
pub use listener::{SimulationListener, TickRecord, TraceRecorder};
