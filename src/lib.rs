//! Discrete-tick CPU scheduling simulator.
//!
//! Simulates a single CPU running a workload of processes under a hybrid
//! shortest-job-first / priority policy, with optional preemption and aging.
//! Time advances in integer ticks; at most one process runs per tick.
//!
//! # Modules
//!
//! - **`models`**: Process definitions (`ProcessSpec`) and their runtime
//!   record (`ProcessRecord`, `ProcessState`)
//! - **`dispatching`**: Ranking rules and the sequential `RuleEngine` that
//!   orders ready processes (priority, then remaining time, then arrival)
//! - **`scheduler`**: The `Scheduler` trait, `SjfPriorityScheduler`, its
//!   configuration and completion statistics
//! - **`sim`**: `SimulationEngine` driver, listener contract and report lines
//! - **`workload`**: Random workload generation and the load-test harness
//! - **`validation`**: Workload integrity checks (ids, bursts, arrivals)
//!
//! # Example
//!
//! ```
//! use sjf_sched::models::ProcessSpec;
//! use sjf_sched::scheduler::{Scheduler, SchedulerConfig, SjfPriorityScheduler};
//!
//! let mut scheduler = SjfPriorityScheduler::with_config(SchedulerConfig::default()).unwrap();
//! scheduler
//!     .load_workload(vec![
//!         ProcessSpec::new("A").with_arrival(0).with_burst(5).with_priority(2),
//!         ProcessSpec::new("B").with_arrival(1).with_burst(3).with_priority(0),
//!     ])
//!     .unwrap();
//!
//! let mut trace = Vec::new();
//! let mut time = 0;
//! while !scheduler.is_finished() {
//!     trace.push(scheduler.step(time).map(|p| p.id().to_string()));
//!     time += 1;
//! }
//! assert_eq!(trace[1].as_deref(), Some("B"));
//! assert_eq!(time, 8);
//! ```
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Sec. 2.4
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod dispatching;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod sim;
pub mod validation;
pub mod workload;

pub use error::{ConfigError, SchedError};
