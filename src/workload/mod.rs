//! Workload sources and the load-test harness.
//!
//! - [`RandomWorkloadGenerator`]: seedable random process sets
//! - [`LoadTester`]: runs many workloads to completion and averages results

mod generator;

pub use generator::{RandomWorkloadGenerator, WorkloadParams};
pub use load_test::{LoadTestSummary, LoadTester};
