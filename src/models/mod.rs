//! Process domain models.
//!
//! | type | role |
//! |------|------|
//! | [`ProcessSpec`] | Static attributes supplied by a workload source |
//! | [`ProcessRecord`] | Spec plus runtime state owned by a scheduler |
//! | [`ProcessState`] | NEW → READY → RUNNING ⇄ READY → FINISHED |

mod process;

pub use process::{Priority, ProcessRecord, ProcessSpec, ProcessState, Tick};
