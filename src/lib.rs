//! Deterministic single-CPU scheduling model.
//!
//! Given a process list and a policy (FCFS, non-preemptive SJF,
//! non-preemptive Priority or Round Robin), [`simulate`] produces the full
//! timeline plus per-process completion records and aggregate metrics.
//!
//! ```rust
//! use sched_model::{simulate, Policy, Process, ProcessId, Quantum};
//!
//! let processes = vec![
//!     Process::new(ProcessId(1), "P1", 0, 4, 1).unwrap(),
//!     Process::new(ProcessId(2), "P2", 1, 3, 2).unwrap(),
//! ];
//! let result = simulate(&processes, Policy::RoundRobin { quantum: Quantum::parse("2") });
//! assert_eq!(result.total_duration(), 7);
//! ```

pub mod core;
pub mod scheduler;
pub mod sim;

pub use crate::core::{check, Violation};
pub use scheduler::{Policy, Quantum, Scheduler};
pub use sim::{
    compare, simulate, CompletionRecord, Metrics, Process, ProcessId, ProcessSet,
    ScheduleSegment, SimulationResult,
};
