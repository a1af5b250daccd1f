pub mod fcfs;
pub mod priq;
pub mod round_robin;
pub mod sjf;

use std::fmt;
use std::num::NonZeroU64;

use serde::Serialize;

use crate::core::{EnqueueReason, SimCtx, TaskId, Ticks};
pub use fcfs::FcfsScheduler;
pub use priq::PriqScheduler;
pub use round_robin::RoundRobinScheduler;
pub use sjf::SjfScheduler;

/// A scheduling policy plugged into [`crate::core::SchedCore`].
///
/// The driver owns the clock. A policy only decides which runnable task goes
/// next and for how long; it never sees tasks that have not arrived.
pub trait Scheduler {
    fn name(&self) -> &'static str;

    fn enqueue(&mut self, ctx: &SimCtx, task: TaskId, reason: EnqueueReason);

    fn dispatch(&mut self, ctx: &SimCtx) -> Option<TaskId>;

    // Non-preemptive unless overridden
    fn slice(&self, ctx: &SimCtx, task: TaskId) -> Ticks {
        ctx.task(task).remaining
    }
}

/// Round Robin time slice. Always at least one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Quantum(NonZeroU64);

impl Quantum {
    pub const MIN: Quantum = Quantum(NonZeroU64::MIN);

    pub fn new(ticks: NonZeroU64) -> Self {
        Self(ticks)
    }

    pub fn normalize(raw: i64) -> Self {
        u64::try_from(raw)
            .ok()
            .and_then(NonZeroU64::new)
            .map_or(Self::MIN, Self)
    }

    // Leading digits win; anything unparseable is one
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let unsigned = raw.strip_prefix('+').unwrap_or(raw);
        let digits_len = unsigned
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(unsigned.len());
        let digits = &unsigned[..digits_len];

        if digits.is_empty() {
            return Self::MIN;
        }
        match digits.parse::<u64>() {
            Ok(value) => NonZeroU64::new(value).map_or(Self::MIN, Self),
            // Overflowing digit runs are still a huge positive quantum
            Err(_) => Self(NonZeroU64::MAX),
        }
    }

    pub fn get(self) -> Ticks {
        self.0.get()
    }
}

impl Default for Quantum {
    fn default() -> Self {
        Self::normalize(2)
    }
}

impl fmt::Display for Quantum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "policy", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Policy {
    Fcfs,
    Sjf,
    Priority,
    #[serde(rename = "RR")]
    RoundRobin { quantum: Quantum },
}

impl Policy {
    pub fn all(quantum: Quantum) -> [Policy; 4] {
        [
            Policy::Fcfs,
            Policy::Sjf,
            Policy::Priority,
            Policy::RoundRobin { quantum },
        ]
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            Policy::Fcfs => "FCFS",
            Policy::Sjf => "SJF",
            Policy::Priority => "PRIORITY",
            Policy::RoundRobin { .. } => "RR",
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::Fcfs => write!(f, "First Come First Serve (FCFS)"),
            Policy::Sjf => write!(f, "Shortest Job First (SJF - Non Preemptive)"),
            Policy::Priority => write!(f, "Priority (Non Preemptive)"),
            Policy::RoundRobin { quantum } => write!(f, "Round Robin (RR, quantum {quantum})"),
        }
    }
}
