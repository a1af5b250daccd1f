use std::collections::VecDeque;

use super::{EnqueueReason, Scheduler, SimCtx, TaskId};

/// First-Come-First-Served. Tasks are admitted in (arrival, input order),
/// so a plain FIFO reproduces a stable sort by arrival time.
#[derive(Debug, Default)]
pub struct FcfsScheduler {
    queue: VecDeque<TaskId>,
}

impl FcfsScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for FcfsScheduler {
    fn name(&self) -> &'static str {
        "fcfs"
    }

    fn enqueue(&mut self, _ctx: &SimCtx, task: TaskId, reason: EnqueueReason) {
        debug_assert_eq!(reason, EnqueueReason::Arrival, "FCFS never preempts");
        self.queue.push_back(task);
    }

    fn dispatch(&mut self, _ctx: &SimCtx) -> Option<TaskId> {
        self.queue.pop_front()
    }
}
