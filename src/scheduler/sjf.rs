use super::{EnqueueReason, Scheduler, SimCtx, TaskId};
use crate::core::{ReadyPriq, SelectKey};

/// Non-preemptive Shortest-Job-First: shortest burst, then earliest
/// arrival, then input order.
#[derive(Debug, Default)]
pub struct SjfScheduler {
    ready: ReadyPriq,
}

impl SjfScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for SjfScheduler {
    fn name(&self) -> &'static str {
        "sjf"
    }

    fn enqueue(&mut self, ctx: &SimCtx, task: TaskId, reason: EnqueueReason) {
        debug_assert_eq!(reason, EnqueueReason::Arrival, "SJF is non-preemptive");
        let task = ctx.task(task);
        self.ready
            .push(SelectKey::new(i128::from(task.burst_time), task));
    }

    fn dispatch(&mut self, _ctx: &SimCtx) -> Option<TaskId> {
        self.ready.pop()
    }
}
