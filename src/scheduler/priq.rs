use super::{EnqueueReason, Scheduler, SimCtx, TaskId};
use crate::core::{ReadyPriq, SelectKey};

/// Non-preemptive priority scheduling. Lower numbers are more urgent; ties
/// go to the earlier arrival, then to input order.
#[derive(Debug, Default)]
pub struct PriqScheduler {
    ready: ReadyPriq,
}

impl PriqScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for PriqScheduler {
    fn name(&self) -> &'static str {
        "priority"
    }

    fn enqueue(&mut self, ctx: &SimCtx, task: TaskId, reason: EnqueueReason) {
        debug_assert_eq!(reason, EnqueueReason::Arrival, "Priority is non-preemptive");
        let task = ctx.task(task);
        self.ready.push(SelectKey::new(i128::from(task.priority), task));
    }

    fn dispatch(&mut self, _ctx: &SimCtx) -> Option<TaskId> {
        self.ready.pop()
    }
}
