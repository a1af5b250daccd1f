use std::collections::VecDeque;

use super::{EnqueueReason, Quantum, Scheduler, SimCtx, TaskId, Ticks};

/// Round Robin over a single FIFO with a fixed quantum.
///
/// The driver admits tasks that arrived during a slice before it hands the
/// preempted task back, so newcomers land ahead of it in the queue.
#[derive(Debug)]
pub struct RoundRobinScheduler {
    queue: VecDeque<TaskId>,
    quantum: Quantum,
}

impl RoundRobinScheduler {
    pub fn new(quantum: Quantum) -> Self {
        Self {
            queue: VecDeque::new(),
            quantum,
        }
    }
}

impl Scheduler for RoundRobinScheduler {
    fn name(&self) -> &'static str {
        "rr"
    }

    fn enqueue(&mut self, _ctx: &SimCtx, task: TaskId, _reason: EnqueueReason) {
        debug_assert!(!self.queue.contains(&task), "Task {task} already queued");
        self.queue.push_back(task);
    }

    fn dispatch(&mut self, _ctx: &SimCtx) -> Option<TaskId> {
        self.queue.pop_front()
    }

    fn slice(&self, ctx: &SimCtx, task: TaskId) -> Ticks {
        ctx.task(task).remaining.min(self.quantum.get())
    }
}
