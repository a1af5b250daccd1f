use log::{debug, trace};

use super::{
    event::EnqueueReason,
    observer::Observer,
    state::{SimCtx, TaskId},
};
use crate::scheduler::Scheduler;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Selecting,
    Dispatching(TaskId),
    Idle,
    Done,
}

/// Drives one policy over one task set until every task completes.
pub struct SchedCore<S: Scheduler> {
    pub ctx: SimCtx,
    pub scheduler: S,
    observer: Observer,
}

impl<S: Scheduler> SchedCore<S> {
    pub fn new(ctx: SimCtx, scheduler: S) -> Self {
        Self {
            ctx,
            scheduler,
            observer: Observer::new(),
        }
    }

    pub fn run(mut self) -> SimCtx {
        let mut phase = Phase::Selecting;
        loop {
            let step = phase;
            let before = self.ctx.now;
            phase = match step {
                Phase::Selecting => self.select(),
                Phase::Idle => self.idle(),
                Phase::Dispatching(task) => self.dispatch(task),
                Phase::Done => break,
            };
            // Idle and dispatch steps must move the clock, or the loop could spin
            debug_assert!(
                step == Phase::Selecting || self.ctx.now > before,
                "{} made no progress at t={before} in {step:?}",
                self.scheduler.name()
            );
        }

        self.observer.finish(&self.ctx);
        debug!(
            "{}: {} tasks done at t={} after {} steps",
            self.scheduler.name(),
            self.ctx.tasks.len(),
            self.ctx.now,
            self.observer.steps()
        );
        self.ctx
    }

    fn select(&mut self) -> Phase {
        self.admit_arrivals();
        match self.scheduler.dispatch(&self.ctx) {
            Some(task) => Phase::Dispatching(task),
            None if self.ctx.all_completed() => Phase::Done,
            None => Phase::Idle,
        }
    }

    fn idle(&mut self) -> Phase {
        // Nothing runnable, so the earliest unfinished arrival is in the future
        let Some(until) = self.ctx.next_arrival() else {
            return Phase::Done;
        };
        debug!("t={} idle until {}", self.ctx.now, until);
        self.ctx.idle_until(until);
        self.observer.observe(&self.ctx);
        Phase::Selecting
    }

    fn dispatch(&mut self, task: TaskId) -> Phase {
        let slice = self.scheduler.slice(&self.ctx, task);
        let start = self.ctx.now;
        let completed = self.ctx.run(task, slice);
        debug!(
            "t={} {} ran task {} until {}{}",
            start,
            self.scheduler.name(),
            task,
            self.ctx.now,
            if completed { " (done)" } else { "" }
        );

        // Arrivals during the slice queue ahead of the task that just ran
        self.admit_arrivals();
        if !completed {
            trace!("t={} requeue task {}", self.ctx.now, task);
            self.scheduler
                .enqueue(&self.ctx, task, EnqueueReason::Preempted);
        }

        self.observer.observe(&self.ctx);
        Phase::Selecting
    }

    fn admit_arrivals(&mut self) {
        for task in self.ctx.admit_arrivals() {
            trace!("t={} task {} arrived", self.ctx.now, task);
            self.scheduler
                .enqueue(&self.ctx, task, EnqueueReason::Arrival);
        }
    }
}
