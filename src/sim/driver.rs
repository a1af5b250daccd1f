use log::info;
use serde::Serialize;

use super::{
    job::Process,
    metrics::Metrics,
    result::{CompletionRecord, ScheduleSegment, SimulationResult},
};
use crate::{
    core::{SchedCore, Segment, SimCtx},
    scheduler::{
        FcfsScheduler, Policy, PriqScheduler, Quantum, RoundRobinScheduler, Scheduler,
        SjfScheduler,
    },
};

/// Run `policy` over `processes` to completion.
///
/// Pure: the input is only read, every piece of scratch state lives and
/// dies inside this call, and the same input always yields the same result.
pub fn simulate(processes: &[Process], policy: Policy) -> SimulationResult {
    let mut ctx = SimCtx::new();
    for process in processes {
        ctx.create_task(
            process.arrival_time(),
            process.burst_time(),
            process.priority(),
        );
    }

    let ctx = match policy {
        Policy::Fcfs => run(ctx, FcfsScheduler::new()),
        Policy::Sjf => run(ctx, SjfScheduler::new()),
        Policy::Priority => run(ctx, PriqScheduler::new()),
        Policy::RoundRobin { quantum } => run(ctx, RoundRobinScheduler::new(quantum)),
    };

    // TaskId is the index into `processes`
    let schedule = ctx
        .segments
        .iter()
        .map(|segment| match *segment {
            Segment::Idle { start, end } => ScheduleSegment::Idle { start, end },
            Segment::Run { task, start, end } => ScheduleSegment::Process {
                id: processes[task].id(),
                label: processes[task].label().to_string(),
                start,
                end,
            },
        })
        .collect();

    let completed = ctx
        .completion_order()
        .iter()
        .filter_map(|&task| {
            let completion_time = ctx.task(task).completion_time?;
            Some(CompletionRecord::new(&processes[task], completion_time))
        })
        .collect();

    let result = SimulationResult::new(schedule, completed);
    info!(
        "{}: {} processes, total {} ticks, avg wait {:.2}, avg turnaround {:.2}, utilization {:.2}%",
        policy.short_name(),
        processes.len(),
        result.metrics.total_duration,
        result.metrics.avg_waiting_time,
        result.metrics.avg_turnaround_time,
        result.metrics.cpu_utilization_percent
    );
    result
}

fn run<S: Scheduler>(ctx: SimCtx, scheduler: S) -> SimCtx {
    SchedCore::new(ctx, scheduler).run()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Comparison {
    pub policy: Policy,
    pub metrics: Metrics,
}

/// Run every policy over the same processes.
pub fn compare(processes: &[Process], quantum: Quantum) -> Vec<Comparison> {
    Policy::all(quantum)
        .into_iter()
        .map(|policy| Comparison {
            policy,
            metrics: simulate(processes, policy).metrics,
        })
        .collect()
}
