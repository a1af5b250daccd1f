use std::error::Error;
use std::fmt;

use rustc_hash::{FxHashMap, FxHashSet};

use super::state::{SimCtx, TaskState, Ticks};
use crate::sim::{Process, ProcessId, ScheduleSegment, SimulationResult};

/// Per-step consistency checks on a running simulation. Compiled to
/// nothing in release builds apart from the step counter.
#[derive(Debug)]
pub struct Observer {
    step: u64,
}

impl Observer {
    pub fn new() -> Self {
        Self { step: 0 }
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn observe(&mut self, ctx: &SimCtx) {
        self.step += 1;

        let n = ctx.segments.len();
        if let Some(last) = ctx.segments.last() {
            debug_assert_eq!(
                last.end(),
                ctx.now,
                "Last segment must end at the clock (step {})",
                self.step
            );
            debug_assert!(last.end() > last.start(), "Empty segment at step {}", self.step);
            let expected_start = if n > 1 { ctx.segments[n - 2].end() } else { 0 };
            debug_assert_eq!(
                last.start(),
                expected_start,
                "Segment {} leaves a gap or overlaps its predecessor",
                n - 1
            );
        }

        for task in &ctx.tasks {
            debug_assert_ne!(
                task.state,
                TaskState::Running,
                "Task {} still marked running between steps",
                task.id
            );
            debug_assert_eq!(
                task.state == TaskState::Completed,
                task.remaining == 0,
                "Task {} completion state disagrees with its remaining burst",
                task.id
            );
        }
    }

    pub fn finish(&self, ctx: &SimCtx) {
        debug_assert!(ctx.all_completed(), "Run ended with unfinished tasks");
        debug_assert_eq!(
            ctx.segments.last().map_or(0, |s| s.end()),
            ctx.now,
            "Total duration must equal the final clock"
        );
        for task in &ctx.tasks {
            debug_assert_eq!(
                task.completion_time.map(|c| c >= task.arrival_time + task.burst_time),
                Some(true),
                "Task {} finished earlier than arrival + burst",
                task.id
            );
        }
    }
}

impl Default for Observer {
    fn default() -> Self {
        Self::new()
    }
}

/// First broken invariant found by [`check`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    Gap { index: usize, expected: Ticks, found: Ticks },
    EmptySegment { index: usize },
    DurationMismatch { total: Ticks, summed: Ticks },
    UnknownProcess { id: ProcessId },
    MissingCompletion { id: ProcessId },
    DuplicateCompletion { id: ProcessId },
    BurstMismatch { id: ProcessId, burst: Ticks, ran: Ticks },
    EarlyDispatch { id: ProcessId, arrival: Ticks, start: Ticks },
    BadTimes { id: ProcessId },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Gap { index, expected, found } => write!(
                f,
                "segment {index} starts at {found}, expected {expected}"
            ),
            Violation::EmptySegment { index } => write!(f, "segment {index} has no duration"),
            Violation::DurationMismatch { total, summed } => write!(
                f,
                "segments sum to {summed} but total duration is {total}"
            ),
            Violation::UnknownProcess { id } => write!(f, "process {id} is not in the input"),
            Violation::MissingCompletion { id } => write!(f, "process {id} never completed"),
            Violation::DuplicateCompletion { id } => {
                write!(f, "process {id} completed more than once")
            }
            Violation::BurstMismatch { id, burst, ran } => write!(
                f,
                "process {id} ran {ran} ticks but its burst is {burst}"
            ),
            Violation::EarlyDispatch { id, arrival, start } => write!(
                f,
                "process {id} dispatched at {start} before arriving at {arrival}"
            ),
            Violation::BadTimes { id } => write!(
                f,
                "process {id} has inconsistent completion, turnaround or waiting time"
            ),
        }
    }
}

impl Error for Violation {}

/// Verify a finished run against the processes it was computed from.
pub fn check(result: &SimulationResult, processes: &[Process]) -> Result<(), Violation> {
    let by_id: FxHashMap<ProcessId, &Process> = processes.iter().map(|p| (p.id(), p)).collect();
    let mut ran: FxHashMap<ProcessId, Ticks> = FxHashMap::default();

    let mut clock = 0;
    for (index, segment) in result.schedule.iter().enumerate() {
        if segment.start() != clock {
            return Err(Violation::Gap {
                index,
                expected: clock,
                found: segment.start(),
            });
        }
        if segment.end() <= segment.start() {
            return Err(Violation::EmptySegment { index });
        }
        if let ScheduleSegment::Process { id, start, .. } = segment {
            let process = by_id
                .get(id)
                .ok_or(Violation::UnknownProcess { id: *id })?;
            if *start < process.arrival_time() {
                return Err(Violation::EarlyDispatch {
                    id: *id,
                    arrival: process.arrival_time(),
                    start: *start,
                });
            }
            *ran.entry(*id).or_default() += segment.duration();
        }
        clock = segment.end();
    }

    let summed: Ticks = result.schedule.iter().map(ScheduleSegment::duration).sum();
    if clock != result.total_duration() || summed != result.total_duration() {
        return Err(Violation::DurationMismatch {
            total: result.total_duration(),
            summed,
        });
    }

    let mut seen: FxHashSet<ProcessId> = FxHashSet::default();
    for record in &result.completed {
        let process = by_id
            .get(&record.id)
            .ok_or(Violation::UnknownProcess { id: record.id })?;
        if !seen.insert(record.id) {
            return Err(Violation::DuplicateCompletion { id: record.id });
        }

        let consistent = record.completion_time > process.arrival_time()
            && record.turnaround_time == record.completion_time - process.arrival_time()
            && record.turnaround_time >= process.burst_time()
            && record.waiting_time == record.turnaround_time - process.burst_time();
        if !consistent {
            return Err(Violation::BadTimes { id: record.id });
        }
    }

    for process in processes {
        if !seen.contains(&process.id()) {
            return Err(Violation::MissingCompletion { id: process.id() });
        }
        let ran = ran.get(&process.id()).copied().unwrap_or(0);
        if ran != process.burst_time() {
            return Err(Violation::BurstMismatch {
                id: process.id(),
                burst: process.burst_time(),
                ran,
            });
        }
    }

    Ok(())
}
