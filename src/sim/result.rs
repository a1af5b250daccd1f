use rustc_hash::FxHashMap;
use serde::Serialize;

use super::{
    job::{Process, ProcessId},
    metrics::Metrics,
};
use crate::core::Ticks;

/// One stretch of the timeline. The duration is always derived from the
/// bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScheduleSegment {
    Idle {
        start: Ticks,
        end: Ticks,
    },
    Process {
        id: ProcessId,
        label: String,
        start: Ticks,
        end: Ticks,
    },
}

impl ScheduleSegment {
    pub fn start(&self) -> Ticks {
        match *self {
            Self::Idle { start, .. } | Self::Process { start, .. } => start,
        }
    }

    pub fn end(&self) -> Ticks {
        match *self {
            Self::Idle { end, .. } | Self::Process { end, .. } => end,
        }
    }

    pub fn duration(&self) -> Ticks {
        self.end() - self.start()
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle { .. })
    }

    pub fn process_id(&self) -> Option<ProcessId> {
        match self {
            Self::Idle { .. } => None,
            Self::Process { id, .. } => Some(*id),
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Idle { .. } => None,
            Self::Process { label, .. } => Some(label),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRecord {
    pub id: ProcessId,
    pub label: String,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub priority: i64,
    pub completion_time: Ticks,
    pub turnaround_time: Ticks,
    pub waiting_time: Ticks,
}

impl CompletionRecord {
    pub fn new(process: &Process, completion_time: Ticks) -> Self {
        debug_assert!(
            completion_time >= process.arrival_time() + process.burst_time(),
            "{} completed at {} before it could have",
            process.label(),
            completion_time
        );
        let turnaround_time = completion_time - process.arrival_time();
        Self {
            id: process.id(),
            label: process.label().to_string(),
            arrival_time: process.arrival_time(),
            burst_time: process.burst_time(),
            priority: process.priority(),
            completion_time,
            turnaround_time,
            waiting_time: turnaround_time - process.burst_time(),
        }
    }
}

/// Timeline, per-process completions (in completion order) and aggregate
/// metrics of one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SimulationResult {
    pub schedule: Vec<ScheduleSegment>,
    pub completed: Vec<CompletionRecord>,
    pub metrics: Metrics,
    #[serde(skip)]
    by_id: FxHashMap<ProcessId, usize>,
}

impl SimulationResult {
    pub fn new(schedule: Vec<ScheduleSegment>, completed: Vec<CompletionRecord>) -> Self {
        let metrics = Metrics::compute(&schedule, &completed);
        let by_id = completed
            .iter()
            .enumerate()
            .map(|(i, record)| (record.id, i))
            .collect();
        Self {
            schedule,
            completed,
            metrics,
            by_id,
        }
    }

    pub fn completion(&self, id: ProcessId) -> Option<&CompletionRecord> {
        self.by_id.get(&id).map(|&i| &self.completed[i])
    }

    pub fn total_duration(&self) -> Ticks {
        self.metrics.total_duration
    }

    pub fn segments_of(&self, id: ProcessId) -> impl Iterator<Item = &ScheduleSegment> + '_ {
        self.schedule
            .iter()
            .filter(move |s| s.process_id() == Some(id))
    }
}
