//! Read-only views over a finished run for tables, timelines and playback.

use serde::Serialize;

use super::{
    job::Process,
    result::{CompletionRecord, ScheduleSegment, SimulationResult},
};
use crate::core::Ticks;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessRow<'a> {
    pub process: &'a Process,
    pub completion: Option<&'a CompletionRecord>,
}

/// Left join of the full process list against the completion records,
/// in input order.
pub fn process_table<'a>(
    processes: &'a [Process],
    result: &'a SimulationResult,
) -> Vec<ProcessRow<'a>> {
    processes
        .iter()
        .map(|process| ProcessRow {
            process,
            completion: result.completion(process.id()),
        })
        .collect()
}

/// The segment running at `tick`, i.e. the one with start < tick <= end.
/// Nothing is running at tick 0.
pub fn active_segment(schedule: &[ScheduleSegment], tick: Ticks) -> Option<&ScheduleSegment> {
    if tick == 0 {
        return None;
    }
    // Segments are contiguous and sorted, so the first one ending at or
    // after `tick` is the only candidate
    let idx = schedule.partition_point(|s| s.end() < tick);
    schedule.get(idx).filter(|s| s.start() < tick)
}

/// Stable palette slot for a label: the digits in the label read as a
/// number, modulo the palette size. Labels without digits use slot 0.
pub fn palette_index(label: &str, palette_len: usize) -> usize {
    if palette_len == 0 {
        return 0;
    }
    let digits: String = label.chars().filter(char::is_ascii_digit).collect();
    // Too many digits to fit is treated like no number at all
    let number = digits.parse::<u64>().unwrap_or(0);
    (number % palette_len as u64) as usize
}

// No timer of its own; the owner calls `advance` at its own pace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Playback {
    tick: Ticks,
    total: Ticks,
}

impl Playback {
    pub fn new(result: &SimulationResult) -> Self {
        Self {
            tick: 0,
            total: result.total_duration(),
        }
    }

    pub fn tick(&self) -> Ticks {
        self.tick
    }

    pub fn total(&self) -> Ticks {
        self.total
    }

    pub fn is_finished(&self) -> bool {
        self.tick >= self.total
    }

    pub fn advance(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }
        self.tick += 1;
        true
    }

    pub fn seek(&mut self, tick: Ticks) {
        self.tick = tick.min(self.total);
    }

    pub fn reset(&mut self) {
        self.tick = 0;
    }

    pub fn active<'a>(&self, result: &'a SimulationResult) -> Option<&'a ScheduleSegment> {
        active_segment(&result.schedule, self.tick)
    }
}
