use average::{Estimate, Mean};
use serde::Serialize;

use super::result::{CompletionRecord, ScheduleSegment};
use crate::core::Ticks;

/// Aggregate figures for a finished run. Averages and utilization are
/// rounded to two decimals; all of them are zero for an empty run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub avg_waiting_time: f64,
    pub avg_turnaround_time: f64,
    pub cpu_utilization_percent: f64,
    pub busy_time: Ticks,
    pub total_duration: Ticks,
}

impl Metrics {
    pub fn compute(schedule: &[ScheduleSegment], completed: &[CompletionRecord]) -> Self {
        let total_duration = schedule.last().map_or(0, ScheduleSegment::end);
        let busy_time = schedule
            .iter()
            .filter(|s| !s.is_idle())
            .map(ScheduleSegment::duration)
            .sum();

        let cpu_utilization_percent = if total_duration > 0 {
            round2(busy_time as f64 / total_duration as f64 * 100.0)
        } else {
            0.0
        };

        Self {
            avg_waiting_time: round2(avg(completed.iter().map(|c| c.waiting_time))),
            avg_turnaround_time: round2(avg(completed.iter().map(|c| c.turnaround_time))),
            cpu_utilization_percent,
            busy_time,
            total_duration,
        }
    }
}

fn avg(iter: impl Iterator<Item = Ticks>) -> f64 {
    let mean: Mean = iter.map(|t| t as f64).collect();
    if mean.is_empty() {
        0.0
    } else {
        mean.estimate()
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ProcessId;

    fn record(id: u64, arrival: Ticks, burst: Ticks, completion: Ticks) -> CompletionRecord {
        CompletionRecord {
            id: ProcessId(id),
            label: format!("P{id}"),
            arrival_time: arrival,
            burst_time: burst,
            priority: 0,
            completion_time: completion,
            turnaround_time: completion - arrival,
            waiting_time: completion - arrival - burst,
        }
    }

    #[test]
    fn empty_run_is_all_zero() {
        assert_eq!(Metrics::compute(&[], &[]), Metrics::default());
    }

    #[test]
    fn idle_time_lowers_utilization() {
        let schedule = vec![
            ScheduleSegment::Idle { start: 0, end: 1 },
            ScheduleSegment::Process {
                id: ProcessId(1),
                label: "P1".into(),
                start: 1,
                end: 3,
            },
        ];
        let completed = vec![record(1, 1, 2, 3)];
        let m = Metrics::compute(&schedule, &completed);

        assert_eq!(m.total_duration, 3);
        assert_eq!(m.busy_time, 2);
        assert_eq!(m.cpu_utilization_percent, 66.67);
        assert_eq!(m.avg_waiting_time, 0.0);
        assert_eq!(m.avg_turnaround_time, 2.0);
    }

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(round2(8.0 / 3.0), 2.67);
        assert_eq!(round2(1.0 / 3.0), 0.33);
        assert_eq!(round2(5.0), 5.0);
    }
}
