use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::Ticks;

/// Stable identity of a process across edits of the process list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcessId(pub u64);

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Per-process ceiling on arrival and burst; keeps the clock of any
// realistically sized set far below Ticks::MAX
pub const MAX_TICKS: Ticks = u32::MAX as Ticks;

/// One schedulable unit. Only constructible through [`Process::new`], so
/// every instance has an arrival in [0, MAX_TICKS] and a burst in
/// [1, MAX_TICKS].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Process {
    id: ProcessId,
    label: String,
    arrival_time: Ticks,
    burst_time: Ticks,
    priority: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    NegativeArrival { label: String, arrival_time: i64 },
    NonPositiveBurst { label: String, burst_time: i64 },
    TooLarge { label: String, value: i64 },
    DuplicateId(ProcessId),
    IdsExhausted,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::NegativeArrival {
                label,
                arrival_time,
            } => write!(f, "{label}: arrival time {arrival_time} is negative"),
            InputError::NonPositiveBurst { label, burst_time } => {
                write!(f, "{label}: burst time {burst_time} must be at least 1")
            }
            InputError::TooLarge { label, value } => {
                write!(f, "{label}: time {value} exceeds the limit of {MAX_TICKS}")
            }
            InputError::DuplicateId(id) => write!(f, "process id {id} is used more than once"),
            InputError::IdsExhausted => write!(f, "no process id left to assign"),
        }
    }
}

impl Error for InputError {}

impl Process {
    pub fn new(
        id: ProcessId,
        label: impl Into<String>,
        arrival_time: i64,
        burst_time: i64,
        priority: i64,
    ) -> Result<Self, InputError> {
        let label = label.into();
        let Ok(arrival_time) = Ticks::try_from(arrival_time) else {
            return Err(InputError::NegativeArrival {
                label,
                arrival_time,
            });
        };
        let burst_time = match Ticks::try_from(burst_time) {
            Ok(burst) if burst > 0 => burst,
            _ => return Err(InputError::NonPositiveBurst { label, burst_time }),
        };
        if arrival_time > MAX_TICKS || burst_time > MAX_TICKS {
            let value = arrival_time.max(burst_time) as i64;
            return Err(InputError::TooLarge { label, value });
        }

        Ok(Self {
            id,
            label,
            arrival_time,
            burst_time,
            priority,
        })
    }

    pub fn id(&self) -> ProcessId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn arrival_time(&self) -> Ticks {
        self.arrival_time
    }

    pub fn burst_time(&self) -> Ticks {
        self.burst_time
    }

    pub fn priority(&self) -> i64 {
        self.priority
    }
}

/// Loosely-typed process description as entered by a user or read from a
/// workload file. Missing ids and labels are filled in by [`ProcessSet::add`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessSpec {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default, alias = "pid")]
    pub label: Option<String>,
    #[serde(default)]
    pub arrival_time: i64,
    #[serde(default = "ProcessSpec::default_burst")]
    pub burst_time: i64,
    #[serde(default = "ProcessSpec::default_priority")]
    pub priority: i64,
}

impl ProcessSpec {
    fn default_burst() -> i64 {
        1
    }

    fn default_priority() -> i64 {
        1
    }
}

/// Ordered process list with unique ids. Input order is significant: it is
/// the final tie-break for every policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ProcessSet {
    processes: Vec<Process>,
}

impl ProcessSet {
    pub fn new(processes: Vec<Process>) -> Result<Self, InputError> {
        let mut set = Self::default();
        for process in processes {
            set.push(process)?;
        }
        Ok(set)
    }

    pub fn push(&mut self, process: Process) -> Result<(), InputError> {
        if self.get(process.id()).is_some() {
            return Err(InputError::DuplicateId(process.id()));
        }
        self.processes.push(process);
        Ok(())
    }

    /// Validate `spec` and append it. An omitted id becomes one more than
    /// the largest id so far and an omitted label becomes `P<id>`.
    pub fn add(&mut self, spec: ProcessSpec) -> Result<ProcessId, InputError> {
        let id = match spec.id {
            Some(id) => ProcessId(id),
            None => ProcessId(self.next_id().ok_or(InputError::IdsExhausted)?),
        };
        let label = match spec.label {
            Some(label) if !label.is_empty() => label,
            _ => format!("P{id}"),
        };
        let process = Process::new(id, label, spec.arrival_time, spec.burst_time, spec.priority)?;
        self.push(process)?;
        Ok(id)
    }

    // None once u64::MAX is taken
    pub fn next_id(&self) -> Option<u64> {
        match self.processes.iter().map(|p| p.id().0).max() {
            Some(max) => max.checked_add(1),
            None => Some(1),
        }
    }

    pub fn remove(&mut self, id: ProcessId) -> Option<Process> {
        let index = self.processes.iter().position(|p| p.id() == id)?;
        Some(self.processes.remove(index))
    }

    pub fn clear(&mut self) {
        self.processes.clear();
    }

    pub fn get(&self, id: ProcessId) -> Option<&Process> {
        self.processes.iter().find(|p| p.id() == id)
    }

    pub fn as_slice(&self) -> &[Process] {
        &self.processes
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }
}

impl TryFrom<Vec<ProcessSpec>> for ProcessSet {
    type Error = InputError;

    fn try_from(specs: Vec<ProcessSpec>) -> Result<Self, Self::Error> {
        let mut set = Self::default();
        for spec in specs {
            set.add(spec)?;
        }
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_arrival_and_empty_burst() {
        assert_eq!(
            Process::new(ProcessId(1), "P1", -1, 3, 0),
            Err(InputError::NegativeArrival {
                label: "P1".into(),
                arrival_time: -1
            })
        );
        assert_eq!(
            Process::new(ProcessId(1), "P1", 0, 0, 0),
            Err(InputError::NonPositiveBurst {
                label: "P1".into(),
                burst_time: 0
            })
        );
        assert!(Process::new(ProcessId(1), "P1", 0, -4, 0).is_err());
        assert!(Process::new(ProcessId(1), "P1", 0, 1, -3).is_ok());
    }

    #[test]
    fn set_rejects_duplicate_ids() {
        let a = Process::new(ProcessId(1), "A", 0, 1, 1).unwrap();
        let b = Process::new(ProcessId(1), "B", 2, 1, 1).unwrap();
        assert_eq!(
            ProcessSet::new(vec![a, b]),
            Err(InputError::DuplicateId(ProcessId(1)))
        );
    }

    #[test]
    fn add_assigns_next_id_and_default_label() {
        let mut set = ProcessSet::default();
        assert_eq!(set.next_id(), Some(1));

        let first = set
            .add(ProcessSpec {
                id: Some(4),
                burst_time: 2,
                ..Default::default()
            })
            .unwrap();
        let second = set
            .add(ProcessSpec {
                burst_time: 1,
                ..Default::default()
            })
            .unwrap();

        assert_eq!(first, ProcessId(4));
        assert_eq!(second, ProcessId(5));
        assert_eq!(set.get(second).map(Process::label), Some("P5"));

        assert!(set.remove(first).is_some());
        assert_eq!(set.next_id(), Some(6));
        set.clear();
        assert!(set.is_empty());
    }

    #[test]
    fn rejects_times_beyond_the_ceiling() {
        let limit = MAX_TICKS as i64;
        assert!(Process::new(ProcessId(1), "P1", limit, limit, 0).is_ok());
        assert_eq!(
            Process::new(ProcessId(1), "P1", 0, i64::MAX, 0),
            Err(InputError::TooLarge {
                label: "P1".into(),
                value: i64::MAX
            })
        );
        assert!(matches!(
            Process::new(ProcessId(1), "P1", limit + 1, 1, 0),
            Err(InputError::TooLarge { .. })
        ));
    }

    #[test]
    fn add_without_id_fails_once_ids_run_out() {
        let mut set = ProcessSet::default();
        set.add(ProcessSpec {
            id: Some(u64::MAX),
            burst_time: 1,
            ..Default::default()
        })
        .unwrap();

        assert_eq!(set.next_id(), None);
        assert_eq!(
            set.add(ProcessSpec {
                burst_time: 1,
                ..Default::default()
            }),
            Err(InputError::IdsExhausted)
        );
        assert_eq!(set.len(), 1);
    }
}
