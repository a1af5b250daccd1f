use std::error::Error;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use rand::prelude::*;

use super::job::{InputError, Process, ProcessId, ProcessSet, ProcessSpec};

pub fn demo_processes() -> ProcessSet {
    let rows = [
        (1, 0, 4, 1),
        (2, 1, 3, 2),
        (3, 2, 1, 3),
        (4, 3, 2, 4),
        (5, 4, 5, 5),
    ];
    let processes = rows
        .into_iter()
        .filter_map(|(id, arrival, burst, priority)| {
            Process::new(ProcessId(id), format!("P{id}"), arrival, burst, priority).ok()
        })
        .collect();
    ProcessSet::new(processes).unwrap_or_default()
}

/// `count` processes with arrivals in [0, 5), bursts in [1, 8] and
/// priorities in [1, 5], reproducible from `seed`.
pub fn random_processes(count: usize, seed: u64) -> ProcessSet {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut set = ProcessSet::default();

    for i in 1..=count as u64 {
        let spec = ProcessSpec {
            id: Some(i),
            label: Some(format!("P{i}")),
            arrival_time: rng.random_range(0..5),
            burst_time: rng.random_range(1..=8),
            priority: rng.random_range(1..=5),
        };
        // Ranges above always satisfy the input checks
        if let Err(err) = set.add(spec) {
            log::warn!("skipping generated process {i}: {err}");
        }
    }

    set
}

#[derive(Debug)]
pub enum LoadError {
    Io(io::Error),
    Parse(serde_json::Error),
    Invalid(InputError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(err) => write!(f, "failed to read workload: {err}"),
            LoadError::Parse(err) => write!(f, "malformed workload: {err}"),
            LoadError::Invalid(err) => write!(f, "invalid process: {err}"),
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LoadError::Io(err) => Some(err),
            LoadError::Parse(err) => Some(err),
            LoadError::Invalid(err) => Some(err),
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(err: io::Error) -> Self {
        LoadError::Io(err)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        LoadError::Parse(err)
    }
}

impl From<InputError> for LoadError {
    fn from(err: InputError) -> Self {
        LoadError::Invalid(err)
    }
}

/// Parse a JSON array of process specs, e.g.
/// `[{"label": "P1", "arrivalTime": 0, "burstTime": 4, "priority": 1}]`.
pub fn parse_processes(json: &str) -> Result<ProcessSet, LoadError> {
    let specs: Vec<ProcessSpec> = serde_json::from_str(json)?;
    Ok(ProcessSet::try_from(specs)?)
}

pub fn load_processes(path: &Path) -> Result<ProcessSet, LoadError> {
    let json = fs::read_to_string(path)?;
    parse_processes(&json)
}
