pub mod driver;
pub mod job;
pub mod metrics;
pub mod result;
pub mod view;
pub mod workload;

pub use driver::{compare, simulate, Comparison};
pub use job::{InputError, Process, ProcessId, ProcessSet, ProcessSpec, MAX_TICKS};
pub use metrics::Metrics;
pub use result::{CompletionRecord, ScheduleSegment, SimulationResult};
pub use view::{active_segment, palette_index, process_table, Playback, ProcessRow};
pub use workload::{demo_processes, load_processes, parse_processes, random_processes, LoadError};
