pub mod driver;
pub mod event;
pub mod observer;
pub mod state;

pub use driver::SchedCore;
pub use event::{EnqueueReason, Segment};
pub use observer::{check, Observer, Violation};
pub use state::{ReadyPriq, SelectKey, SimCtx, Task, TaskId, TaskState, Ticks};
