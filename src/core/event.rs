use crate::core::{TaskId, Ticks};

/// One contiguous stretch of simulated time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    // No runnable task; the clock jumps to the next arrival
    Idle {
        start: Ticks,
        end: Ticks,
    },
    Run {
        task: TaskId,
        start: Ticks,
        end: Ticks,
    },
}

impl Segment {
    pub fn start(&self) -> Ticks {
        match *self {
            Self::Idle { start, .. } | Self::Run { start, .. } => start,
        }
    }

    pub fn end(&self) -> Ticks {
        match *self {
            Self::Idle { end, .. } | Self::Run { end, .. } => end,
        }
    }

    pub fn duration(&self) -> Ticks {
        self.end() - self.start()
    }

    pub fn task(&self) -> Option<TaskId> {
        match *self {
            Self::Idle { .. } => None,
            Self::Run { task, .. } => Some(task),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnqueueReason {
    // Arrival time reached
    Arrival,
    // Slice expired with burst remaining
    Preempted,
}
