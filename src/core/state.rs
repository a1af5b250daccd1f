use keyed_priority_queue::KeyedPriorityQueue;
use std::cmp::Ordering;

use super::event::Segment;

// Index into the task table; equals the process's position in the input.
pub type TaskId = usize;
pub type Ticks = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    // Not arrived yet, or arrived but not yet handed to the scheduler
    Pending,
    Runnable,
    Running,
    Completed,
}

#[derive(Debug, Clone)]
pub struct Task {
    pub id: TaskId,
    pub state: TaskState,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub priority: i64,
    pub remaining: Ticks,
    pub completion_time: Option<Ticks>,
}

// Lowest rank wins, then earliest arrival, then earliest input position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectKey {
    pub rank: i128,
    pub arrival_time: Ticks,
    pub task: TaskId,
}

impl SelectKey {
    pub fn new(rank: i128, task: &Task) -> Self {
        Self {
            rank,
            arrival_time: task.arrival_time,
            task: task.id,
        }
    }
}

// KeyedPriorityQueue is a max-heap, so we need to flip-flop SelectKey's Ord
impl PartialOrd for SelectKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SelectKey {
    fn cmp(&self, other: &Self) -> Ordering {
        (other.rank, other.arrival_time, other.task).cmp(&(self.rank, self.arrival_time, self.task))
    }
}

#[derive(Debug)]
pub struct ReadyPriq {
    tasks: KeyedPriorityQueue<TaskId, SelectKey>,
}

impl ReadyPriq {
    pub fn new() -> Self {
        Self {
            tasks: KeyedPriorityQueue::new(),
        }
    }

    pub fn push(&mut self, key: SelectKey) {
        let prev = self.tasks.push(key.task, key);
        debug_assert!(prev.is_none(), "Task {} already queued", key.task);
    }

    pub fn pop(&mut self) -> Option<TaskId> {
        self.tasks.pop().map(|t| t.0)
    }

    pub fn contains(&self, task: TaskId) -> bool {
        self.tasks.get_priority(&task).is_some()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl Default for ReadyPriq {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Default)]
pub struct SimCtx {
    pub now: Ticks,
    pub tasks: Vec<Task>,
    pub segments: Vec<Segment>,
    // Task ids sorted by (arrival_time, id)
    arrival_order: Vec<TaskId>,
    arrival_cursor: usize,
    completion_order: Vec<TaskId>,
}

impl SimCtx {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_task(&mut self, arrival_time: Ticks, burst_time: Ticks, priority: i64) -> TaskId {
        debug_assert_eq!(self.arrival_cursor, 0, "Tasks must be created before the run starts");
        debug_assert!(burst_time > 0, "Burst time must be positive");

        let id = self.tasks.len();
        self.tasks.push(Task {
            id,
            state: TaskState::Pending,
            arrival_time,
            burst_time,
            priority,
            remaining: burst_time,
            completion_time: None,
        });

        // Equal arrivals keep input order since `id` grows monotonically
        let pos = self
            .arrival_order
            .partition_point(|&t| self.tasks[t].arrival_time <= arrival_time);
        self.arrival_order.insert(pos, id);

        id
    }

    pub fn task(&self, task_id: TaskId) -> &Task {
        &self.tasks[task_id]
    }

    pub fn task_mut(&mut self, task_id: TaskId) -> &mut Task {
        &mut self.tasks[task_id]
    }

    pub fn all_completed(&self) -> bool {
        self.completion_order.len() == self.tasks.len()
    }

    pub fn completion_order(&self) -> &[TaskId] {
        &self.completion_order
    }

    pub fn admit_arrivals(&mut self) -> Vec<TaskId> {
        let now = self.now;
        let arrived: Vec<TaskId> = self.arrival_order[self.arrival_cursor..]
            .iter()
            .copied()
            .take_while(|&t| self.tasks[t].arrival_time <= now) // Contiguous, since the order is sorted
            .collect();

        self.arrival_cursor += arrived.len();
        for &task in &arrived {
            self.mark_runnable(task);
        }

        arrived
    }

    pub fn next_arrival(&self) -> Option<Ticks> {
        self.tasks
            .iter()
            .filter(|t| t.state != TaskState::Completed)
            .map(|t| t.arrival_time)
            .min()
    }

    pub fn idle_until(&mut self, until: Ticks) {
        debug_assert!(until > self.now, "Idle gap must move the clock forward");
        self.segments.push(Segment::Idle {
            start: self.now,
            end: until,
        });
        self.now = until;
    }

    // True if this slice finished the task
    pub fn run(&mut self, task_id: TaskId, slice: Ticks) -> bool {
        let start = self.now;
        let task = self.task_mut(task_id);
        debug_assert_eq!(
            task.state,
            TaskState::Runnable,
            "Task {task_id} must be runnable when dispatched"
        );
        debug_assert!(
            task.arrival_time <= start,
            "Task {task_id} dispatched before its arrival"
        );

        let ran = task.remaining.min(slice);
        debug_assert!(ran > 0, "Dispatch of task {task_id} must consume time");
        task.state = TaskState::Running;
        task.remaining -= ran;

        let end = start + ran;
        self.segments.push(Segment::Run {
            task: task_id,
            start,
            end,
        });
        self.now = end;

        if self.task(task_id).remaining == 0 {
            self.mark_completed(task_id, end);
            true
        } else {
            self.mark_runnable(task_id);
            false
        }
    }

    fn mark_runnable(&mut self, task_id: TaskId) {
        let task = self.task_mut(task_id);
        debug_assert!(
            task.state != TaskState::Completed,
            "Completed task {} cannot be runnable",
            task.id
        );
        task.state = TaskState::Runnable;
    }

    fn mark_completed(&mut self, task_id: TaskId, completion_time: Ticks) {
        let task = self.task_mut(task_id);
        debug_assert!(
            task.state == TaskState::Running,
            "Task {task_id} must have been running before marked complete"
        );

        task.state = TaskState::Completed;
        task.completion_time = Some(completion_time);
        self.completion_order.push(task_id);
    }
}
