use serde::{Deserialize, Serialize};

/// One unit of work - a single input line and its position in the queue.
/// The index is the task's identity; the payload is never inspected by the
/// engine itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub index: usize,
    pub payload: String,
}

/// Ordered task sequence plus the cursor marking the next undispatched task.
/// The cursor only moves forward, and only when a task has actually been
/// handed to an idle worker.
#[derive(Debug, Default)]
pub struct TaskQueue {
    tasks: Vec<Task>,
    cursor: usize,
}

impl TaskQueue {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks, cursor: 0 }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// The task the cursor points at, without advancing.
    pub fn peek(&self) -> Option<&Task> {
        self.tasks.get(self.cursor)
    }

    /// Advances the cursor past the task just dispatched.
    pub fn advance(&mut self) {
        debug_assert!(self.cursor < self.tasks.len());
        self.cursor += 1;
    }

    /// True once every task has been dispatched (not necessarily completed).
    pub fn is_drained(&self) -> bool {
        self.cursor == self.tasks.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
}
