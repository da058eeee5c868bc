//! Deferred work on a virtual clock.
//!
//! Behaviors never block. Work that must happen after the current handler
//! returns is queued here as a [`Task`] and run by
//! [`Page::settle`](super::Page::settle), which commits the render state
//! before each task. Time only moves when the host calls
//! [`Page::advance`](super::Page::advance), so tests observe ordering
//! without wall-clock delays.

use crate::model::NodeId;

/// A unit of deferred work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Focus the first focusable element inside a disclosure panel.
    FocusFirstItem {
        /// The panel that was just revealed.
        panel: NodeId,
    },
    /// Start fading a notice out.
    FadeNotice {
        /// The notice element.
        notice: NodeId,
    },
    /// Remove a faded notice.
    RemoveNotice {
        /// The notice element.
        notice: NodeId,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Scheduled {
    due_ms: u64,
    seq: u64,
    task: Task,
}

/// FIFO queue of tasks ordered by due time, then insertion order.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now_ms: u64,
    next_seq: u64,
    queue: Vec<Scheduled>,
}

impl Scheduler {
    /// Create an empty scheduler at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Queue `task` to run on the next turn, after the current handler.
    pub fn defer(&mut self, task: Task) {
        self.schedule_after(0, task);
    }

    /// Queue `task` to run once `delay_ms` have elapsed.
    pub fn schedule_after(&mut self, delay_ms: u64, task: Task) {
        let scheduled = Scheduled {
            due_ms: self.now_ms.saturating_add(delay_ms),
            seq: self.next_seq,
            task,
        };
        self.next_seq += 1;
        self.queue.push(scheduled);
    }

    /// Whether any task is due now.
    pub fn has_ready(&self) -> bool {
        self.queue.iter().any(|s| s.due_ms <= self.now_ms)
    }

    /// Remove and return the earliest due task.
    pub fn pop_ready(&mut self) -> Option<Task> {
        let position = self
            .queue
            .iter()
            .enumerate()
            .filter(|(_, s)| s.due_ms <= self.now_ms)
            .min_by_key(|(_, s)| (s.due_ms, s.seq))
            .map(|(i, _)| i)?;
        Some(self.queue.remove(position).task)
    }

    /// Due time of the earliest queued task.
    pub fn next_due_ms(&self) -> Option<u64> {
        self.queue.iter().map(|s| s.due_ms).min()
    }

    /// Move the clock forward to `time_ms`. The clock never goes back.
    pub fn advance_to(&mut self, time_ms: u64) {
        self.now_ms = self.now_ms.max(time_ms);
    }

    /// Queued tasks in run order.
    pub fn pending(&self) -> Vec<Task> {
        let mut queued = self.queue.clone();
        queued.sort_by_key(|s| (s.due_ms, s.seq));
        queued.into_iter().map(|s| s.task).collect()
    }

    /// Number of queued tasks.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
