//! Delayed actions driven by the frame clock.
//!
//! Every task belongs to a scope. Room-scoped tasks are cancelled whenever
//! the room is torn down or a puzzle takes over the screen, so a delayed
//! transition can never fire into a room the player already left.

/// Handle returned by [`Scheduler::schedule`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

/// Lifetime a pending task is tied to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskScope {
    /// Survives room changes (setup delay)
    Session,
    /// Cancelled on room teardown or puzzle start
    Room,
}

struct Pending<T> {
    id: TaskId,
    remaining_ms: u32,
    scope: TaskScope,
    task: T,
}

pub struct Scheduler<T> {
    pending: Vec<Pending<T>>,
    next_id: u64,
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            next_id: 1,
        }
    }

    pub fn schedule(&mut self, delay_ms: u32, scope: TaskScope, task: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending {
            id,
            remaining_ms: delay_ms,
            scope,
            task,
        });
        id
    }

    /// Returns true if the task was still pending
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.id != id);
        self.pending.len() != before
    }

    /// Cancel every task of `scope`; returns how many were dropped
    pub fn cancel_scope(&mut self, scope: TaskScope) -> usize {
        let before = self.len();
        self.pending.retain(|p| p.scope != scope);
        before - self.len()
    }

    #[cfg(test)]
    pub fn is_pending(&self, id: TaskId) -> bool {
        self.pending.iter().any(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Advance the clock by `dt_ms`. Returns the tasks that came due, in the
    /// order they were scheduled.
    pub fn tick(&mut self, dt_ms: u32) -> Vec<T> {
        let mut due = Vec::new();
        let mut keep = Vec::with_capacity(self.pending.len());
        for mut p in self.pending.drain(..) {
            p.remaining_ms = p.remaining_ms.saturating_sub(dt_ms);
            if p.remaining_ms == 0 {
                due.push(p.task);
            } else {
                keep.push(p);
            }
        }
        self.pending = keep;
        due
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
