//! Shared planID → task mapping. Reads and writes hold a single
//! reader-writer lock; writes replace the entire record value (shadow
//! clone), never mutate in place.

use cc_core::{CompactionPlanResult, PlanId, SignalId, Task, TaskState};
use parking_lot::RwLock;
use std::collections::HashMap;

use crate::error::CoordinatorError;

struct Inner {
    tasks: HashMap<PlanId, Task>,
    /// Count of tasks in `{Pipelining, Executing}`. Kept alongside `tasks`
    /// under the same lock so it can never be observed out of sync with the
    /// set it counts.
    executing_count: usize,
}

pub struct TaskTable {
    inner: RwLock<Inner>,
}

impl Default for TaskTable {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskTable {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                tasks: HashMap::new(),
                executing_count: 0,
            }),
        }
    }

    pub fn get(&self, plan_id: PlanId) -> Option<Task> {
        self.inner.read().tasks.get(&plan_id).cloned()
    }

    pub fn by_state(&self, state: TaskState) -> Vec<Task> {
        self.inner
            .read()
            .tasks
            .values()
            .filter(|t| t.state == state)
            .cloned()
            .collect()
    }

    /// `signal_id == SignalId::NONE` (0) returns every task, a union over
    /// all signals.
    pub fn by_signal(&self, signal_id: SignalId) -> Vec<Task> {
        let inner = self.inner.read();
        if signal_id.is_none() {
            return inner.tasks.values().cloned().collect();
        }
        inner
            .tasks
            .values()
            .filter(|t| t.trigger.signal_id == signal_id)
            .cloned()
            .collect()
    }

    pub fn executing_count(&self) -> usize {
        self.inner.read().executing_count
    }

    pub fn is_full(&self, max_parallel_tasks: usize) -> bool {
        self.inner.read().executing_count >= max_parallel_tasks
    }

    /// Install a brand-new task (always `Pipelining`, per `Task::new`).
    pub fn install(&self, task: Task) {
        debug_assert_eq!(task.state, TaskState::Pipelining);
        let mut inner = self.inner.write();
        inner.executing_count += 1;
        inner.tasks.insert(task.plan_id, task);
    }

    /// Replace `plan_id`'s record with `f(&current)`'s shadow clone,
    /// adjusting `executing_count` by whether the task entered or left
    /// `{Pipelining, Executing}`. No-op (returns `PlanNotFound`) if absent.
    pub fn transition<F>(&self, plan_id: PlanId, f: F) -> Result<Task, CoordinatorError>
    where
        F: FnOnce(&Task) -> Result<Task, CoordinatorError>,
    {
        let mut inner = self.inner.write();
        let current = inner
            .tasks
            .get(&plan_id)
            .ok_or(CoordinatorError::PlanNotFound(plan_id))?;
        let next = f(current)?;
        let was_active = current.state.is_active();
        let is_active = next.state.is_active();
        if was_active && !is_active {
            inner.executing_count = inner.executing_count.saturating_sub(1);
        } else if !was_active && is_active {
            inner.executing_count += 1;
        }
        inner.tasks.insert(plan_id, next.clone());
        Ok(next)
    }

    /// Set the plan's allocated (or sentinel) start time without a state
    /// change. Does not affect `executing_count`.
    pub fn set_start_time(&self, plan_id: PlanId, start_time: cc_core::LogicalTimestamp) -> Result<Task, CoordinatorError> {
        let mut inner = self.inner.write();
        let current = inner
            .tasks
            .get(&plan_id)
            .ok_or(CoordinatorError::PlanNotFound(plan_id))?;
        let next = current.with_start_time(start_time);
        inner.tasks.insert(plan_id, next.clone());
        Ok(next)
    }

    pub fn complete(&self, plan_id: PlanId, result: CompactionPlanResult) -> Result<Task, CoordinatorError> {
        self.transition(plan_id, |t| Ok(t.completed_with(result)?))
    }

    /// Evict every terminal task matching `predicate`. Returns the count
    /// evicted, for the janitor's log line.
    pub fn evict_if<F>(&self, predicate: F) -> usize
    where
        F: Fn(&Task) -> bool,
    {
        let mut inner = self.inner.write();
        let to_remove: Vec<PlanId> = inner
            .tasks
            .values()
            .filter(|t| t.state.is_terminal() && predicate(t))
            .map(|t| t.plan_id)
            .collect();
        for plan_id in &to_remove {
            inner.tasks.remove(plan_id);
        }
        to_remove.len()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.inner.read().tasks.len()
    }
}

#[cfg(test)]
#[path = "task_table_tests.rs"]
mod tests;
