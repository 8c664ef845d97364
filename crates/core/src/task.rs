//! Task record and state machine.
//!
//! A task is mutated by shadow clone: every state change produces a new
//! `Task` value installed atomically into the task table, so in-flight
//! readers holding an `Arc<Task>` snapshot never observe a partial mutation.

use crate::ids::{NodeId, PlanId, SignalId};
use crate::plan::CompactionPlan;
use crate::result::CompactionPlanResult;
use crate::timestamp::LogicalTimestamp;
use serde::{Deserialize, Serialize};

/// Opaque reference to the trigger event that produced a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerInfo {
    pub signal_id: SignalId,
}

impl TriggerInfo {
    pub fn new(signal_id: SignalId) -> Self {
        Self { signal_id }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskState {
    Pipelining,
    Executing,
    Completed,
    Failed,
    Timeout,
}

crate::simple_display! {
    TaskState {
        Pipelining => "pipelining",
        Executing => "executing",
        Completed => "completed",
        Failed => "failed",
        Timeout => "timeout",
    }
}

impl TaskState {
    /// A task holds its admission slot and counts toward `executingCount`
    /// exactly while in one of these two states.
    pub fn is_active(self) -> bool {
        matches!(self, TaskState::Pipelining | TaskState::Executing)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, TaskState::Completed | TaskState::Failed | TaskState::Timeout)
    }

    /// Whether `self -> to` is one of the allowed edges of the lifecycle DAG:
    /// `Pipelining -> Executing -> {Completed, Failed, Timeout}`,
    /// plus `Timeout -> Failed`. No other transition is valid, including
    /// self-transitions.
    pub fn can_transition_to(self, to: TaskState) -> bool {
        use TaskState::*;
        matches!(
            (self, to),
            (Pipelining, Executing)
                | (Executing, Completed)
                | (Executing, Failed)
                | (Executing, Timeout)
                | (Timeout, Failed)
        )
    }
}

/// In-memory record for one plan's lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub plan_id: PlanId,
    pub trigger: TriggerInfo,
    pub plan: CompactionPlan,
    pub state: TaskState,
    pub worker_node_id: Option<NodeId>,
    pub result: Option<CompactionPlanResult>,
}

/// Error returned when a shadow-clone mutation would violate the lifecycle DAG.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("illegal task transition {from} -> {to} for plan {plan_id}")]
pub struct IllegalTransition {
    pub plan_id: PlanId,
    pub from: TaskState,
    pub to: TaskState,
}

impl Task {
    pub fn new(plan_id: PlanId, trigger: TriggerInfo, plan: CompactionPlan, worker_node_id: NodeId) -> Self {
        Self {
            plan_id,
            trigger,
            plan,
            state: TaskState::Pipelining,
            worker_node_id: Some(worker_node_id),
            result: None,
        }
    }

    /// Shadow-clone into a new record with `state` set to `to`, validating
    /// that the transition is legal. The caller installs the returned value
    /// into the task table; `self` is left untouched for any reader still
    /// holding it.
    pub fn with_state(&self, to: TaskState) -> Result<Task, IllegalTransition> {
        if !self.state.can_transition_to(to) {
            return Err(IllegalTransition { plan_id: self.plan_id, from: self.state, to });
        }
        let mut next = self.clone();
        next.state = to;
        Ok(next)
    }

    /// Shadow-clone with the plan's start timestamp set, independent of any
    /// state change. Used by the dispatcher to record the allocated (or
    /// sentinel) start time before transitioning to `Executing`.
    pub fn with_start_time(&self, start_time: LogicalTimestamp) -> Task {
        let mut next = self.clone();
        next.plan.start_time = start_time;
        next
    }

    /// Shadow-clone into `Completed` with `result` attached and binlog paths
    /// cleared, per the completion handler's step 4.
    pub fn completed_with(&self, result: CompactionPlanResult) -> Result<Task, IllegalTransition> {
        let mut next = self.with_state(TaskState::Completed)?;
        for segment in &mut next.plan.segment_binlogs {
            segment.clear_paths();
        }
        next.result = Some(result);
        Ok(next)
    }
}

#[cfg(any(test, feature = "test-support"))]
crate::builder! {
    pub struct TaskBuilder => Task {
        set { plan_id: PlanId = PlanId::new(1) }
        set { trigger: TriggerInfo = TriggerInfo::new(SignalId::NONE) }
        set { plan: CompactionPlan = CompactionPlan::new(
            "ch-1",
            Vec::new(),
            crate::plan::CompactionType::Merge,
            60,
        ) }
        set { state: TaskState = TaskState::Pipelining }
        set { worker_node_id: Option<NodeId> = Some(NodeId::new(1)) }
        set { result: Option<CompactionPlanResult> = None }
    }
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
