//! The response shape for `GetCompactionPlanResults`: a snapshot of every
//! plan the worker session layer currently knows about.

use cc_core::{CompactionPlanResult, NodeId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerReportedState {
    Executing,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerPlanState {
    pub node_id: NodeId,
    pub state: WorkerReportedState,
    /// Populated when `state == Completed`.
    pub result: Option<CompactionPlanResult>,
}

impl WorkerPlanState {
    pub fn executing(node_id: NodeId) -> Self {
        Self { node_id, state: WorkerReportedState::Executing, result: None }
    }

    pub fn completed(node_id: NodeId, result: CompactionPlanResult) -> Self {
        Self { node_id, state: WorkerReportedState::Completed, result: Some(result) }
    }
}
