//! Worker session layer: the RPC stubs the coordinator calls on storage
//! worker nodes.

use async_trait::async_trait;
use cc_core::{NodeId, PlanId};
use cc_wire::{SyncSegmentsRequest, WorkerPlanState};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum SessionError {
    #[error("rpc to node {node_id} timed out")]
    Timeout { node_id: NodeId },
    #[error("rpc to node {node_id} failed: {message}")]
    Rpc { node_id: NodeId, message: String },
}

#[async_trait]
pub trait WorkerSessions: Send + Sync {
    /// Start executing `plan` on `node_id`. The dispatcher transitions the
    /// task to `Executing` regardless of whether this call succeeds.
    async fn compact(
        &self,
        node_id: NodeId,
        plan_id: PlanId,
        plan: &cc_core::CompactionPlan,
    ) -> Result<(), SessionError>;

    /// Commit or discard a plan's result on the worker.
    async fn sync_segments(
        &self,
        node_id: NodeId,
        req: SyncSegmentsRequest,
    ) -> Result<(), SessionError>;

    /// Snapshot of every plan the worker session layer currently knows
    /// about, across all nodes.
    async fn get_compaction_plan_results(
        &self,
    ) -> Result<HashMap<PlanId, WorkerPlanState>, SessionError>;
}
