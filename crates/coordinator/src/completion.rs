//! Completion handler: commits a successful compaction's effect on
//! metadata, syncs the worker, and releases the task's resources.

use cc_adapters::{ChannelRegistry, MetaStore, TimestampOracle, WorkerSessions};
use cc_core::{Clock, CompactionPlanResult, NodeId, PlanId, TaskState};
use cc_wire::SyncSegmentsRequest;

use crate::error::CoordinatorError;
use crate::Coordinator;

impl<R, S, M, Ts, C> Coordinator<R, S, M, Ts, C>
where
    R: ChannelRegistry,
    S: WorkerSessions,
    M: MetaStore,
    Ts: TimestampOracle,
    C: Clock,
{
    /// Preconditions (plan exists, task is `Executing`, compaction
    /// type is supported) are checked first so an unsupported type never
    /// triggers a meta mutation or worker RPC.
    pub(crate) async fn complete(&self, plan_id: PlanId, node_id: NodeId, result: CompactionPlanResult) -> Result<(), CoordinatorError> {
        let task = self
            .table
            .get(plan_id)
            .ok_or(CoordinatorError::PlanNotFound(plan_id))?;
        if task.state != TaskState::Executing {
            return Err(CoordinatorError::IllegalTransition(cc_core::IllegalTransition {
                plan_id,
                from: task.state,
                to: TaskState::Completed,
            }));
        }
        if !task.plan.compaction_type.is_supported() {
            return Err(CoordinatorError::UnknownCompactionType(plan_id));
        }

        let (new_segment, mutation) = self.meta.complete_compaction_mutation(&task.plan, &result).await?;

        let sync_req = SyncSegmentsRequest::commit(
            plan_id,
            new_segment.id,
            new_segment.compaction_from.clone(),
            new_segment.num_rows,
            new_segment.stats_logs.clone(),
        );
        self.sessions.sync_segments(node_id, sync_req).await?;

        tracing::debug!(
            plan_id = %plan_id,
            segments_compacted = mutation.segments_compacted,
            rows_compacted = mutation.rows_compacted,
            "committed metric mutation"
        );

        self.table.complete(plan_id, result)?;
        self.stats.record_completed();
        self.flush.notify(new_segment.id);
        self.admission.release(plan_id);

        Ok(())
    }

    /// Instruct a worker to discard a plan it should not be running: either
    /// an affinity-mismatched completion or a wholly unknown plan. The
    /// worker is told to drop it without metadata effect.
    pub(crate) async fn discard_on_worker(&self, node_id: NodeId, plan_id: PlanId) -> Result<(), CoordinatorError> {
        self.sessions
            .sync_segments(node_id, SyncSegmentsRequest::discard(plan_id))
            .await?;
        Ok(())
    }
}
