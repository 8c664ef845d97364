//! Dispatcher: the asynchronous phase of `submit`, run as a detached task
//! with no table lock held across any of its suspension points.

use cc_adapters::{ChannelRegistry, MetaStore, TimestampOracle, WorkerSessions};
use cc_core::{Clock, NodeId, PlanId, TaskState, TS_TIMEOUT};

use crate::Coordinator;

impl<R, S, M, Ts, C> Coordinator<R, S, M, Ts, C>
where
    R: ChannelRegistry,
    S: WorkerSessions,
    M: MetaStore,
    Ts: TimestampOracle,
    C: Clock,
{
    /// Acquire an admission slot, allocate a start
    /// timestamp, and start execution on the worker. Runs detached from
    /// `submit`; errors are only observable through task state.
    pub(crate) async fn dispatch(&self, plan_id: PlanId, worker_node_id: NodeId) {
        self.admission.acquire(worker_node_id, plan_id).await;

        let start_time = match self.timestamps.alloc_timestamp().await {
            Ok(ts) => ts,
            Err(err) => {
                tracing::warn!(
                    plan_id = %plan_id,
                    node_id = %worker_node_id,
                    error = %err,
                    "timestamp allocation failed, marking plan for immediate timeout"
                );
                TS_TIMEOUT
            }
        };

        if let Err(err) = self.table.set_start_time(plan_id, start_time) {
            tracing::warn!(plan_id = %plan_id, error = %err, "dispatch: plan vanished before start time could be recorded");
            return;
        }

        let plan = match self.table.get(plan_id) {
            Some(task) => task.plan,
            None => return,
        };

        if start_time != TS_TIMEOUT {
            if let Err(err) = self.sessions.compact(worker_node_id, plan_id, &plan).await {
                tracing::warn!(
                    plan_id = %plan_id,
                    node_id = %worker_node_id,
                    error = %err,
                    "compact rpc failed, reconciler will observe missing worker state"
                );
            }
        }

        // Transition to Executing regardless of RPC outcome:
        // a failed RPC call is caught by the reconciler observing that the
        // worker has no record of the plan.
        if let Err(err) = self
            .table
            .transition(plan_id, |t| Ok(t.with_state(TaskState::Executing)?))
        {
            tracing::warn!(plan_id = %plan_id, error = %err, "dispatch: could not transition to executing");
        }
    }
}
