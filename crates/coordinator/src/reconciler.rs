//! Reconciler: the periodic tick that compares coordinator memory against
//! worker-reported state.

use std::collections::{HashMap, HashSet};

use cc_adapters::{ChannelRegistry, MetaStore, TimestampOracle, WorkerSessions};
use cc_core::{is_timeout, Clock, PlanId, TaskState};
use cc_wire::{WorkerPlanState, WorkerReportedState};

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
    /// `now` is passed explicitly so tests (and the lifecycle tick
    /// loop) control its source.
    pub async fn reconcile(&self, now: u64) -> Result<(), CoordinatorError> {
        let executing = self.table.by_state(TaskState::Executing);
        let timed_out = self.table.by_state(TaskState::Timeout);

        // Pulled before any mutation below, to avoid racing new submissions.
        let worker_results = self.sessions.get_compaction_plan_results().await?;

        let mut seen: HashSet<PlanId> = HashSet::new();

        for task in &executing {
            seen.insert(task.plan_id);
            let node_id = match task.worker_node_id {
                Some(id) => id,
                None => continue,
            };
            match worker_results.get(&task.plan_id) {
                None => {
                    tracing::info!(plan_id = %task.plan_id, node_id = %node_id, "worker has no record of executing plan, failing");
                    self.fail_and_release(task.plan_id).await?;
                }
                Some(reported) => match reported.state {
                    WorkerReportedState::Completed => {
                        self.handle_completed_report(task.plan_id, node_id, reported).await?;
                    }
                    WorkerReportedState::Executing => {
                        if is_timeout(now, task.plan.start_time, task.plan.timeout_seconds) {
                            tracing::info!(plan_id = %task.plan_id, node_id = %node_id, "plan timed out, marking Timeout");
                            // Compacting flags and the admission slot stay
                            // held: the worker is still running and must
                            // report terminal state before either is released.
                            self.table.transition(task.plan_id, |t| Ok(t.with_state(TaskState::Timeout)?))?;
                            self.stats.record_timed_out();
                        }
                    }
                },
            }
        }

        for task in &timed_out {
            seen.insert(task.plan_id);
            match worker_results.get(&task.plan_id) {
                Some(reported) if reported.state == WorkerReportedState::Executing => {
                    tracing::debug!(plan_id = %task.plan_id, "worker still executing a timed-out plan, waiting");
                }
                _ => {
                    tracing::info!(plan_id = %task.plan_id, "timed-out plan no longer reported by worker, failing");
                    self.fail_and_release(task.plan_id).await?;
                }
            }
        }

        self.discard_unknown_completed(&worker_results, &seen).await?;

        Ok(())
    }

    async fn handle_completed_report(&self, plan_id: PlanId, node_id: cc_core::NodeId, reported: &WorkerPlanState) -> Result<(), CoordinatorError> {
        let task = match self.table.get(plan_id) {
            Some(t) => t,
            None => return Ok(()),
        };

        if !self.channels.matches(node_id, &task.plan.channel) {
            // Known ambiguity: this marks the task Failed for the
            // affinity mismatch and then still attempts completion, which
            // fails its own precondition check and is discarded below.
            // Preserved deliberately rather than `return`-ing early.
            tracing::warn!(plan_id = %plan_id, node_id = %node_id, channel = %task.plan.channel, "channel affinity mismatch, discarding worker result");
            self.discard_on_worker(node_id, plan_id).await?;
            self.fail_and_release(plan_id).await?;
        }

        let result = match &reported.result {
            Some(result) => result.clone(),
            None => return Ok(()),
        };
        if let Err(err) = self.complete(plan_id, node_id, result).await {
            tracing::warn!(plan_id = %plan_id, error = %err, "completion handler error, leaving plan Executing for a later tick");
        }
        Ok(())
    }

    async fn discard_unknown_completed(&self, worker_results: &HashMap<PlanId, WorkerPlanState>, seen: &HashSet<PlanId>) -> Result<(), CoordinatorError> {
        for (plan_id, reported) in worker_results {
            if reported.state != WorkerReportedState::Completed || seen.contains(plan_id) {
                continue;
            }
            tracing::info!(plan_id = %plan_id, node_id = %reported.node_id, "unknown completed plan reported by worker, instructing discard");
            self.discard_on_worker(reported.node_id, *plan_id).await?;
        }
        Ok(())
    }

    /// Common tail of every non-success terminal transition: fail the task,
    /// release its admission slot, and clear its segments' compacting flags
    /// (invariant 4).
    async fn fail_and_release(&self, plan_id: PlanId) -> Result<(), CoordinatorError> {
        let segment_ids: Vec<_> = self
            .table
            .get(plan_id)
            .map(|t| t.plan.segment_ids().collect())
            .unwrap_or_default();

        self.table.transition(plan_id, |t| Ok(t.with_state(TaskState::Failed)?))?;
        self.stats.record_failed();
        self.admission.release(plan_id);

        for segment_id in segment_ids {
            if let Err(err) = self.meta.set_segment_compacting(segment_id, false).await {
                tracing::warn!(plan_id = %plan_id, segment_id = %segment_id, error = %err, "failed to clear compacting flag");
            }
        }
        Ok(())
    }
}
