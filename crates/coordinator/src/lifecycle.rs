//! The `Coordinator` facade: wires the task table, admission queues and
//! adapter collaborators together, and owns the two long-lived background
//! ticks (reconciler, janitor).

use std::sync::Arc;

use cc_adapters::{ChannelRegistry, FlushSink, MetaStore, TimestampOracle, WorkerSessions};
use cc_core::{Clock, CompactionPlan, PlanId, SignalId, Task, TaskState, TriggerInfo};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::admission::AdmissionQueues;
use crate::config::CoordinatorConfig;
use crate::error::CoordinatorError;
use crate::stats::{Stats, StatsSnapshot};
use crate::task_table::TaskTable;

/// The compaction plan coordinator. Generic over its four out-of-process
/// collaborators and the clock, so tests wire in-memory fakes and
/// production wires real adapters without either side depending on the
/// other's concrete type.
pub struct Coordinator<R, S, M, Ts, C> {
    pub(crate) config: CoordinatorConfig,
    pub(crate) channels: R,
    pub(crate) sessions: S,
    pub(crate) meta: M,
    pub(crate) timestamps: Ts,
    pub(crate) clock: C,
    pub(crate) table: TaskTable,
    pub(crate) admission: AdmissionQueues,
    pub(crate) flush: FlushSink,
    pub(crate) stats: Stats,
    ticks: CancellationToken,
    handles: parking_lot::Mutex<Vec<JoinHandle<()>>>,
}

impl<R, S, M, Ts, C> Coordinator<R, S, M, Ts, C>
where
    R: ChannelRegistry + 'static,
    S: WorkerSessions + 'static,
    M: MetaStore + 'static,
    Ts: TimestampOracle + 'static,
    C: Clock,
{
    pub fn new(
        config: CoordinatorConfig,
        channels: R,
        sessions: S,
        meta: M,
        timestamps: Ts,
        clock: C,
        flush: FlushSink,
    ) -> Arc<Self> {
        let admission = AdmissionQueues::new(config.worker_parallel_tasks);
        Arc::new(Self {
            config,
            channels,
            sessions,
            meta,
            timestamps,
            clock,
            table: TaskTable::new(),
            admission,
            flush,
            stats: Stats::new(),
            ticks: CancellationToken::new(),
            handles: parking_lot::Mutex::new(Vec::new()),
        })
    }

    /// Synchronous phase: look up the channel owner, mark segments
    /// compacting, install the `Pipelining` task, then hand off to the
    /// detached dispatcher. Returns as soon as the task is installed.
    ///
    /// `plan_id` is minted upstream by the trigger/planner, not by the
    /// coordinator.
    pub async fn submit(
        self: &Arc<Self>,
        plan_id: PlanId,
        signal_id: SignalId,
        plan: CompactionPlan,
    ) -> Result<(), CoordinatorError> {
        let worker_node_id = self.channels.find_watcher(&plan.channel)?;

        for segment_id in plan.segment_ids() {
            self.meta.set_segment_compacting(segment_id, true).await?;
        }

        let task = Task::new(plan_id, TriggerInfo::new(signal_id), plan, worker_node_id);
        self.table.install(task);
        self.stats.record_submitted();

        tracing::info!(plan_id = %plan_id, node_id = %worker_node_id, "plan submitted");

        let this = Arc::clone(self);
        tokio::spawn(async move {
            this.dispatch(plan_id, worker_node_id).await;
        });

        Ok(())
    }

    pub fn get(&self, plan_id: PlanId) -> Option<Task> {
        self.table.get(plan_id)
    }

    pub fn by_state(&self, state: TaskState) -> Vec<Task> {
        self.table.by_state(state)
    }

    pub fn by_signal(&self, signal_id: SignalId) -> Vec<Task> {
        self.table.by_signal(signal_id)
    }

    /// `executing_count >= max_parallel_tasks`, read-locked.
    pub fn is_full(&self) -> bool {
        self.table.is_full(self.config.max_parallel_tasks)
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    pub fn admission_in_use(&self, node_id: cc_core::NodeId) -> usize {
        self.admission.in_use(node_id)
    }

    /// Launches the reconciler and janitor ticks as independent
    /// background tasks, each using a coalescing interval (a slow tick is
    /// skipped rather than queued).
    pub fn start(self: &Arc<Self>) {
        let reconcile_handle = {
            let this = Arc::clone(self);
            let token = self.ticks.clone();
            let mut interval = tokio::time::interval(self.config.check_interval);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            tokio::spawn(async move {
                loop {
                    tokio::select! {
                        _ = token.cancelled() => break,
                        _ = interval.tick() => {
                            let now = this.clock.epoch_ms();
                            if let Err(err) = this.reconcile(now).await {
                                tracing::warn!(error = %err, "reconciler tick failed, retrying next tick");
                            }
                        }
                    }
                }
            })
        };

        let janitor_handle = {
            let this = Arc::clone(self);
            let token = self.ticks.clone();
            let mut interval = tokio::time::interval(self.config.janitor_interval);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            tokio::spawn(async move {
                loop {
                    tokio::select! {
                        _ = token.cancelled() => break,
                        _ = interval.tick() => {
                            let now = this.clock.epoch_ms();
                            this.clean(now);
                        }
                    }
                }
            })
        };

        let mut handles = self.handles.lock();
        handles.push(reconcile_handle);
        handles.push(janitor_handle);
    }

    /// Signals both background ticks to stop and waits for them to
    /// finish before returning.
    pub async fn stop(&self) {
        self.ticks.cancel();
        let handles: Vec<_> = self.handles.lock().drain(..).collect();
        for handle in handles {
            let _ = handle.await;
        }
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
