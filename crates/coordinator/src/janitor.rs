//! Janitor: periodic cleanup of terminal tasks old enough to forget.

use cc_adapters::{ChannelRegistry, MetaStore, TimestampOracle, WorkerSessions};
use cc_core::{is_timeout, Clock};

use crate::Coordinator;

impl<R, S, M, Ts, C> Coordinator<R, S, M, Ts, C>
where
    R: ChannelRegistry,
    S: WorkerSessions,
    M: MetaStore,
    Ts: TimestampOracle,
    C: Clock,
{
    /// Evicts every terminal task whose plan started at least
    /// `timeout_seconds + task_retention` ago. Reuses the timeout predicate
    /// with an inflated threshold rather than duplicating the logical
    /// timestamp arithmetic.
    pub fn clean(&self, now: u64) -> usize {
        let retention_secs = self.config.task_retention.as_secs() as u32;
        let evicted = self.table.evict_if(|task| {
            let threshold = task.plan.timeout_seconds.saturating_add(retention_secs);
            is_timeout(now, task.plan.start_time, threshold)
        });
        if evicted > 0 {
            tracing::info!(evicted, "janitor evicted terminal tasks");
        }
        evicted
    }
}
