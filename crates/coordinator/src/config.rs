//! Coordinator configuration. Plain data with a `Default` matching the
//! spec's stated defaults; no on-disk state directory (persistence format
//! is out of scope).

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    /// Interval between reconciler ticks.
    pub check_interval: Duration,
    /// Timeout applied to individual worker RPCs.
    pub rpc_timeout: Duration,
    /// Process-wide cap on tasks in `{Pipelining, Executing}`.
    pub max_parallel_tasks: usize,
    /// Per-node admission queue capacity `P`.
    pub worker_parallel_tasks: usize,
    /// Interval between janitor sweeps.
    pub janitor_interval: Duration,
    /// Grace period added to `plan.timeout_seconds` before a terminal task
    /// is evicted by the janitor.
    pub task_retention: Duration,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            check_interval: Duration::from_secs(1),
            rpc_timeout: Duration::from_secs(10),
            max_parallel_tasks: 256,
            worker_parallel_tasks: 4,
            janitor_interval: Duration::from_secs(30 * 60),
            task_retention: Duration::from_secs(3600),
        }
    }
}
