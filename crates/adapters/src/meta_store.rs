//! Metadata store: holds segment state. Out of scope (persistence format is
//! a non-goal); this is only the trait boundary the coordinator calls
//! through.

use async_trait::async_trait;
use cc_core::{CompactionPlan, CompactionPlanResult, NewSegment, SegmentId};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum MetaError {
    #[error("segment {segment_id} not found")]
    SegmentNotFound { segment_id: SegmentId },
    #[error("meta mutation failed: {0}")]
    Mutation(String),
}

/// A metric delta produced by committing a compaction. The coordinator
/// treats this opaquely — it only has to commit it after the metadata
/// mutation and worker sync both succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricMutation {
    pub segments_compacted: u64,
    pub rows_compacted: u64,
}

#[async_trait]
pub trait MetaStore: Send + Sync {
    /// Mark or unmark a segment as currently referenced by a compaction.
    async fn set_segment_compacting(&self, segment_id: SegmentId, compacting: bool) -> Result<(), MetaError>;

    /// Commit a successful compaction's effect on segment metadata.
    ///
    /// Must be idempotent on replay of the same `(plan, result)` pair: the
    /// completion handler may call this more than once for the same plan if
    /// the subsequent worker sync fails and a later tick retries.
    async fn complete_compaction_mutation(
        &self,
        plan: &CompactionPlan,
        result: &CompactionPlanResult,
    ) -> Result<(NewSegment, MetricMutation), MetaError>;
}
