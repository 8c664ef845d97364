//! The outcome of a successfully executed compaction, as reported by a
//! worker and committed by the completion handler.

use crate::ids::{PlanId, SegmentId};
use serde::{Deserialize, Serialize};

/// The segment a compaction produced, replacing `compaction_from`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSegment {
    pub id: SegmentId,
    pub compaction_from: Vec<SegmentId>,
    pub num_rows: u64,
    pub stats_logs: Vec<String>,
}

/// A worker-reported compaction outcome, keyed by the plan it resulted from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompactionPlanResult {
    pub plan_id: PlanId,
    pub new_segment: NewSegment,
}
