//! The `SyncSegments` RPC request: tells a worker to either commit a
//! completed plan's result (`compacted_to` set) or discard it without
//! metadata effect (`compacted_to` absent).

use cc_core::{PlanId, SegmentId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncSegmentsRequest {
    pub plan_id: PlanId,
    pub compacted_to: Option<SegmentId>,
    pub compacted_from: Vec<SegmentId>,
    pub num_rows: Option<u64>,
    pub stats_logs: Option<Vec<String>>,
}

impl SyncSegmentsRequest {
    /// Instructs the worker to discard the plan's result without any
    /// metadata effect — used both for affinity-mismatch cleanup and for
    /// unknown-plan cleanup.
    pub fn discard(plan_id: PlanId) -> Self {
        Self {
            plan_id,
            compacted_to: None,
            compacted_from: Vec::new(),
            num_rows: None,
            stats_logs: None,
        }
    }

    /// Instructs the worker to commit the given result.
    pub fn commit(
        plan_id: PlanId,
        compacted_to: SegmentId,
        compacted_from: Vec<SegmentId>,
        num_rows: u64,
        stats_logs: Vec<String>,
    ) -> Self {
        Self {
            plan_id,
            compacted_to: Some(compacted_to),
            compacted_from,
            num_rows: Some(num_rows),
            stats_logs: Some(stats_logs),
        }
    }

    pub fn is_discard(&self) -> bool {
        self.compacted_to.is_none()
    }
}

#[cfg(test)]
#[path = "sync_segments_tests.rs"]
mod tests;
