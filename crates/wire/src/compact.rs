//! The `Compact` RPC request: the dispatcher's instruction to a worker to
//! start executing a plan.

use cc_core::{CompactionPlan, PlanId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompactRequest {
    pub plan_id: PlanId,
    pub plan: CompactionPlan,
}

impl CompactRequest {
    pub fn new(plan_id: PlanId, plan: CompactionPlan) -> Self {
        Self { plan_id, plan }
    }
}
