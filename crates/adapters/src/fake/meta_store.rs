use crate::{MetaError, MetaStore, MetricMutation};
use async_trait::async_trait;
use cc_core::{CompactionPlan, CompactionPlanResult, NewSegment, PlanId, SegmentId};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

#[derive(Default)]
struct State {
    compacting: HashSet<SegmentId>,
    committed: HashMap<PlanId, (NewSegment, MetricMutation)>,
    commit_count: u64,
    fail_next_commit: bool,
}

/// In-memory metadata store. Commits are deduplicated by `plan_id`, so
/// replaying the same `(plan, result)` pair twice counts as one commit —
/// exercising the completion handler's idempotence requirement without a
/// real metadata backend.
#[derive(Clone, Default)]
pub struct FakeMetaStore {
    state: Arc<Mutex<State>>,
}

impl FakeMetaStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_compacting(&self, segment_id: SegmentId) -> bool {
        self.state.lock().compacting.contains(&segment_id)
    }

    /// Number of distinct plans actually committed (replays of an
    /// already-committed plan do not increment this).
    pub fn commit_count(&self) -> u64 {
        self.state.lock().commit_count
    }

    pub fn fail_next_commit(&self) {
        self.state.lock().fail_next_commit = true;
    }
}

#[async_trait]
impl MetaStore for FakeMetaStore {
    async fn set_segment_compacting(&self, segment_id: SegmentId, compacting: bool) -> Result<(), MetaError> {
        let mut state = self.state.lock();
        if compacting {
            state.compacting.insert(segment_id);
        } else {
            state.compacting.remove(&segment_id);
        }
        Ok(())
    }

    async fn complete_compaction_mutation(
        &self,
        _plan: &CompactionPlan,
        result: &CompactionPlanResult,
    ) -> Result<(NewSegment, MetricMutation), MetaError> {
        let mut state = self.state.lock();
        if let Some(cached) = state.committed.get(&result.plan_id) {
            return Ok(cached.clone());
        }
        if state.fail_next_commit {
            state.fail_next_commit = false;
            return Err(MetaError::Mutation("commit rejected".to_string()));
        }
        let mutation = MetricMutation {
            segments_compacted: 1,
            rows_compacted: result.new_segment.num_rows,
        };
        let entry = (result.new_segment.clone(), mutation);
        state.committed.insert(result.plan_id, entry.clone());
        state.commit_count += 1;
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cc_core::CompactionType;

    fn sample(plan_id: PlanId) -> (CompactionPlan, CompactionPlanResult) {
        let plan = CompactionPlan::new("ch-1".to_string(), vec![], CompactionType::Merge, 60);
        let result = CompactionPlanResult {
            plan_id,
            new_segment: NewSegment {
                id: SegmentId::new(100),
                compaction_from: vec![SegmentId::new(1)],
                num_rows: 42,
                stats_logs: vec![],
            },
        };
        (plan, result)
    }

    #[tokio::test]
    async fn replaying_same_plan_commits_once() {
        let store = FakeMetaStore::new();
        let (plan, result) = sample(PlanId::new(5));
        store.complete_compaction_mutation(&plan, &result).await.unwrap();
        store.complete_compaction_mutation(&plan, &result).await.unwrap();
        assert_eq!(store.commit_count(), 1);
    }

    #[tokio::test]
    async fn fail_next_commit_returns_error_once() {
        let store = FakeMetaStore::new();
        let (plan, result) = sample(PlanId::new(5));
        store.fail_next_commit();
        assert!(store.complete_compaction_mutation(&plan, &result).await.is_err());
        assert!(store.complete_compaction_mutation(&plan, &result).await.is_ok());
    }

    #[tokio::test]
    async fn set_segment_compacting_toggles_membership() {
        let store = FakeMetaStore::new();
        store.set_segment_compacting(SegmentId::new(1), true).await.unwrap();
        assert!(store.is_compacting(SegmentId::new(1)));
        store.set_segment_compacting(SegmentId::new(1), false).await.unwrap();
        assert!(!store.is_compacting(SegmentId::new(1)));
    }
}
