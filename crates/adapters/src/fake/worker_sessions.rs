use crate::{SessionError, WorkerSessions};
use async_trait::async_trait;
use cc_core::{CompactionPlan, NodeId, PlanId};
use cc_wire::{SyncSegmentsRequest, WorkerPlanState};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// A call recorded against [`FakeWorkerSessions`], for assertions like "the
/// dispatcher called compact exactly once, on the expected node".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCall {
    Compact { node_id: NodeId, plan_id: PlanId },
    SyncSegments { node_id: NodeId, plan_id: PlanId },
    GetCompactionPlanResults,
}

#[derive(Default)]
struct State {
    results: HashMap<PlanId, WorkerPlanState>,
    calls: Vec<SessionCall>,
    fail_compact: Option<PlanId>,
    fail_sync_once: bool,
    fail_get_results_once: bool,
}

/// In-memory worker session layer. Tests seed worker-reported state with
/// [`FakeWorkerSessions::set_result`] to drive the reconciler, and use the
/// `fail_*` knobs to exercise the coordinator's RPC error-handling paths.
#[derive(Clone, Default)]
pub struct FakeWorkerSessions {
    state: Arc<Mutex<State>>,
}

impl FakeWorkerSessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_result(&self, plan_id: PlanId, result: WorkerPlanState) {
        self.state.lock().results.insert(plan_id, result);
    }

    pub fn remove_result(&self, plan_id: PlanId) {
        self.state.lock().results.remove(&plan_id);
    }

    pub fn calls(&self) -> Vec<SessionCall> {
        self.state.lock().calls.clone()
    }

    pub fn fail_next_compact(&self, plan_id: PlanId) {
        self.state.lock().fail_compact = Some(plan_id);
    }

    pub fn fail_next_sync_segments(&self) {
        self.state.lock().fail_sync_once = true;
    }

    pub fn fail_next_get_results(&self) {
        self.state.lock().fail_get_results_once = true;
    }
}

#[async_trait]
impl WorkerSessions for FakeWorkerSessions {
    async fn compact(
        &self,
        node_id: NodeId,
        plan_id: PlanId,
        _plan: &CompactionPlan,
    ) -> Result<(), SessionError> {
        let mut state = self.state.lock();
        state.calls.push(SessionCall::Compact { node_id, plan_id });
        if state.fail_compact == Some(plan_id) {
            state.fail_compact = None;
            return Err(SessionError::Rpc {
                node_id,
                message: "compact rejected".to_string(),
            });
        }
        Ok(())
    }

    async fn sync_segments(
        &self,
        node_id: NodeId,
        req: SyncSegmentsRequest,
    ) -> Result<(), SessionError> {
        let mut state = self.state.lock();
        state.calls.push(SessionCall::SyncSegments {
            node_id,
            plan_id: req.plan_id,
        });
        if state.fail_sync_once {
            state.fail_sync_once = false;
            return Err(SessionError::Timeout { node_id });
        }
        Ok(())
    }

    async fn get_compaction_plan_results(
        &self,
    ) -> Result<HashMap<PlanId, WorkerPlanState>, SessionError> {
        let mut state = self.state.lock();
        state.calls.push(SessionCall::GetCompactionPlanResults);
        if state.fail_get_results_once {
            state.fail_get_results_once = false;
            return Err(SessionError::Rpc {
                node_id: NodeId::new(0),
                message: "results unavailable".to_string(),
            });
        }
        Ok(state.results.clone())
    }
}
