//! Per-node admission queues: a bounded counting semaphore per worker node,
//! created lazily on first use and never destroyed during process lifetime.
//!
//! Slot acquisition must not hold the task table lock, so this is its own
//! component with its own (short-lived) lock around semaphore creation.
//! Permits are tracked in a side table keyed by `PlanId` rather than stored
//! inside the `Task` record, since the task holding a permit shadow-clones
//! across lock boundaries while the permit itself must be released from a
//! different code path (the reconciler or completion handler).

use cc_core::{NodeId, PlanId};
use parking_lot::Mutex as PlMutex;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

struct Held {
    node_id: NodeId,
    _permit: OwnedSemaphorePermit,
}

pub struct AdmissionQueues {
    capacity: usize,
    semaphores: RwLock<HashMap<NodeId, Arc<Semaphore>>>,
    held: PlMutex<HashMap<PlanId, Held>>,
}

impl AdmissionQueues {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            semaphores: RwLock::new(HashMap::new()),
            held: PlMutex::new(HashMap::new()),
        }
    }

    fn semaphore_for(&self, node_id: NodeId) -> Arc<Semaphore> {
        if let Some(sem) = self.semaphores.read().get(&node_id) {
            return sem.clone();
        }
        let mut write = self.semaphores.write();
        write
            .entry(node_id)
            .or_insert_with(|| Arc::new(Semaphore::new(self.capacity)))
            .clone()
    }

    /// Block until a slot on `node_id` is free, then hold it against
    /// `plan_id` until [`AdmissionQueues::release`] is called. Blocks
    /// outside any table lock.
    #[allow(clippy::expect_used)]
    pub async fn acquire(&self, node_id: NodeId, plan_id: PlanId) {
        let sem = self.semaphore_for(node_id);
        let permit = sem
            .acquire_owned()
            .await
            .expect("admission semaphore is never closed");
        self.held.lock().insert(plan_id, Held { node_id, _permit: permit });
    }

    /// Release the slot held for `plan_id`. No-op if no slot is held — each
    /// plan must be released from exactly one of the completion, failure or
    /// timeout-failure paths, but this method itself tolerates being called
    /// on a plan with no permit.
    pub fn release(&self, plan_id: PlanId) {
        self.held.lock().remove(&plan_id);
    }

    /// Number of slots currently held against `node_id`. Used by tests
    /// asserting invariant 3 (admission in-use count tracks active tasks).
    pub fn in_use(&self, node_id: NodeId) -> usize {
        self.held.lock().values().filter(|h| h.node_id == node_id).count()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
#[path = "admission_tests.rs"]
mod tests;
