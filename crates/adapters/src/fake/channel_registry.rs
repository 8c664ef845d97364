use crate::{ChannelRegistry, RegistryError};
use cc_core::{ChannelName, NodeId};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

#[derive(Default)]
struct State {
    owners: HashMap<ChannelName, NodeId>,
    buffered: HashSet<ChannelName>,
}

/// In-memory channel ownership map. Tests drive ownership directly with
/// [`FakeChannelRegistry::set_owner`] and [`FakeChannelRegistry::evict`]
/// instead of going through a real watch-assignment protocol.
#[derive(Clone, Default)]
pub struct FakeChannelRegistry {
    state: Arc<Mutex<State>>,
}

impl FakeChannelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_owner(&self, channel: impl Into<ChannelName>, node_id: NodeId) {
        let channel = channel.into();
        let mut state = self.state.lock();
        state.buffered.remove(&channel);
        state.owners.insert(channel, node_id);
    }

    /// Mark a channel as buffered (no owner yet) rather than simply unwatched.
    pub fn buffer(&self, channel: impl Into<ChannelName>) {
        let channel = channel.into();
        let mut state = self.state.lock();
        state.owners.remove(&channel);
        state.buffered.insert(channel);
    }

    pub fn evict(&self, channel: &ChannelName) {
        let mut state = self.state.lock();
        state.owners.remove(channel);
        state.buffered.remove(channel);
    }
}

impl ChannelRegistry for FakeChannelRegistry {
    fn find_watcher(&self, channel: &ChannelName) -> Result<NodeId, RegistryError> {
        let state = self.state.lock();
        if let Some(node_id) = state.owners.get(channel) {
            return Ok(*node_id);
        }
        if state.buffered.contains(channel) {
            return Err(RegistryError::ChannelInBuffer);
        }
        Err(RegistryError::ChannelNotWatched)
    }

    fn matches(&self, node: NodeId, channel: &ChannelName) -> bool {
        self.state.lock().owners.get(channel) == Some(&node)
    }
}
