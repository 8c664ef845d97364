//! Channel ownership registry: answers "which worker currently owns channel C?".

use cc_core::{ChannelName, NodeId};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("channel is not watched by any worker")]
    ChannelNotWatched,
    #[error("channel is buffered, no worker owns it yet")]
    ChannelInBuffer,
}

pub trait ChannelRegistry: Send + Sync {
    /// The worker currently responsible for `channel`, or an error if no
    /// worker watches it (yet, or at all).
    fn find_watcher(&self, channel: &ChannelName) -> Result<NodeId, RegistryError>;

    /// Whether `node` is still the channel's owner. Used by the reconciler's
    /// affinity check: a plan's result is only admitted if the target
    /// channel is still owned by the worker that produced it.
    fn matches(&self, node: NodeId, channel: &ChannelName) -> bool;
}
