//! Coordinator-level error type. Wraps adapter errors transparently so call
//! sites can still match on cause, and adds the coordinator's own
//! precondition-violation variants.

use cc_adapters::{MetaError, RegistryError, SessionError, TimestampError};
use cc_core::{IllegalTransition, NodeId, PlanId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoordinatorError {
    #[error("plan {0} not found")]
    PlanNotFound(PlanId),

    #[error(transparent)]
    IllegalTransition(#[from] IllegalTransition),

    #[error("channel not watched by any worker")]
    ChannelNotWatched,

    #[error("channel is buffered, no worker owns it yet")]
    ChannelInBuffer,

    #[error("unknown compaction type for plan {0}")]
    UnknownCompactionType(PlanId),

    #[error("no admission slot available for node {0}")]
    NodeSaturated(NodeId),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Meta(#[from] MetaError),

    #[error(transparent)]
    Timestamp(#[from] TimestampError),
}

impl From<RegistryError> for CoordinatorError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::ChannelNotWatched => CoordinatorError::ChannelNotWatched,
            RegistryError::ChannelInBuffer => CoordinatorError::ChannelInBuffer,
        }
    }
}
