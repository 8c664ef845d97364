//! Timestamp oracle: monotonic logical timestamp allocator.

use async_trait::async_trait;
use cc_core::{Clock, LogicalTimestamp};
use parking_lot::Mutex;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("timestamp allocation failed: {0}")]
pub struct TimestampError(pub String);

#[async_trait]
pub trait TimestampOracle: Send + Sync {
    async fn alloc_timestamp(&self) -> Result<LogicalTimestamp, TimestampError>;
}

/// A timestamp oracle local to this process: allocates `(clock.epoch_ms(),
/// logical)` pairs, resetting the logical counter whenever the millisecond
/// advances. Adequate for a single-node deployment; a real cluster would
/// front a shared TSO service instead, which is why this lives behind the
/// same trait as [`crate::fake::FakeTimestampOracle`].
pub struct SystemTimestampOracle<C> {
    clock: C,
    state: Mutex<(u64, u64)>,
}

impl<C: Clock> SystemTimestampOracle<C> {
    pub fn new(clock: C) -> Self {
        Self { clock, state: Mutex::new((0, 0)) }
    }
}

#[async_trait]
impl<C: Clock> TimestampOracle for SystemTimestampOracle<C> {
    async fn alloc_timestamp(&self) -> Result<LogicalTimestamp, TimestampError> {
        let physical = self.clock.epoch_ms();
        let mut state = self.state.lock();
        let logical = if state.0 == physical { state.1 + 1 } else { 1 };
        *state = (physical, logical);
        Ok(LogicalTimestamp::compose(physical, logical))
    }
}
