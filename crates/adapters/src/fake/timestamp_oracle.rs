use crate::{TimestampError, TimestampOracle};
use async_trait::async_trait;
use cc_core::{Clock, FakeClock, LogicalTimestamp};
use parking_lot::Mutex;
use std::sync::Arc;

struct State {
    clock: FakeClock,
    logical: u32,
    fail_next: bool,
}

/// Timestamp oracle backed by a [`FakeClock`], so tests can advance time and
/// observe timeout behavior deterministically. The logical counter increments
/// on every successful allocation within the same millisecond, same as a real
/// oracle's tie-breaker.
#[derive(Clone)]
pub struct FakeTimestampOracle {
    state: Arc<Mutex<State>>,
}

impl FakeTimestampOracle {
    pub fn new(clock: FakeClock) -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                clock,
                logical: 0,
                fail_next: false,
            })),
        }
    }

    pub fn fail_next_alloc(&self) {
        self.state.lock().fail_next = true;
    }
}

#[async_trait]
impl TimestampOracle for FakeTimestampOracle {
    async fn alloc_timestamp(&self) -> Result<LogicalTimestamp, TimestampError> {
        let mut state = self.state.lock();
        if state.fail_next {
            state.fail_next = false;
            return Err(TimestampError("allocation failed".to_string()));
        }
        let physical = state.clock.epoch_ms();
        state.logical += 1;
        Ok(LogicalTimestamp::compose(physical, state.logical as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn allocates_timestamps_from_clock() {
        let clock = FakeClock::new(5_000);
        let oracle = FakeTimestampOracle::new(clock);
        let ts = oracle.alloc_timestamp().await.unwrap();
        assert_eq!(ts.physical_ms(), 5_000);
    }

    #[tokio::test]
    async fn fail_next_alloc_errors_once() {
        let clock = FakeClock::new(5_000);
        let oracle = FakeTimestampOracle::new(clock);
        oracle.fail_next_alloc();
        assert!(oracle.alloc_timestamp().await.is_err());
        assert!(oracle.alloc_timestamp().await.is_ok());
    }
}
