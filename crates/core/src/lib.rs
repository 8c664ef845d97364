#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cc-core: shared domain types for the compaction plan coordinator.
//!
//! This crate holds the data model only — plan/task/result types, identifier
//! newtypes, the logical timestamp format, and the clock abstraction. The
//! task table, admission control, and the dispatch/reconcile/complete/clean
//! state machine live in `cc-coordinator`.

pub mod macros;

pub mod clock;
pub mod ids;
pub mod plan;
pub mod result;
pub mod task;
pub mod timestamp;

pub use clock::{Clock, FakeClock, SystemClock};
pub use ids::{ChannelName, NodeId, PlanId, SegmentId, SignalId};
pub use plan::{CompactionPlan, CompactionType, SegmentBinlogs};
pub use result::{CompactionPlanResult, NewSegment};
pub use task::{IllegalTransition, Task, TaskState, TriggerInfo};
#[cfg(any(test, feature = "test-support"))]
pub use task::TaskBuilder;
pub use timestamp::{is_timeout, LogicalTimestamp, TS_TIMEOUT};
