//! cc-wire: wire types for the worker RPCs the coordinator consumes.
//!
//! These are the serde-serializable request/response shapes that sit at the
//! boundary between the coordinator and the (out of scope) worker session
//! layer — concrete payloads instead of opaque tuples, so the adapter trait
//! boundary in `cc-adapters` is testable on its own.

pub mod compact;
pub mod sync_segments;
pub mod worker_state;

pub use compact::CompactRequest;
pub use sync_segments::SyncSegmentsRequest;
pub use worker_state::{WorkerPlanState, WorkerReportedState};
