//! In-memory fake adapters for testing.
//!
//! Gated behind the `test-support` feature, mirroring the reference
//! codebase's `FakeSessionAdapter`/`FakeAgentAdapter` pattern: `Arc<Mutex<_>>`
//! state, a recorded call log, and small injectable-failure knobs so tests
//! can drive every branch in the error-handling table without a real RPC
//! layer.
#![cfg_attr(coverage_nightly, coverage(off))]

pub mod channel_registry;
pub mod meta_store;
pub mod timestamp_oracle;
pub mod worker_sessions;

pub use channel_registry::FakeChannelRegistry;
pub use meta_store::FakeMetaStore;
pub use timestamp_oracle::FakeTimestampOracle;
pub use worker_sessions::{FakeWorkerSessions, SessionCall};
