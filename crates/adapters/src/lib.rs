#![cfg_attr(test, allow(clippy::unwrap_used))]

//! cc-adapters: traits for the coordinator's external collaborators, plus
//! in-memory fakes for testing.
//!
//! Every out-of-process collaborator the coordinator drives gets a trait
//! here rather than a concrete type: the channel ownership registry, the
//! worker session layer (RPC stubs), the metadata store, and the timestamp
//! oracle. Production implementations (gRPC clients, the real metadata
//! store) live outside this crate; only the trait boundary and test fakes
//! live here.

pub mod channel_registry;
pub mod flush;
pub mod meta_store;
pub mod timestamp_oracle;
pub mod worker_sessions;

pub use channel_registry::{ChannelRegistry, RegistryError};
pub use flush::FlushSink;
pub use meta_store::{MetaError, MetaStore};
pub use timestamp_oracle::{SystemTimestampOracle, TimestampError, TimestampOracle};
pub use worker_sessions::{SessionError, WorkerSessions};

#[cfg(feature = "test-support")]
pub mod fake;
