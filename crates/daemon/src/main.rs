//! Compaction coordinator daemon (ccd).
//!
//! Wires a [`cc_coordinator::Coordinator`] to its external collaborators and
//! runs the reconciler/janitor ticks until shut down. The worker session
//! layer, channel registry and metadata store are out of scope for this
//! repository (they front a real cluster's RPC and storage layers), so this
//! binary wires the in-memory fakes from `cc-adapters` — a real deployment
//! swaps those adapters for gRPC/etcd-backed ones without touching
//! `cc-coordinator` itself.

use std::sync::Arc;

use cc_adapters::fake::{FakeChannelRegistry, FakeMetaStore, FakeWorkerSessions};
use cc_adapters::{FlushSink, SystemTimestampOracle};
use cc_core::SystemClock;
use cc_coordinator::{Coordinator, CoordinatorConfig};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

type DaemonCoordinator = Coordinator<
    FakeChannelRegistry,
    FakeWorkerSessions,
    FakeMetaStore,
    SystemTimestampOracle<SystemClock>,
    SystemClock,
>;

#[tokio::main]
async fn main() {
    setup_logging();

    let config = CoordinatorConfig::default();
    let (flush, mut flush_rx) = FlushSink::channel();
    let coordinator: Arc<DaemonCoordinator> = Coordinator::new(
        config,
        FakeChannelRegistry::new(),
        FakeWorkerSessions::new(),
        FakeMetaStore::new(),
        SystemTimestampOracle::new(SystemClock),
        SystemClock,
        flush,
    );

    tokio::spawn(async move {
        while let Some(segment_id) = flush_rx.recv().await {
            info!(segment_id = %segment_id, "segment ready for flush");
        }
    });

    coordinator.start();
    info!("coordinator started");

    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to install ctrl-c handler, shutting down anyway");
    }

    info!("shutdown requested, stopping coordinator ticks");
    coordinator.stop().await;
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry().with(filter).with(fmt::layer()).init();
}
