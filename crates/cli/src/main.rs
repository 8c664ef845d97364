//! `cc` — a minimal operator CLI over a [`cc_coordinator::Coordinator`].
//!
//! The coordinator has no persistence and no RPC surface of its own (both
//! out of scope), so there is nothing today for this binary to dial into a
//! *running* `ccd` process. Instead each invocation stands up its own
//! in-process coordinator wired with the same in-memory fakes the daemon
//! binary uses, seeds it with a handful of watched channels, runs the
//! requested operation, and prints the result. It exists to give operators
//! a way to exercise `submit` / `get` / `by-signal` / `is-full` without a
//! worker cluster, the way the reference CLI wraps its daemon's facade.

use anyhow::{bail, Result};
use cc_adapters::fake::{FakeChannelRegistry, FakeMetaStore, FakeTimestampOracle, FakeWorkerSessions};
use cc_adapters::FlushSink;
use cc_core::{ChannelName, CompactionPlan, CompactionType, FakeClock, NodeId, PlanId, SegmentBinlogs, SegmentId, SignalId, TaskState};
use cc_coordinator::{Coordinator, CoordinatorConfig};
use clap::{Parser, Subcommand};

type DemoCoordinator =
    Coordinator<FakeChannelRegistry, FakeWorkerSessions, FakeMetaStore, FakeTimestampOracle, FakeClock>;

#[derive(Parser)]
#[command(name = "cc", about = "Operate a compaction plan coordinator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Submit a compaction plan for a channel, segment IDs separated by commas.
    Submit {
        #[arg(long)]
        plan_id: i64,
        #[arg(long)]
        signal_id: i64,
        #[arg(long)]
        channel: String,
        #[arg(long, value_delimiter = ',')]
        segments: Vec<i64>,
        #[arg(long, default_value_t = 120)]
        timeout_secs: i64,
    },
    /// Look up a single plan by ID.
    Get {
        #[arg(long)]
        plan_id: i64,
    },
    /// List every plan raised by a given trigger signal.
    BySignal {
        #[arg(long)]
        signal_id: i64,
    },
    /// Report whether the coordinator is at its parallel-task cap.
    IsFull,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let coordinator = demo_coordinator();

    match cli.command {
        Command::Submit { plan_id, signal_id, channel, segments, timeout_secs } => {
            if segments.is_empty() {
                bail!("--segments must name at least one segment id");
            }
            let plan = CompactionPlan::new(
                ChannelName::new(&channel),
                segments.into_iter().map(|id| SegmentBinlogs::new(SegmentId::new(id))).collect(),
                CompactionType::Merge,
                timeout_secs,
            );
            coordinator.submit(PlanId::new(plan_id), SignalId::new(signal_id), plan).await?;
            // submit() only installs the Pipelining task synchronously and hands
            // dispatch off to a detached task; give it a moment to run before we
            // print anything, since this process exits right after.
            for _ in 0..50 {
                if coordinator.get(PlanId::new(plan_id)).map(|t| t.state) != Some(TaskState::Pipelining) {
                    break;
                }
                tokio::task::yield_now().await;
            }
            print_task(&coordinator, PlanId::new(plan_id));
        }
        Command::Get { plan_id } => print_task(&coordinator, PlanId::new(plan_id)),
        Command::BySignal { signal_id } => {
            let tasks = coordinator.by_signal(SignalId::new(signal_id));
            println!("{}", serde_json::to_string_pretty(&tasks)?);
        }
        Command::IsFull => println!("{}", coordinator.is_full()),
    }

    Ok(())
}

#[allow(clippy::expect_used)]
fn print_task(coordinator: &DemoCoordinator, plan_id: PlanId) {
    match coordinator.get(plan_id) {
        Some(task) => println!("{}", serde_json::to_string_pretty(&task).expect("task is serializable")),
        None => println!("plan {plan_id} not found"),
    }
}

/// A small fixed cluster: two nodes each owning one channel, enough to
/// submit and dispatch a plan end to end without a real worker fleet.
fn demo_coordinator() -> std::sync::Arc<DemoCoordinator> {
    let registry = FakeChannelRegistry::new();
    registry.set_owner(ChannelName::new("ch-0"), NodeId::new(0));
    registry.set_owner(ChannelName::new("ch-1"), NodeId::new(1));

    let (flush, _flush_rx) = FlushSink::channel();
    Coordinator::new(
        CoordinatorConfig::default(),
        registry,
        FakeWorkerSessions::new(),
        FakeMetaStore::new(),
        FakeTimestampOracle::new(FakeClock::default()),
        FakeClock::default(),
        flush,
    )
}
