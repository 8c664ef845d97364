//! End-to-end scenarios exercising `cc-coordinator` through its public API
//! only, wired with `cc-adapters`' fakes the way a real deployment would
//! wire gRPC/etcd-backed adapters.

use cc_adapters::fake::{FakeChannelRegistry, FakeMetaStore, FakeTimestampOracle, FakeWorkerSessions};
use cc_adapters::FlushSink;
use cc_core::{
    ChannelName, CompactionPlan, CompactionPlanResult, CompactionType, FakeClock, NewSegment, NodeId,
    PlanId, SegmentBinlogs, SegmentId, SignalId, TaskState,
};
use cc_coordinator::{Coordinator, CoordinatorConfig};
use cc_wire::WorkerPlanState;

type TestCoordinator =
    Coordinator<FakeChannelRegistry, FakeWorkerSessions, FakeMetaStore, FakeTimestampOracle, FakeClock>;

fn plan(channel: &str, segments: &[i64], timeout_secs: i64) -> CompactionPlan {
    CompactionPlan::new(
        ChannelName::new(channel),
        segments.iter().map(|id| SegmentBinlogs::new(SegmentId::new(*id))).collect(),
        CompactionType::Merge,
        timeout_secs,
    )
}

fn harness(
    clock: FakeClock,
    worker_parallel_tasks: usize,
    max_parallel_tasks: usize,
) -> (std::sync::Arc<TestCoordinator>, FakeWorkerSessions) {
    let registry = FakeChannelRegistry::new();
    registry.set_owner(ChannelName::new("ch-1"), NodeId::new(1));
    let sessions = FakeWorkerSessions::new();
    let (flush, _rx) = FlushSink::channel();
    let coordinator = Coordinator::new(
        CoordinatorConfig { worker_parallel_tasks, max_parallel_tasks, ..CoordinatorConfig::default() },
        registry,
        sessions.clone(),
        FakeMetaStore::new(),
        FakeTimestampOracle::new(clock.clone()),
        clock,
        flush,
    );
    (coordinator, sessions)
}

async fn wait_for_state(coordinator: &TestCoordinator, plan_id: PlanId, state: TaskState) {
    for _ in 0..100 {
        if coordinator.get(plan_id).map(|t| t.state) == Some(state) {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("plan {plan_id} never reached {state:?}");
}

#[tokio::test]
async fn happy_path_submits_dispatches_and_completes() {
    let clock = FakeClock::default();
    let (coordinator, sessions) = harness(clock.clone(), 4, 16);

    coordinator.submit(PlanId::new(1), SignalId::new(9), plan("ch-1", &[1, 2], 60)).await.unwrap();
    wait_for_state(&coordinator, PlanId::new(1), TaskState::Executing).await;
    assert_eq!(coordinator.by_signal(SignalId::new(9)).len(), 1);

    sessions.set_result(
        PlanId::new(1),
        WorkerPlanState::completed(
            NodeId::new(1),
            CompactionPlanResult {
                plan_id: PlanId::new(1),
                new_segment: NewSegment {
                    id: SegmentId::new(100),
                    compaction_from: vec![SegmentId::new(1), SegmentId::new(2)],
                    num_rows: 42,
                    stats_logs: vec![],
                },
            },
        ),
    );
    coordinator.reconcile(clock.epoch_ms()).await.unwrap();

    assert_eq!(coordinator.get(PlanId::new(1)).unwrap().state, TaskState::Completed);
    assert_eq!(coordinator.stats().submitted, 1);
    assert_eq!(coordinator.stats().completed, 1);
    assert_eq!(coordinator.admission_in_use(NodeId::new(1)), 0);
}

#[tokio::test]
async fn affinity_violation_fails_the_task_without_committing() {
    let clock = FakeClock::default();
    let registry = FakeChannelRegistry::new();
    registry.set_owner(ChannelName::new("ch-1"), NodeId::new(1));
    let sessions = FakeWorkerSessions::new();
    let meta = FakeMetaStore::new();
    let (flush, _rx) = FlushSink::channel();

    let coordinator: std::sync::Arc<TestCoordinator> = Coordinator::new(
        CoordinatorConfig::default(),
        registry.clone(),
        sessions.clone(),
        meta.clone(),
        FakeTimestampOracle::new(clock.clone()),
        clock.clone(),
        flush,
    );

    coordinator.submit(PlanId::new(1), SignalId::NONE, plan("ch-1", &[1], 60)).await.unwrap();
    wait_for_state(&coordinator, PlanId::new(1), TaskState::Executing).await;

    registry.set_owner(ChannelName::new("ch-1"), NodeId::new(2));
    sessions.set_result(
        PlanId::new(1),
        WorkerPlanState::completed(
            NodeId::new(1),
            CompactionPlanResult {
                plan_id: PlanId::new(1),
                new_segment: NewSegment {
                    id: SegmentId::new(100),
                    compaction_from: vec![SegmentId::new(1)],
                    num_rows: 1,
                    stats_logs: vec![],
                },
            },
        ),
    );

    coordinator.reconcile(clock.epoch_ms()).await.unwrap();

    assert_eq!(coordinator.get(PlanId::new(1)).unwrap().state, TaskState::Failed);
    assert_eq!(meta.commit_count(), 0);
}

#[tokio::test]
async fn coordinator_times_out_an_unresponsive_worker_then_fails_it() {
    let clock = FakeClock::default();
    let (coordinator, sessions) = harness(clock.clone(), 4, 16);

    coordinator.submit(PlanId::new(1), SignalId::NONE, plan("ch-1", &[1], 5)).await.unwrap();
    wait_for_state(&coordinator, PlanId::new(1), TaskState::Executing).await;

    sessions.set_result(PlanId::new(1), WorkerPlanState::executing(NodeId::new(1)));
    clock.advance_secs(10);
    coordinator.reconcile(clock.epoch_ms()).await.unwrap();
    assert_eq!(coordinator.get(PlanId::new(1)).unwrap().state, TaskState::Timeout);

    sessions.remove_result(PlanId::new(1));
    coordinator.reconcile(clock.epoch_ms()).await.unwrap();
    assert_eq!(coordinator.get(PlanId::new(1)).unwrap().state, TaskState::Failed);
    assert_eq!(coordinator.admission_in_use(NodeId::new(1)), 0);
}

#[tokio::test]
async fn is_full_boundary_flips_exactly_at_the_configured_cap() {
    let (coordinator, _sessions) = harness(FakeClock::default(), 4, 2);

    coordinator.submit(PlanId::new(1), SignalId::NONE, plan("ch-1", &[1], 60)).await.unwrap();
    assert!(!coordinator.is_full());

    coordinator.submit(PlanId::new(2), SignalId::NONE, plan("ch-1", &[2], 60)).await.unwrap();
    assert!(coordinator.is_full());
}

#[tokio::test]
async fn unknown_plan_in_worker_results_is_ignored_by_the_reconciler() {
    let clock = FakeClock::default();
    let (coordinator, sessions) = harness(clock.clone(), 4, 16);

    coordinator.submit(PlanId::new(1), SignalId::NONE, plan("ch-1", &[1], 60)).await.unwrap();
    wait_for_state(&coordinator, PlanId::new(1), TaskState::Executing).await;

    // Worker reports a plan the coordinator never submitted, alongside its
    // legitimate report for plan 1; reconcile must not error, and plan 1
    // must be unaffected by the extra unknown entry.
    sessions.set_result(PlanId::new(1), WorkerPlanState::executing(NodeId::new(1)));
    sessions.set_result(PlanId::new(99), WorkerPlanState::executing(NodeId::new(1)));

    coordinator.reconcile(clock.epoch_ms()).await.unwrap();
    assert_eq!(coordinator.get(PlanId::new(1)).unwrap().state, TaskState::Executing);
}

#[tokio::test]
async fn janitor_retains_terminal_tasks_until_the_grace_period_elapses() {
    let clock = FakeClock::default();
    let (coordinator, _sessions) = harness(clock.clone(), 4, 16);

    coordinator.submit(PlanId::new(1), SignalId::NONE, plan("ch-1", &[1], 5)).await.unwrap();
    wait_for_state(&coordinator, PlanId::new(1), TaskState::Executing).await;

    clock.advance_secs(10);
    // No worker result was ever seeded: the reconciler treats a missing
    // report for an Executing plan as abandoned and fails it directly.
    coordinator.reconcile(clock.epoch_ms()).await.unwrap();
    assert_eq!(coordinator.get(PlanId::new(1)).unwrap().state, TaskState::Failed);

    assert_eq!(coordinator.clean(clock.epoch_ms()), 0);
    clock.advance_secs(3600 + 5 + 1);
    assert_eq!(coordinator.clean(clock.epoch_ms()), 1);
    assert!(coordinator.get(PlanId::new(1)).is_none());
}
