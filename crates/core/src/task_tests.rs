use super::*;
use yare::parameterized;

#[parameterized(
    pipelining_to_executing = { TaskState::Pipelining, TaskState::Executing, true },
    executing_to_completed = { TaskState::Executing, TaskState::Completed, true },
    executing_to_failed = { TaskState::Executing, TaskState::Failed, true },
    executing_to_timeout = { TaskState::Executing, TaskState::Timeout, true },
    timeout_to_failed = { TaskState::Timeout, TaskState::Failed, true },
    pipelining_to_completed_illegal = { TaskState::Pipelining, TaskState::Completed, false },
    completed_to_anything_illegal = { TaskState::Completed, TaskState::Failed, false },
    timeout_to_executing_illegal = { TaskState::Timeout, TaskState::Executing, false },
    self_transition_illegal = { TaskState::Executing, TaskState::Executing, false },
    failed_is_terminal_dead_end = { TaskState::Failed, TaskState::Timeout, false },
)]
fn transition_dag(from: TaskState, to: TaskState, expect_ok: bool) {
    assert_eq!(from.can_transition_to(to), expect_ok);
}

#[test]
fn is_active_matches_pipelining_and_executing_only() {
    assert!(TaskState::Pipelining.is_active());
    assert!(TaskState::Executing.is_active());
    assert!(!TaskState::Completed.is_active());
    assert!(!TaskState::Failed.is_active());
    assert!(!TaskState::Timeout.is_active());
}

#[test]
fn is_terminal_matches_completed_failed_timeout() {
    assert!(TaskState::Completed.is_terminal());
    assert!(TaskState::Failed.is_terminal());
    assert!(TaskState::Timeout.is_terminal());
    assert!(!TaskState::Pipelining.is_terminal());
    assert!(!TaskState::Executing.is_terminal());
}

#[test]
fn with_state_shadow_clones_preserving_original() {
    let original = Task::builder().state(TaskState::Pipelining).build();
    let advanced = original.with_state(TaskState::Executing).unwrap();
    assert_eq!(original.state, TaskState::Pipelining);
    assert_eq!(advanced.state, TaskState::Executing);
    assert_eq!(advanced.plan_id, original.plan_id);
}

#[test]
fn with_state_rejects_illegal_transition() {
    let task = Task::builder().state(TaskState::Completed).build();
    let err = task.with_state(TaskState::Failed).unwrap_err();
    assert_eq!(err.from, TaskState::Completed);
    assert_eq!(err.to, TaskState::Failed);
}

#[test]
fn with_start_time_leaves_state_and_original_untouched() {
    let original = Task::builder().state(TaskState::Pipelining).build();
    let stamped = original.with_start_time(LogicalTimestamp::from(42));
    assert_eq!(stamped.plan.start_time, LogicalTimestamp::from(42));
    assert_eq!(stamped.state, TaskState::Pipelining);
    assert_eq!(original.plan.start_time, LogicalTimestamp::default());
}

#[test]
fn completed_with_clears_binlog_paths_and_attaches_result() {
    use crate::plan::SegmentBinlogs;
    use crate::result::{CompactionPlanResult, NewSegment};

    let mut binlogs = SegmentBinlogs::new(crate::ids::SegmentId::new(1));
    binlogs.insert_binlogs.push("a.log".to_string());
    let mut task = Task::builder().state(TaskState::Executing).build();
    task.plan.segment_binlogs = vec![binlogs];

    let result = CompactionPlanResult {
        plan_id: task.plan_id,
        new_segment: NewSegment {
            id: crate::ids::SegmentId::new(2),
            compaction_from: vec![crate::ids::SegmentId::new(1)],
            num_rows: 10,
            stats_logs: vec![],
        },
    };
    let completed = task.completed_with(result.clone()).unwrap();
    assert_eq!(completed.state, TaskState::Completed);
    assert_eq!(completed.result, Some(result));
    assert!(completed.plan.segment_binlogs[0].insert_binlogs.is_empty());
}

#[test]
fn completed_with_rejects_illegal_source_state() {
    let task = Task::builder().state(TaskState::Pipelining).build();
    assert!(task.completed_with(CompactionPlanResult {
        plan_id: task.plan_id,
        new_segment: crate::result::NewSegment {
            id: crate::ids::SegmentId::new(2),
            compaction_from: vec![],
            num_rows: 0,
            stats_logs: vec![],
        },
    })
    .is_err());
}
