use super::*;
use crate::ids::SegmentId;

#[test]
fn unsupported_type_is_flagged() {
    assert!(CompactionType::Merge.is_supported());
    assert!(CompactionType::Mix.is_supported());
    assert!(!CompactionType::Unknown("cluster".into()).is_supported());
}

#[test]
fn clear_paths_empties_binlog_lists_but_keeps_segment_id() {
    let mut b = SegmentBinlogs::new(SegmentId::new(7));
    b.insert_binlogs.push("a".into());
    b.delta_binlogs.push("b".into());
    b.field2_stats_binlogs.push("c".into());
    b.clear_paths();
    assert_eq!(b.segment_id, SegmentId::new(7));
    assert!(b.insert_binlogs.is_empty());
    assert!(b.delta_binlogs.is_empty());
    assert!(b.field2_stats_binlogs.is_empty());
}

#[test]
fn segment_ids_iterates_in_order() {
    let plan = CompactionPlan::new(
        "c1",
        vec![SegmentBinlogs::new(SegmentId::new(1)), SegmentBinlogs::new(SegmentId::new(2))],
        CompactionType::Merge,
        60,
    );
    let ids: Vec<_> = plan.segment_ids().collect();
    assert_eq!(ids, vec![SegmentId::new(1), SegmentId::new(2)]);
}
