use super::*;
use yare::parameterized;

#[test]
fn compose_then_physical_ms_roundtrips() {
    let ts = LogicalTimestamp::compose(1_700_000_000_000, 7);
    assert_eq!(ts.physical_ms(), 1_700_000_000_000);
}

#[test]
fn sentinel_decomposes_to_epoch() {
    assert_eq!(TS_TIMEOUT.physical_ms(), 0);
}

#[parameterized(
    sentinel_always_times_out = { TS_TIMEOUT, 5_000_000_000, 1, true },
    not_yet_elapsed = { LogicalTimestamp::compose(1_000_000, 0), 1_005_000, 10, false },
    exactly_at_boundary = { LogicalTimestamp::compose(1_000_000, 0), 1_010_000, 10, true },
    comfortably_elapsed = { LogicalTimestamp::compose(1_000_000, 0), 2_000_000, 10, true },
)]
fn timeout_predicate_boundaries(start: LogicalTimestamp, now_ms: u64, timeout_s: u32, expect: bool) {
    assert_eq!(is_timeout(now_ms, start, timeout_s), expect);
}
