use super::*;

#[test]
fn fake_clock_advances_by_seconds() {
    let clock = FakeClock::new(0);
    assert_eq!(clock.epoch_ms(), 0);
    clock.advance_secs(5);
    assert_eq!(clock.epoch_ms(), 5_000);
}

#[test]
fn fake_clock_set_epoch_ms_is_absolute() {
    let clock = FakeClock::new(10);
    clock.set_epoch_ms(42);
    assert_eq!(clock.epoch_ms(), 42);
}

#[test]
fn cloned_fake_clock_shares_state() {
    let clock = FakeClock::new(0);
    let clone = clock.clone();
    clock.advance_ms(100);
    assert_eq!(clone.epoch_ms(), 100);
}
