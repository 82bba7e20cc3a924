//! Host-level tests for the zero-crossing interpolator.

use edge_kit::zero_crossing::ZeroCrossing;

#[test]
fn symmetric_crossing_lands_on_the_midpoint() {
    let mut zx = ZeroCrossing::new();
    assert!(!zx.feed(0, 10));
    assert!(zx.feed(10, -10));
    assert_eq!(zx.last_crossing_us(), Some(5));
}

#[test]
fn rising_crossing_is_detected_too() {
    let mut zx = ZeroCrossing::new();
    assert!(!zx.feed(100, -4));
    assert!(zx.feed(108, 4));
    assert_eq!(zx.last_crossing_us(), Some(104));
}

#[test]
fn same_sign_samples_never_cross() {
    let mut zx = ZeroCrossing::new();
    assert!(!zx.feed(0, 5));
    assert!(!zx.feed(10, 3));
    assert!(!zx.feed(20, 8));
    assert_eq!(zx.last_crossing_us(), None);
}

#[test]
fn zero_is_non_negative() {
    // Non-negative to zero: no crossing.
    let mut zx = ZeroCrossing::new();
    assert!(!zx.feed(0, 5));
    assert!(!zx.feed(10, 0));
    // Negative to zero: crossing, exactly at the new sample.
    let mut zx = ZeroCrossing::new();
    assert!(!zx.feed(0, -5));
    assert!(zx.feed(10, 0));
    assert_eq!(zx.last_crossing_us(), Some(10));
}

#[test]
fn repeated_zeros_do_not_retrigger() {
    let mut zx = ZeroCrossing::new();
    assert!(!zx.feed(0, -5));
    assert!(zx.feed(10, 0)); // one sign flip, one crossing
    assert!(!zx.feed(20, 0));
    assert!(!zx.feed(30, 4));
}

#[test]
fn non_integer_crossing_floors() {
    let mut zx = ZeroCrossing::new();
    assert!(!zx.feed(0, 1));
    assert!(zx.feed(10, -2));
    // Exact crossing at 10/3 ≈ 3.33µs.
    assert_eq!(zx.last_crossing_us(), Some(3));
}

#[test]
fn state_advances_on_every_feed() {
    let mut zx = ZeroCrossing::new();
    assert!(!zx.feed(0, 10));
    assert!(!zx.feed(10, 20)); // no crossing, but (10, 20) is the new reference
    assert!(zx.feed(20, -20));
    assert_eq!(zx.last_crossing_us(), Some(15));
}

#[test]
fn repeated_timestamp_does_not_fault() {
    let mut zx = ZeroCrossing::new();
    assert!(!zx.feed(10, 7));
    assert!(!zx.feed(10, 7));
    // Opposite sign at the same instant: degenerate but defined.
    assert!(zx.feed(10, -7));
    assert_eq!(zx.last_crossing_us(), Some(10));
}

#[test]
fn large_timestamps_do_not_overflow() {
    let mut zx = ZeroCrossing::new();
    let t0 = i64::MAX - 1_000;
    assert!(!zx.feed(t0, i32::MAX));
    assert!(zx.feed(t0 + 500, i32::MIN));
    let crossing = zx.last_crossing_us().unwrap();
    assert!(crossing >= t0 && crossing <= t0 + 500);
}
