//! Host-level tests for the NVIDIA shutter decoder.

use edge_kit::shutter::{IDLE_TIMEOUT_US, ShutterDecoder, ShutterPhase};

// Edge-to-edge pulse widths of the four emitter shapes, in microseconds.
const LEFT_OPEN: &[u64] = &[44];
const LEFT_CLOSE: &[u64] = &[24, 20, 25];
const RIGHT_OPEN: &[u64] = &[24, 45, 32];
const RIGHT_CLOSE: &[u64] = &[24, 78, 40];

/// One vertical blank to the next.
const FRAME_US: u64 = 8_333;

/// Feed one shape starting with a rising edge at `t_us`; returns the phase
/// after the shape's last edge.
fn feed_shape(decoder: &mut ShutterDecoder, mut t_us: u64, widths: &[u64]) -> ShutterPhase {
    let mut level = true;
    let mut phase = decoder.feed(level, t_us);
    for width_us in widths {
        t_us += width_us;
        level = !level;
        phase = decoder.feed(level, t_us);
    }
    phase
}

#[test]
fn unanchored_shapes_stay_off() {
    let mut decoder = ShutterDecoder::new();
    // Without the right-close anchor the decoder has no cycle position.
    assert_eq!(feed_shape(&mut decoder, 0, LEFT_OPEN), ShutterPhase::Off);
    assert_eq!(
        feed_shape(&mut decoder, FRAME_US, LEFT_CLOSE),
        ShutterPhase::Off
    );
    assert_eq!(
        feed_shape(&mut decoder, 2 * FRAME_US, RIGHT_OPEN),
        ShutterPhase::Off
    );
}

#[test]
fn anchor_then_optimistic_phase_walk() {
    let mut decoder = ShutterDecoder::new();
    let mut t_us = 0;
    // The right-close shape's 102µs rising-edge pair anchors the decoder.
    assert_eq!(feed_shape(&mut decoder, t_us, RIGHT_CLOSE), ShutterPhase::Off);
    t_us += FRAME_US;
    assert_eq!(
        feed_shape(&mut decoder, t_us, LEFT_OPEN),
        ShutterPhase::LeftOpen
    );
    t_us += FRAME_US;
    assert_eq!(
        feed_shape(&mut decoder, t_us, LEFT_CLOSE),
        ShutterPhase::Off
    );
    t_us += FRAME_US;
    assert_eq!(
        feed_shape(&mut decoder, t_us, RIGHT_OPEN),
        ShutterPhase::RightOpen
    );
    t_us += FRAME_US;
    // Back to right-close: both the predicted slot and the anchor agree.
    assert_eq!(feed_shape(&mut decoder, t_us, RIGHT_CLOSE), ShutterPhase::Off);
    t_us += FRAME_US;
    assert_eq!(
        feed_shape(&mut decoder, t_us, LEFT_OPEN),
        ShutterPhase::LeftOpen
    );
}

#[test]
fn anchor_within_tolerance_locks() {
    let mut decoder = ShutterDecoder::new();
    // 97µs and 107µs rising-edge distances are both inside 102 ± 5.
    decoder.feed(true, 0);
    decoder.feed(false, 24);
    decoder.feed(true, 97);
    assert_eq!(decoder.phase(), ShutterPhase::Off);
    assert_eq!(
        feed_shape(&mut decoder, FRAME_US, LEFT_OPEN),
        ShutterPhase::LeftOpen
    );
}

#[test]
fn rising_pair_outside_tolerance_does_not_lock() {
    let mut decoder = ShutterDecoder::new();
    decoder.feed(true, 0);
    decoder.feed(false, 24);
    decoder.feed(true, 110); // 8µs past the window
    assert_eq!(
        feed_shape(&mut decoder, FRAME_US, LEFT_OPEN),
        ShutterPhase::Off
    );
}

#[test]
fn idle_timeout_forces_off_and_drops_lock() {
    let mut decoder = ShutterDecoder::new();
    feed_shape(&mut decoder, 0, RIGHT_CLOSE);
    let t_us = FRAME_US;
    assert_eq!(
        feed_shape(&mut decoder, t_us, LEFT_OPEN),
        ShutterPhase::LeftOpen
    );
    let last_edge_us = t_us + 44;
    // Within the timeout: nothing changes.
    assert_eq!(
        decoder.idle(last_edge_us + IDLE_TIMEOUT_US),
        ShutterPhase::LeftOpen
    );
    // Past it: loss of sync.
    assert_eq!(
        decoder.idle(last_edge_us + IDLE_TIMEOUT_US + 1),
        ShutterPhase::Off
    );
    // The lock is gone, so the next shape start is not trusted.
    assert_eq!(
        feed_shape(&mut decoder, 10 * FRAME_US, LEFT_CLOSE),
        ShutterPhase::Off
    );
}

#[test]
fn idle_before_any_edge_is_a_no_op() {
    let mut decoder = ShutterDecoder::new();
    assert_eq!(decoder.idle(1_000_000), ShutterPhase::Off);
}

/// Feed one shape with every level inverted, as a task whose level toggle
/// missed one edge would report it.
fn feed_shape_inverted(decoder: &mut ShutterDecoder, mut t_us: u64, widths: &[u64]) -> ShutterPhase {
    let mut level = false;
    let mut phase = decoder.feed(level, t_us);
    for width_us in widths {
        t_us += width_us;
        level = !level;
        phase = decoder.feed(level, t_us);
    }
    phase
}

#[test]
fn inverted_levels_never_anchor_until_the_decoder_restarts() {
    let mut decoder = ShutterDecoder::new();
    // A caller whose edge-level bookkeeping flipped polarity reports rises as
    // falls: the right-close shape's "rising" pair is then 118µs apart (78µs
    // space + 40µs mark), outside the 102 ± 5µs window, so the decoder can
    // never lock from such a stream.
    let mut t_us = 0;
    for _ in 0..10 {
        assert_eq!(
            feed_shape_inverted(&mut decoder, t_us, RIGHT_CLOSE),
            ShutterPhase::Off
        );
        t_us += FRAME_US;
    }
    assert_eq!(
        feed_shape_inverted(&mut decoder, t_us, LEFT_OPEN),
        ShutterPhase::Off
    );
    // Recovery is a fresh decoder fed true levels, which is exactly what the
    // device task does when it detects a missed edge.
    let mut decoder = ShutterDecoder::new();
    feed_shape(&mut decoder, 0, RIGHT_CLOSE);
    assert_eq!(
        feed_shape(&mut decoder, FRAME_US, LEFT_OPEN),
        ShutterPhase::LeftOpen
    );
}

#[test]
fn resync_after_signal_loss() {
    let mut decoder = ShutterDecoder::new();
    feed_shape(&mut decoder, 0, RIGHT_CLOSE);
    feed_shape(&mut decoder, FRAME_US, LEFT_OPEN);
    decoder.idle(FRAME_US + 44 + IDLE_TIMEOUT_US + 1);
    // A fresh anchor re-locks the cycle position.
    feed_shape(&mut decoder, 100 * FRAME_US, RIGHT_CLOSE);
    assert_eq!(
        feed_shape(&mut decoder, 101 * FRAME_US, LEFT_OPEN),
        ShutterPhase::LeftOpen
    );
}
