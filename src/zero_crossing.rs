//! Sub-sample zero-crossing interpolation for sparsely sampled signals.

/// Detects sign changes between successive `(time, sample)` pairs and
/// linearly interpolates the exact crossing time.
///
/// Zero is treated as non-negative, so `5 → 0` is not a crossing while
/// `-5 → 0` is; a transition through zero triggers once per sign flip.
///
/// # Examples
/// ```
/// use edge_kit::zero_crossing::ZeroCrossing;
///
/// let mut zx = ZeroCrossing::new();
/// assert!(!zx.feed(0, 10)); // first sample: reference only
/// assert!(zx.feed(10, -10)); // sign flip
/// assert_eq!(zx.last_crossing_us(), Some(5)); // exact midpoint
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroCrossing {
    prev: Option<(i64, i32)>,
    crossing_us: Option<i64>,
}

impl ZeroCrossing {
    /// Create an interpolator with no sample history.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            prev: None,
            crossing_us: None,
        }
    }

    /// Feed the next `(time, sample)` pair; returns whether the signal
    /// crossed zero since the previous sample.
    ///
    /// The previous pair is replaced unconditionally, crossing or not. On a
    /// crossing, the interpolated time is floored toward the exact rational
    /// crossing instant and retained for
    /// [`last_crossing_us`](Self::last_crossing_us).
    pub fn feed(&mut self, t_us: i64, sample: i32) -> bool {
        let crossed = match self.prev {
            Some((prev_t_us, prev_sample)) if (prev_sample < 0) != (sample < 0) => {
                self.crossing_us = Some(interpolate(prev_t_us, prev_sample, t_us, sample));
                true
            }
            _ => false,
        };
        self.prev = Some((t_us, sample));
        crossed
    }

    /// Time of the most recent crossing, `None` until one has occurred.
    #[must_use]
    pub const fn last_crossing_us(&self) -> Option<i64> {
        self.crossing_us
    }
}

/// Solve `f(zx) = 0` for the line through `(t0, f0)` and `(t1, f1)`:
/// `zx = (f1·t0 − f0·t1) / (f1 − f0)`, floored. The products are widened to
/// 128 bits so large timestamps cannot overflow the divide.
fn interpolate(t0_us: i64, f0: i32, t1_us: i64, f1: i32) -> i64 {
    let numerator = i128::from(f1) * i128::from(t0_us) - i128::from(f0) * i128::from(t1_us);
    let denominator = i128::from(f1) - i128::from(f0);
    #[expect(
        clippy::cast_possible_truncation,
        reason = "the crossing lies between t0 and t1, both i64"
    )]
    {
        div_floor(numerator, denominator) as i64
    }
}

fn div_floor(numerator: i128, denominator: i128) -> i128 {
    let quotient = numerator / denominator;
    let remainder = numerator % denominator;
    if remainder != 0 && (remainder < 0) != (denominator < 0) {
        quotient - 1
    } else {
        quotient
    }
}
