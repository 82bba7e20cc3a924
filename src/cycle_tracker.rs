//! Index-mark cycle tracking for rotating or periodic mechanisms.

/// Lifecycle of a tracker: each stage holds only the fields valid for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum State {
    /// No mark observed yet.
    #[default]
    Unseen,
    /// One mark observed; no interval exists yet.
    OneMark { last_mark_us: u64 },
    /// Two or more marks observed.
    Running {
        last_mark_us: u64,
        cycle_us: u64,
        /// Exponential moving average of the cycle length, kept shifted left
        /// by `E` so the update rule stays in integers.
        smoothed_shifted: u64,
    },
}

/// Maintains the current and exponentially smoothed cycle length from
/// successive index-mark timestamps (e.g. one mark per motor revolution).
///
/// `E` is the smoothing exponent: each new cycle length enters the average
/// with weight `1/2^E` via `smoothed += cycle − (smoothed >> E)`, all in
/// integer microseconds.
///
/// # Examples
/// ```
/// use edge_kit::cycle_tracker::CycleTracker;
///
/// let mut tracker = CycleTracker::<3>::new();
/// tracker.mark(0);
/// assert!(!tracker.is_valid()); // one mark is not an interval
/// tracker.mark(100);
/// assert_eq!(tracker.cycle_us(), Some(100));
/// assert_eq!(tracker.smoothed_cycle_us(), Some(100));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CycleTracker<const E: u32> {
    state: State,
}

impl<const E: u32> CycleTracker<E> {
    /// Create a tracker that has seen no marks.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: State::Unseen,
        }
    }

    /// Record an index mark at `t_us`.
    ///
    /// The second mark seeds the smoothed average with the first real cycle
    /// length; later marks fold into it with weight `1/2^E`.
    pub const fn mark(&mut self, t_us: u64) {
        self.state = match self.state {
            State::Unseen => State::OneMark { last_mark_us: t_us },
            State::OneMark { last_mark_us } => {
                let cycle_us = t_us.wrapping_sub(last_mark_us);
                State::Running {
                    last_mark_us: t_us,
                    cycle_us,
                    smoothed_shifted: cycle_us << E,
                }
            }
            State::Running {
                last_mark_us,
                smoothed_shifted,
                ..
            } => {
                let cycle_us = t_us.wrapping_sub(last_mark_us);
                State::Running {
                    last_mark_us: t_us,
                    cycle_us,
                    smoothed_shifted: smoothed_shifted
                        .saturating_sub(smoothed_shifted >> E)
                        .saturating_add(cycle_us),
                }
            }
        };
    }

    /// Forget all marks.
    pub const fn reset(&mut self) {
        self.state = State::Unseen;
    }

    /// True once at least two marks have been seen.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self.state, State::Running { .. })
    }

    /// Most recent mark-to-mark interval.
    #[must_use]
    pub const fn cycle_us(&self) -> Option<u64> {
        match self.state {
            State::Running { cycle_us, .. } => Some(cycle_us),
            State::Unseen | State::OneMark { .. } => None,
        }
    }

    /// Exponentially smoothed cycle length.
    #[must_use]
    pub const fn smoothed_cycle_us(&self) -> Option<u64> {
        match self.state {
            State::Running {
                smoothed_shifted, ..
            } => Some(smoothed_shifted >> E),
            State::Unseen | State::OneMark { .. } => None,
        }
    }

    /// Whether a mark has been seen within `max_cycle_us` of `t_us` (stall
    /// detection).
    #[must_use]
    pub const fn is_rotating(&self, t_us: u64, max_cycle_us: u64) -> bool {
        match self.state {
            State::Unseen => false,
            State::OneMark { last_mark_us } | State::Running { last_mark_us, .. } => {
                t_us.wrapping_sub(last_mark_us) < max_cycle_us
            }
        }
    }

    /// Whether this tracker's raw cycle length is within `1/fraction` of
    /// `other`'s: `|Δ| · fraction ≤ other`. False unless both are valid.
    #[must_use]
    pub fn speed_is_close(&self, other: &Self, fraction: u64) -> bool {
        match (self.cycle_us(), other.cycle_us()) {
            (Some(cycle_us), Some(reference_us)) => close(cycle_us, reference_us, fraction),
            _ => false,
        }
    }

    /// [`speed_is_close`](Self::speed_is_close) over the smoothed cycle
    /// lengths.
    #[must_use]
    pub fn avg_speed_is_close(&self, other: &Self, fraction: u64) -> bool {
        match (self.smoothed_cycle_us(), other.smoothed_cycle_us()) {
            (Some(cycle_us), Some(reference_us)) => close(cycle_us, reference_us, fraction),
            _ => false,
        }
    }
}

const fn close(cycle_us: u64, reference_us: u64, fraction: u64) -> bool {
    cycle_us.abs_diff(reference_us).saturating_mul(fraction) <= reference_us
}
