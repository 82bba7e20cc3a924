//! Single-interval pulse-width classification.

/// Classifies the interval between two consecutive edges against one
/// configured target width.
///
/// Every call to [`classify`](Self::classify) latches the supplied timestamp
/// as the new reference, whether or not the interval matched. A miss
/// therefore never desynchronizes recognition of the *next* interval from the
/// *current* edge.
///
/// The first call after [`new`](Self::new) or [`reset`](Self::reset) measures
/// against the seed reference and its result must be discarded.
///
/// # Examples
/// ```
/// use edge_kit::pulse_width::PulseWidth;
///
/// let mut classifier = PulseWidth::new(560, 100);
/// classifier.reset(0);
/// assert!(classifier.classify(560)); // 560µs after the reference edge
/// assert!(!classifier.classify(2_000)); // 1440µs gap: no match
/// assert!(classifier.classify(2_500)); // measured from the missed edge
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PulseWidth {
    min_us: u64,
    max_us: u64,
    prev_edge_us: u64,
}

impl PulseWidth {
    /// Create a classifier for `target_us ± tolerance_us` (inclusive).
    #[must_use]
    pub const fn new(target_us: u64, tolerance_us: u64) -> Self {
        Self {
            min_us: target_us.saturating_sub(tolerance_us),
            max_us: target_us.saturating_add(tolerance_us),
            prev_edge_us: 0,
        }
    }

    /// Re-seed the edge reference, e.g. after a gap in the stream.
    pub const fn reset(&mut self, t_us: u64) {
        self.prev_edge_us = t_us;
    }

    /// Classify the interval from the previous edge to the edge at `t_us`.
    ///
    /// Returns true iff the interval falls inside the configured window,
    /// boundaries included. Always advances the edge reference.
    pub const fn classify(&mut self, t_us: u64) -> bool {
        let dt_us = t_us.wrapping_sub(self.prev_edge_us);
        self.prev_edge_us = t_us;
        dt_us >= self.min_us && dt_us <= self.max_us
    }
}
