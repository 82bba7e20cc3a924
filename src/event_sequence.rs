//! Cyclic replay of a timed event table against a free-running clock.

use crate::{Error, Result};

/// One table entry: `event` becomes current once `at_us` microseconds of the
/// cycle have elapsed. The last entry's `at_us` is the cycle length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedEvent<E> {
    /// Offset from the start of the cycle.
    pub at_us: u64,
    /// Value emitted at that offset.
    pub event: E,
}

/// Replays a `(time, event)` table cyclically against caller-supplied
/// timestamps.
///
/// Before the first entry of the first cycle elapses, [`event`](Self::event)
/// reports the *last* table entry's value: the generator assumes continuity
/// from a previous cycle rather than a neutral value.
///
/// # Examples
/// ```
/// use edge_kit::event_sequence::{TimedEvent, TimedEvents};
///
/// const TABLE: [TimedEvent<u8>; 2] = [
///     TimedEvent { at_us: 50, event: 1 },
///     TimedEvent { at_us: 100, event: 0 },
/// ];
/// let mut replay = TimedEvents::new(&TABLE)?;
/// replay.start(0);
/// assert!(!replay.update(40)); // still the last cycle's event
/// assert!(replay.update(60)); // event becomes 1
/// assert!(replay.update(110)); // wraps: event back to 0
/// assert_eq!(replay.cycle_count(), 1);
/// # Ok::<(), edge_kit::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct TimedEvents<'a, E: Copy + PartialEq> {
    table: &'a [TimedEvent<E>],
    /// Position of the next entry to fire; `None` is the terminal stopped
    /// state.
    index: Option<usize>,
    offset_us: u64,
    event: E,
    cycle_count: u32,
    running: bool,
}

impl<'a, E: Copy + PartialEq> TimedEvents<'a, E> {
    /// Create a stopped generator over `table`.
    ///
    /// # Errors
    /// Returns [`Error::EmptyEventTable`] if the table has no entries.
    pub fn new(table: &'a [TimedEvent<E>]) -> Result<Self> {
        let Some(last) = table.last() else {
            return Err(Error::EmptyEventTable);
        };
        Ok(Self {
            table,
            index: None,
            offset_us: 0,
            event: last.event,
            cycle_count: 0,
            running: false,
        })
    }

    /// Begin cycling from table index 0 with cycle offset `t_us`.
    pub fn start(&mut self, t_us: u64) {
        self.index = Some(0);
        self.offset_us = t_us;
        self.cycle_count = 0;
        self.running = true;
        if let Some(last) = self.table.last() {
            self.event = last.event;
        }
    }

    /// Advance against the clock; returns whether the current event changed.
    ///
    /// At most one table entry fires per call, so callers must poll faster
    /// than entries are spaced. At the end of the table the generator wraps
    /// and counts a cycle, unless [`pause`](Self::pause) was requested, in
    /// which case it parks stopped.
    pub fn update(&mut self, t_us: u64) -> bool {
        let Some(index) = self.index else {
            return false;
        };
        let Some(entry) = self.table.get(index) else {
            return false;
        };
        if t_us.wrapping_sub(self.offset_us) < entry.at_us {
            return false;
        }
        let changed = entry.event != self.event;
        self.event = entry.event;
        let next = index.saturating_add(1);
        if next == self.table.len() {
            if self.running {
                self.index = Some(0);
                // The last entry's offset is the cycle length.
                self.offset_us = self.offset_us.wrapping_add(entry.at_us);
                self.cycle_count = self.cycle_count.saturating_add(1);
            } else {
                self.index = None;
            }
        } else {
            self.index = Some(next);
        }
        changed
    }

    /// Stop after the current cycle completes rather than wrapping.
    pub const fn pause(&mut self) {
        self.running = false;
    }

    /// Resume a paused or parked generator from table index 0 at a new
    /// offset.
    pub const fn continue_from(&mut self, t_us: u64) {
        self.index = Some(0);
        self.offset_us = t_us;
        self.running = true;
    }

    /// The currently emitted event value.
    #[must_use]
    pub const fn event(&self) -> E {
        self.event
    }

    /// Completed cycles since [`start`](Self::start).
    #[must_use]
    pub const fn cycle_count(&self) -> u32 {
        self.cycle_count
    }

    /// True once the generator has parked after a [`pause`](Self::pause).
    #[must_use]
    pub const fn is_stopped(&self) -> bool {
        self.index.is_none()
    }
}
