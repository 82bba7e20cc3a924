//! NVIDIA 3D-glasses shutter synchronization decoding.
//!
//! The emitter cycles through four pulse shapes, one per vertical blank:
//! left-open, left-close, right-open, right-close. The right-close shape is
//! the only one whose two rising edges sit 102µs apart, so that distance is a
//! unique anchor in the edge stream. Once the anchor is seen, the decoder
//! knows its absolute position in the `LO→LC→RO→RC` cycle and assigns phases
//! to subsequent shape starts optimistically, without re-verifying each pulse
//! shape.

/// Rising-edge distance unique to the right-close shape (24µs mark + 78µs
/// space).
const ANCHOR_US: u64 = 102;
const ANCHOR_TOLERANCE_US: u64 = 5;

/// Edges within one pulse shape are at most ~150µs apart; a longer quiet gap
/// before a rising edge marks the start of the next shape.
const SHAPE_GAP_US: u64 = 1_000;

/// Edge silence longer than this exceeds any per-phase duration (two per-eye
/// windows at a 120Hz shutter rate) and forces [`ShutterPhase::Off`].
pub const IDLE_TIMEOUT_US: u64 = 20_000;

/// Which shutter, if either, is currently open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum ShutterPhase {
    /// Both shutters closed: before synchronization, between open windows,
    /// or after signal loss.
    Off,
    /// Left shutter open.
    LeftOpen,
    /// Right shutter open.
    RightOpen,
}

impl Default for ShutterPhase {
    fn default() -> Self {
        Self::Off
    }
}

/// Position in the four-shape emitter cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    LeftOpen,
    LeftClose,
    RightOpen,
    RightClose,
}

impl Shape {
    const fn next(self) -> Self {
        match self {
            Self::LeftOpen => Self::LeftClose,
            Self::LeftClose => Self::RightOpen,
            Self::RightOpen => Self::RightClose,
            Self::RightClose => Self::LeftOpen,
        }
    }

    /// Phase in effect once this shape has been transmitted. Both close
    /// shapes leave both shutters shut.
    const fn phase(self) -> ShutterPhase {
        match self {
            Self::LeftOpen => ShutterPhase::LeftOpen,
            Self::RightOpen => ShutterPhase::RightOpen,
            Self::LeftClose | Self::RightClose => ShutterPhase::Off,
        }
    }
}

/// State machine over `(level, timestamp)` edge pairs recognizing the NVIDIA
/// shutter protocol.
///
/// Feed every edge through [`feed`](Self::feed); when no edges arrive, call
/// [`idle`](Self::idle) periodically so loss of signal forces
/// [`ShutterPhase::Off`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ShutterDecoder {
    phase: ShutterPhase,
    /// Next shape expected at a shape start; `None` until anchored.
    next_shape: Option<Shape>,
    last_edge_us: Option<u64>,
    last_rising_us: Option<u64>,
}

impl ShutterDecoder {
    /// Create a decoder in the unsynchronized [`ShutterPhase::Off`] state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: ShutterPhase::Off,
            next_shape: None,
            last_edge_us: None,
            last_rising_us: None,
        }
    }

    /// Feed one edge; `level` is the line level after the edge (true =
    /// rising). Returns the phase in effect after this edge.
    pub fn feed(&mut self, level: bool, t_us: u64) -> ShutterPhase {
        if level {
            let anchored = self.last_rising_us.is_some_and(|rising_us| {
                let dt_us = t_us.wrapping_sub(rising_us);
                dt_us >= ANCHOR_US - ANCHOR_TOLERANCE_US
                    && dt_us <= ANCHOR_US + ANCHOR_TOLERANCE_US
            });
            if anchored {
                // Mid right-close shape: absolute cycle position is now known.
                self.phase = ShutterPhase::Off;
                self.next_shape = Some(Shape::LeftOpen);
            } else if let (Some(shape), Some(last_us)) = (self.next_shape, self.last_edge_us) {
                if t_us.wrapping_sub(last_us) >= SHAPE_GAP_US {
                    // Quiet gap ended: this edge starts the predicted shape.
                    self.phase = shape.phase();
                    self.next_shape = Some(shape.next());
                }
            }
            self.last_rising_us = Some(t_us);
        }
        self.last_edge_us = Some(t_us);
        self.phase
    }

    /// Report the current time with no new edge. If the stream has been
    /// silent past [`IDLE_TIMEOUT_US`], drop synchronization and force
    /// [`ShutterPhase::Off`].
    pub const fn idle(&mut self, t_us: u64) -> ShutterPhase {
        if let Some(last_us) = self.last_edge_us {
            if t_us.wrapping_sub(last_us) > IDLE_TIMEOUT_US {
                self.phase = ShutterPhase::Off;
                self.next_shape = None;
                self.last_rising_us = None;
            }
        }
        self.phase
    }

    /// Phase in effect after the most recent edge or idle check.
    #[must_use]
    pub const fn phase(&self) -> ShutterPhase {
        self.phase
    }
}
