//! NEC infrared remote decoding from mark-to-mark edge timestamps.
//!
//! A frame is one header interval followed by 32 bit intervals, each measured
//! from the start of one mark to the start of the next. Bits accumulate
//! LSB-first: bits 0-15 carry the address, bits 16-23 the command, and bits
//! 24-31 the command's bitwise complement. Validate a completed code with
//! [`check`] or [`check_extended`].

/// Timing windows for the NEC protocol, in microseconds.
///
/// All intervals are mark-to-mark and matched within `± tolerance_us`,
/// boundaries included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NecConfig {
    /// Header interval: leader mark start to first bit mark start.
    pub header_us: u64,
    /// Mark-to-mark interval encoding a `1` bit.
    pub one_us: u64,
    /// Mark-to-mark interval encoding a `0` bit.
    pub zero_us: u64,
    /// Acceptable deviation applied to all three intervals.
    pub tolerance_us: u64,
}

impl NecConfig {
    /// Standard NEC timing (38 kHz consumer remotes).
    pub const DEFAULT: Self = Self {
        header_us: 13_500,
        one_us: 2_250,
        zero_us: 1_120,
        tolerance_us: 300,
    };
}

impl Default for NecConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    AwaitingHeader,
    CollectingBits { bit_index: u8, accumulator: u32 },
}

/// Bit-accumulating NEC state machine over mark edge timestamps.
///
/// Feed the timestamp of every mark start. Malformed timing at any point
/// silently aborts the current frame and restarts header search from the
/// current edge; there is no error path.
///
/// # Examples
/// ```
/// use edge_kit::nec::{NecConfig, NecDecoder};
///
/// let mut decoder = NecDecoder::new(NecConfig::DEFAULT);
/// let mut t_us = 0;
/// assert_eq!(decoder.feed(t_us), None); // first edge: reference only
/// t_us += 13_500; // header
/// assert_eq!(decoder.feed(t_us), None);
/// let mut code = None;
/// for bit in 0..32_u32 {
///     t_us += if bit % 2 == 0 { 2_250 } else { 1_120 };
///     code = decoder.feed(t_us);
/// }
/// assert_eq!(code, Some(0x5555_5555));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct NecDecoder {
    config: NecConfig,
    state: State,
    prev_edge_us: u64,
}

impl NecDecoder {
    /// Create a decoder awaiting a header.
    #[must_use]
    pub const fn new(config: NecConfig) -> Self {
        Self {
            config,
            state: State::AwaitingHeader,
            prev_edge_us: 0,
        }
    }

    /// Abort any frame in progress and re-seed the edge reference.
    pub const fn reset(&mut self, t_us: u64) {
        self.state = State::AwaitingHeader;
        self.prev_edge_us = t_us;
    }

    /// Feed the timestamp of a mark edge.
    ///
    /// Returns the 32-bit LSB-first code when the 32nd bit completes a frame,
    /// `None` otherwise (mid-frame and frame-abort are indistinguishable).
    pub fn feed(&mut self, t_us: u64) -> Option<u32> {
        let dt_us = t_us.wrapping_sub(self.prev_edge_us);
        self.prev_edge_us = t_us;
        match self.state {
            State::AwaitingHeader => {
                if in_window(dt_us, self.config.header_us, self.config.tolerance_us) {
                    self.state = State::CollectingBits {
                        bit_index: 0,
                        accumulator: 0,
                    };
                }
                None
            }
            State::CollectingBits {
                bit_index,
                accumulator,
            } => {
                let bit = if in_window(dt_us, self.config.one_us, self.config.tolerance_us) {
                    true
                } else if in_window(dt_us, self.config.zero_us, self.config.tolerance_us) {
                    false
                } else {
                    // Frame abort: the current edge becomes the header reference.
                    self.state = State::AwaitingHeader;
                    return None;
                };
                let accumulator = if bit {
                    accumulator | (1_u32 << bit_index)
                } else {
                    accumulator
                };
                let bit_index = bit_index.saturating_add(1);
                if bit_index == 32 {
                    self.state = State::AwaitingHeader;
                    Some(accumulator)
                } else {
                    self.state = State::CollectingBits {
                        bit_index,
                        accumulator,
                    };
                    None
                }
            }
        }
    }
}

const fn in_window(dt_us: u64, target_us: u64, tolerance_us: u64) -> bool {
    dt_us >= target_us.saturating_sub(tolerance_us)
        && dt_us <= target_us.saturating_add(tolerance_us)
}

/// Validate a completed code against the plain NEC convention: the address
/// byte and the command byte are each followed by their bitwise complement.
#[must_use]
pub const fn check(code: u32) -> bool {
    let addr = (code & 0xFF) as u8;
    let addr_inv = ((code >> 8) & 0xFF) as u8;
    (addr ^ addr_inv) == 0xFF && check_extended(code)
}

/// Validate a completed code against the extended NEC convention: the address
/// occupies both low bytes, so only the command/complement pair is checked.
#[must_use]
pub const fn check_extended(code: u32) -> bool {
    let cmd = ((code >> 16) & 0xFF) as u8;
    let cmd_inv = ((code >> 24) & 0xFF) as u8;
    (cmd ^ cmd_inv) == 0xFF
}

/// Address bits of a completed code (16-bit in the extended convention, low
/// byte only in the plain one).
#[must_use]
pub const fn address(code: u32) -> u16 {
    (code & 0xFFFF) as u16
}

/// Command byte of a completed code.
#[must_use]
pub const fn command(code: u32) -> u8 {
    ((code >> 16) & 0xFF) as u8
}
