//! Edge-timestamped signal decoding for RP2040/RP2350 firmware.
//!
//! The decoder cores ([`pulse_width`], [`nec`], [`shutter`],
//! [`zero_crossing`], [`cycle_tracker`], [`event_sequence`]) are pure
//! timestamp-driven state machines with no hardware dependencies; they run
//! and test on the host. The `pico1`/`pico2` features add the device
//! abstractions (`ir_remote`, `shutter_glasses`) that tie the decoders to
//! GPIO edges via Embassy tasks.
#![no_std]

pub mod cycle_tracker;
mod error;
pub mod event_sequence;
pub mod nec;
pub mod pulse_width;
pub mod shutter;
pub mod zero_crossing;

#[cfg(any(feature = "pico1", feature = "pico2"))]
pub mod ir_remote;
#[cfg(any(feature = "pico1", feature = "pico2"))]
pub mod shutter_glasses;

// Re-export commonly used items
pub use cycle_tracker::CycleTracker;
pub use error::{Error, Result};
pub use event_sequence::{TimedEvent, TimedEvents};
pub use nec::{NecConfig, NecDecoder};
pub use pulse_width::PulseWidth;
pub use shutter::{ShutterDecoder, ShutterPhase};
pub use zero_crossing::ZeroCrossing;

#[cfg(any(feature = "pico1", feature = "pico2"))]
pub use ir_remote::{IrRemote, IrRemoteEvent, IrRemoteStatic};
#[cfg(any(feature = "pico1", feature = "pico2"))]
pub use shutter_glasses::{ShutterGlasses, ShutterGlassesStatic};
