//! A device abstraction for NVIDIA 3D-glasses shutter synchronization.
//!
//! See [`ShutterGlasses`] for usage examples.
use defmt::info;
use embassy_executor::Spawner;
use embassy_futures::select::{Either, select};
use embassy_rp::Peri;
use embassy_rp::gpio::{AnyPin, Input, Pin, Pull};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel as EmbassyChannel;
use embassy_time::{Duration, Instant, Timer};

use crate::shutter::{IDLE_TIMEOUT_US, ShutterDecoder, ShutterPhase};
use crate::{Error, Result};

// ===== Public API ===========================================================

/// Static type for the `ShutterGlasses` device abstraction.
///
/// See [`ShutterGlasses`] for usage examples.
pub type ShutterGlassesStatic = EmbassyChannel<CriticalSectionRawMutex, ShutterPhase, 4>;

/// A device abstraction for the emitter line of NVIDIA shutter glasses.
///
/// A background task feeds every edge to [`ShutterDecoder`] and, when the
/// line goes quiet, drives the decoder's idle check so the phase falls back
/// to [`ShutterPhase::Off`]. Phase changes are sent on the channel.
///
/// # Examples
/// ```no_run
/// # #![no_std]
/// # #![no_main]
/// # use panic_probe as _;
/// # use defmt::info;
/// # use embassy_executor::Spawner;
/// # use edge_kit::shutter_glasses::ShutterGlasses;
/// # async fn example(p: embassy_rp::Peripherals, spawner: Spawner) -> edge_kit::Result<()> {
/// static SHUTTER_STATIC: edge_kit::shutter_glasses::ShutterGlassesStatic =
///     ShutterGlasses::new_static();
/// let glasses = ShutterGlasses::new(p.PIN_16, &SHUTTER_STATIC, spawner)?;
///
/// loop {
///     let phase = glasses.wait().await;
///     info!("shutter phase: {}", phase);
/// }
/// # }
/// ```
pub struct ShutterGlasses<'a> {
    shutter_static: &'a ShutterGlassesStatic,
}

impl ShutterGlasses<'_> {
    /// Create static channel resources for phase changes.
    ///
    /// See [`ShutterGlasses`] for usage examples.
    #[must_use]
    pub const fn new_static() -> ShutterGlassesStatic {
        EmbassyChannel::new()
    }

    /// Create a new shutter-sync receiver on the specified pin.
    ///
    /// See [`ShutterGlasses`] for usage examples.
    ///
    /// # Errors
    /// Returns an error if the background task cannot be spawned.
    pub fn new<P: Pin>(
        pin: Peri<'static, P>,
        shutter_static: &'static ShutterGlassesStatic,
        spawner: Spawner,
    ) -> Result<Self> {
        // Type erase to Peri<'static, AnyPin> (keep the Peri wrapper!)
        let any: Peri<'static, AnyPin> = pin.into();
        spawner
            .spawn(shutter_glasses_task(
                Input::new(any, Pull::Down),
                shutter_static,
            ))
            .map_err(Error::TaskSpawn)?;
        Ok(Self { shutter_static })
    }

    /// Wait for the next phase change.
    ///
    /// See [`ShutterGlasses`] for usage examples.
    pub async fn wait(&self) -> ShutterPhase {
        self.shutter_static.receive().await
    }
}

// ===== The non-generic task =================================================

#[embassy_executor::task]
async fn shutter_glasses_task(
    mut pin: Input<'static>,
    shutter_static: &'static ShutterGlassesStatic,
) -> ! {
    let mut decoder = ShutterDecoder::new();
    // Toggle instead of re-reading the pin to avoid race conditions on fast
    // edge bursts.
    let mut level_high = pin.is_high();
    let mut phase = ShutterPhase::Off;

    info!("shutter glasses task started");
    loop {
        let new_phase = match select(
            pin.wait_for_any_edge(),
            Timer::after(Duration::from_micros(IDLE_TIMEOUT_US)),
        )
        .await
        {
            Either::First(()) => {
                level_high = !level_high;

                // Sanity check: verify our toggle matches the actual pin state.
                // The idle timer branch can win the select while an edge lands,
                // dropping that edge and inverting every level fed from then on.
                let actual_level_high = pin.is_high();
                if level_high != actual_level_high {
                    defmt::warn!(
                        "shutter glasses: pin state mismatch! Expected {}, got {} (missed edge?)",
                        level_high,
                        actual_level_high
                    );
                    // Resync to the actual pin state and drop the decoder's
                    // position lock rather than feed it inverted edges.
                    level_high = actual_level_high;
                    decoder = ShutterDecoder::new();
                    continue;
                }

                decoder.feed(level_high, Instant::now().as_micros())
            }
            Either::Second(()) => decoder.idle(Instant::now().as_micros()),
        };

        if new_phase != phase {
            phase = new_phase;
            info!("shutter glasses: phase {}", phase);
            shutter_static.send(phase).await;
        }
    }
}
