//! A device abstraction for infrared receivers using the NEC protocol.
//!
//! See [`IrRemote`] for usage examples.
use defmt::info;
use embassy_executor::Spawner;
use embassy_rp::Peri;
use embassy_rp::gpio::{AnyPin, Input, Pin, Pull};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel as EmbassyChannel;
use embassy_time::Instant;

use crate::nec::{self, NecConfig, NecDecoder};
use crate::{Error, Result};

// ===== Public API ===========================================================

/// Events received from the infrared receiver.
///
/// See [`IrRemote`] for usage examples.
#[derive(Copy, Clone, Debug, PartialEq, Eq, defmt::Format)]
pub enum IrRemoteEvent {
    /// Button press with 16-bit address and 8-bit command.
    /// Supports both standard NEC (8-bit address) and extended NEC (16-bit address).
    Press {
        /// NEC address bits.
        addr: u16,
        /// NEC command byte.
        cmd: u8,
    },
}

/// Static type for the `IrRemote` device abstraction.
///
/// See [`IrRemote`] for usage examples.
pub type IrRemoteStatic = EmbassyChannel<CriticalSectionRawMutex, IrRemoteEvent, 8>;

/// A device abstraction for an infrared receiver using the NEC protocol.
///
/// A background task timestamps each mark edge, runs [`NecDecoder`] over the
/// mark-to-mark intervals, and sends complement-validated codes on the
/// channel.
///
/// # Examples
/// ```no_run
/// # #![no_std]
/// # #![no_main]
/// # use panic_probe as _;
/// # use defmt::info;
/// # use embassy_executor::Spawner;
/// # use edge_kit::ir_remote::{IrRemote, IrRemoteEvent};
/// # async fn example(p: embassy_rp::Peripherals, spawner: Spawner) -> edge_kit::Result<()> {
/// static IR_STATIC: edge_kit::ir_remote::IrRemoteStatic = IrRemote::new_static();
/// let ir = IrRemote::new(p.PIN_15, &IR_STATIC, spawner)?;
///
/// loop {
///     let IrRemoteEvent::Press { addr, cmd } = ir.wait().await;
///     info!("IR: addr=0x{:04X}, cmd=0x{:02X}", addr, cmd);
/// }
/// # }
/// ```
pub struct IrRemote<'a> {
    ir_static: &'a IrRemoteStatic,
}

impl IrRemote<'_> {
    /// Create static channel resources for IR events.
    ///
    /// See [`IrRemote`] for usage examples.
    #[must_use]
    pub const fn new_static() -> IrRemoteStatic {
        EmbassyChannel::new()
    }

    /// Create a new IR receiver on the specified pin.
    ///
    /// See [`IrRemote`] for usage examples.
    ///
    /// # Errors
    /// Returns an error if the background task cannot be spawned.
    pub fn new<P: Pin>(
        pin: Peri<'static, P>,
        ir_static: &'static IrRemoteStatic,
        spawner: Spawner,
    ) -> Result<Self> {
        // Type erase to Peri<'static, AnyPin> (keep the Peri wrapper!)
        let any: Peri<'static, AnyPin> = pin.into();
        // Pull::Up for typical IR receivers (they idle HIGH with active-low modules)
        spawner
            .spawn(ir_remote_task(Input::new(any, Pull::Up), ir_static))
            .map_err(Error::TaskSpawn)?;
        Ok(Self { ir_static })
    }

    /// Wait for the next IR event.
    ///
    /// See [`IrRemote`] for usage examples.
    pub async fn wait(&self) -> IrRemoteEvent {
        self.ir_static.receive().await
    }
}

// ===== The non-generic task =================================================

#[embassy_executor::task]
async fn ir_remote_task(mut pin: Input<'static>, ir_static: &'static IrRemoteStatic) -> ! {
    let mut decoder = NecDecoder::new(NecConfig::DEFAULT);

    info!("IR remote task started");
    loop {
        // Active-low receiver: a falling edge is the start of a mark.
        pin.wait_for_falling_edge().await;
        let t_us = Instant::now().as_micros();

        let Some(code) = decoder.feed(t_us) else {
            continue;
        };
        if nec::check_extended(code) {
            let event = IrRemoteEvent::Press {
                addr: nec::address(code),
                cmd: nec::command(code),
            };
            info!(
                "IR remote: addr=0x{:04X} cmd=0x{:02X}",
                nec::address(code),
                nec::command(code)
            );
            ir_static.send(event).await;
        } else {
            defmt::warn!("IR remote: complement check failed, code=0x{:08X}", code);
        }
    }
}
