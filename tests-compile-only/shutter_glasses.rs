//! Compile-only verification for ShutterGlasses construction.
//!
//! Type-checked for thumbv6m-none-eabi with `--features pico1,arm`; never run.

#![no_std]
#![no_main]
#![allow(dead_code, reason = "Compile-time verification only")]

use defmt_rtt as _;
use edge_kit::Result;
use edge_kit::shutter_glasses::{ShutterGlasses, ShutterGlassesStatic};
use embassy_executor::Spawner;
use panic_probe as _;

async fn construct(p: embassy_rp::Peripherals, spawner: Spawner) -> Result<()> {
    static SHUTTER_STATIC: ShutterGlassesStatic = ShutterGlasses::new_static();
    let glasses = ShutterGlasses::new(p.PIN_16, &SHUTTER_STATIC, spawner)?;
    let phase = glasses.wait().await;
    defmt::info!("phase: {}", phase);
    Ok(())
}
