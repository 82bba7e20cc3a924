//! Compile-only verification for IrRemote construction.
//!
//! Type-checked for thumbv6m-none-eabi with `--features pico1,arm`; never run.

#![no_std]
#![no_main]
#![allow(dead_code, reason = "Compile-time verification only")]

use defmt_rtt as _;
use edge_kit::Result;
use edge_kit::ir_remote::{IrRemote, IrRemoteEvent, IrRemoteStatic};
use embassy_executor::Spawner;
use panic_probe as _;

async fn construct(p: embassy_rp::Peripherals, spawner: Spawner) -> Result<()> {
    static IR_STATIC: IrRemoteStatic = IrRemote::new_static();
    let ir = IrRemote::new(p.PIN_15, &IR_STATIC, spawner)?;
    let IrRemoteEvent::Press { addr, cmd } = ir.wait().await;
    defmt::info!("addr=0x{:04X} cmd=0x{:02X}", addr, cmd);
    Ok(())
}
