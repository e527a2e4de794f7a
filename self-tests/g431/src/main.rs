//! Flash target for the on-chip self-tests. Blinks the board LED through the crate's
//! `Pin` so a plain `cargo run` shows the board is alive.

#![deny(warnings)]
#![no_std]
#![no_main]

use cortex_m_rt::entry; // The runtime

use comp_toggle::gpio::{Pin, PinMode, Port};

// Import the panic handler
use panic_probe as _;

#[entry]
fn main() -> ! {
    rtt_target::rtt_init_defmt!();

    defmt::println!("Hello, world!");

    let mut led = Pin::new(Port::A, 5, PinMode::Output);

    loop {
        led.toggle();
        defmt::debug!("LED toggled.");
        cortex_m::asm::delay(8_000_000);
    }
}
