//! LED toggle in Stop 1, input compared against 2.0 V * 8/32.
//!
//! COMP1 compares PA1 against a quarter of the internal reference. Each rising edge of
//! the comparator output toggles the LED on PA5; every 200th edge also toggles PA10.
//! The comparator output is routed to PA6 so it can be scoped directly. Between edges
//! the core sits in Stop 1.
//!
//! ```text
//!               STM32G431
//!          ------------------
//!         |              PA1 |<- Vcompare
//!         |              PA6 |--> COMP1_OUT
//!         |              PA5 |--> LED, toggles per edge
//!         |             PA10 |--> toggles every 200 edges
//! ```

#![no_std]
#![no_main]

use cortex_m_rt::entry; // The runtime

use comp_toggle::{
    AppConfig, Board, CompEventHandler, access_global,
    comp::{Comp, CompDevice},
    gpio::{Pin, PinMode, Port},
    init, init_globals,
    low_power::SleepOnExit,
    make_globals,
    pac::{self, interrupt},
    setup_nvic,
};

use defmt_rtt as _;
// global logger
use panic_probe as _;

type DemoBoard = Board<Pin, Pin, Comp, SleepOnExit>;

make_globals!((HANDLER, CompEventHandler), (BOARD, DemoBoard));

// This marks the entrypoint of our application.

#[entry]
fn main() -> ! {
    // Set up CPU peripherals
    let mut cp = cortex_m::Peripherals::take().unwrap();
    // Set up microcontroller peripherals
    let _dp = pac::Peripherals::take().unwrap();

    defmt::println!("Comparator toggle demo");

    let cfg = AppConfig::default();

    // Comparator input, and its output on the alternate function so it's visible on a pin.
    let _vcompare = Pin::new(Port::A, 1, PinMode::Analog);
    let _comp_out = Pin::new(Port::A, 6, PinMode::Alt(8));

    let led = Pin::new(Port::A, 5, PinMode::Output);
    let divided = Pin::new(Port::A, 10, PinMode::Output);

    let mut comp = Comp::new(CompDevice::One);
    init::start(&mut comp, &cfg).unwrap();

    let sleep = SleepOnExit::new(cfg.low_power);
    let board = Board::new(led, divided, comp, sleep, cfg.initial);
    let handler = CompEventHandler::new(cfg.divider().unwrap(), cfg.initial);

    init_globals!((HANDLER, handler), (BOARD, board));

    setup_nvic!([(COMP1_2_3, 1)], cp);

    let mut sleep = sleep;
    init::park(&mut sleep)
}

#[interrupt]
/// Comparator edge.
fn COMP1_2_3() {
    critical_section::with(|cs| {
        access_global!(BOARD, board, cs);
        access_global!(HANDLER, handler, cs);

        let outcome = handler.on_event(board);
        if outcome.secondary_toggled {
            defmt::debug!("{} comparator edges", handler.events());
        }
    });
}

// same panicking *behavior* as `panic-probe` but doesn't print a panic message
// this prevents the panic message being printed *twice* when `defmt::panic` is invoked
#[defmt::panic_handler]
fn panic() -> ! {
    cortex_m::asm::udf()
}
