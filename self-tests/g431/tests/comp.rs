// On-chip tests for the comparator and its interrupt line.

// This test requires wires to be connected between the following pins:
// * pa1 <-> pa8  (pa8 drives the comparator input)
// * pa6 <-> pa9  (comparator output read back on pa9)

#![deny(warnings)]
#![no_std]
#![no_main]

#[cfg(test)]
#[embedded_test::tests(setup = rtt_target::rtt_init_defmt!())]
mod tests {
    use comp_toggle::{
        AppConfig, Board, CompEventHandler,
        comp::{Comp, CompDevice},
        gpio::{Pin, PinMode, PinState, Port},
        init,
        low_power::{LowPowerMode, SleepOnExit},
    };

    // Cycles for the comparator to follow its input.
    const SETTLE: u32 = 10_000;

    struct State {
        drive: Pin,
        readback: Pin,
        comp: Comp,
    }

    #[init]
    fn init() -> State {
        let _input = Pin::new(Port::A, 1, PinMode::Analog);
        let _out = Pin::new(Port::A, 6, PinMode::Alt(8));

        let mut comp = Comp::new(CompDevice::One);
        init::start(&mut comp, &AppConfig::default()).unwrap();

        State {
            drive: Pin::new(Port::A, 8, PinMode::Output),
            readback: Pin::new(Port::A, 9, PinMode::Input),
            comp,
        }
    }

    #[test]
    fn input_low_reads_low(mut state: State) {
        state.drive.set_low();
        cortex_m::asm::delay(SETTLE);
        defmt::assert!(!state.comp.get_output_level());
        defmt::assert!(state.readback.input_state() == PinState::Low);
    }

    #[test]
    fn input_high_reads_high(mut state: State) {
        // VDD is well above the 0.5 V threshold.
        state.drive.set_high();
        cortex_m::asm::delay(SETTLE);
        defmt::assert!(state.comp.get_output_level());
        defmt::assert!(state.readback.input_state() == PinState::High);
    }

    #[test]
    fn rising_edge_sets_flag(mut state: State) {
        state.drive.set_low();
        cortex_m::asm::delay(SETTLE);
        state.comp.clear_interrupt();
        defmt::assert!(!state.comp.interrupt_pending());

        state.drive.set_high();
        cortex_m::asm::delay(SETTLE);
        defmt::assert!(state.comp.interrupt_pending());

        state.comp.clear_interrupt();
        defmt::assert!(!state.comp.interrupt_pending());
    }

    #[test]
    fn handler_clears_flag(mut state: State) {
        state.drive.set_low();
        cortex_m::asm::delay(SETTLE);
        state.drive.set_high();
        cortex_m::asm::delay(SETTLE);
        defmt::assert!(state.comp.interrupt_pending());

        let led = Pin::new(Port::A, 5, PinMode::Output);
        let divided = Pin::new(Port::A, 10, PinMode::Output);
        // Plain sleep, so nothing here actually stops the core on exit.
        let sleep = SleepOnExit::new(LowPowerMode::Sleep);
        let mut board = Board::new(led, divided, state.comp, sleep, PinState::Low);
        let mut handler = CompEventHandler::default();

        let outcome = handler.on_event(&mut board);
        defmt::assert!(outcome.primary == PinState::High);
        defmt::assert!(!board.irq.interrupt_pending());
        defmt::assert!(board.primary.output_state() == PinState::High);

        // Thread mode isn't an ISR; don't leave SLEEPONEXIT set for the runner.
        unsafe { cortex_m::Peripherals::steal().SCB.clear_sleeponexit() };
    }
}
