//! Binds two `embedded-hal` output pins, the comparator's interrupt source and the
//! core's sleep control into the interface the event handler drives.

use embedded_hal::digital::OutputPin;

use crate::{
    gpio::{Indicator, PinState},
    traits::{CompEventHw, InterruptSource, SleepControl},
};

pub struct Board<P, S, I, L> {
    /// Primary indicator; the LED.
    pub primary: P,
    pub secondary: S,
    pub irq: I,
    pub sleep: L,
}

impl<P, S, I, L> Board<P, S, I, L>
where
    P: OutputPin,
    S: OutputPin,
{
    /// Drive both indicators to `initial` and take ownership.
    pub fn new(mut primary: P, mut secondary: S, irq: I, sleep: L, initial: PinState) -> Self {
        primary.set_state(initial.into()).ok();
        secondary.set_state(initial.into()).ok();

        Self {
            primary,
            secondary,
            irq,
            sleep,
        }
    }
}

impl<P, S, I, L> CompEventHw for Board<P, S, I, L>
where
    P: OutputPin,
    S: OutputPin,
    I: InterruptSource,
    L: SleepControl,
{
    fn set_output(&mut self, pin: Indicator, level: PinState) {
        // Pin errors are dropped; the handler has nowhere to report them.
        match pin {
            Indicator::Primary => self.primary.set_state(level.into()).ok(),
            Indicator::Secondary => self.secondary.set_state(level.into()).ok(),
        };
    }

    fn clear_interrupt_flag(&mut self) {
        self.irq.clear_interrupt();
    }

    fn enter_low_power(&mut self) {
        self.sleep.sleep_on_exit();
    }
}
