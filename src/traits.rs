// Hardware seams. The handler and initializer only talk to the MCU through these, so
// they run against mocks on the host.

use crate::{
    comp::{CompConfig, InterruptEdge, ReferenceConfig},
    error::Result,
    gpio::{Indicator, PinState},
};

/// What the comparator event handler needs from the hardware.
pub trait CompEventHw {
    /// Drive one of the two indicator outputs.
    fn set_output(&mut self, pin: Indicator, level: PinState);

    /// Clear the comparator's pending interrupt flag. Must run before the ISR returns,
    /// or the interrupt fires again immediately.
    fn clear_interrupt_flag(&mut self);

    /// Arrange for the core to drop back into the low-power wait state when the
    /// handler returns.
    fn enter_low_power(&mut self);
}

/// One-shot comparator setup, in the order `init::start` calls it.
pub trait CompPeripheral {
    /// Input routing, power mode, output filter and polarity.
    fn configure(&mut self, cfg: &CompConfig) -> Result<()>;

    /// Reference ladder feeding the inverting input.
    fn configure_reference(&mut self, cfg: &ReferenceConfig) -> Result<()>;

    /// Clear any errant interrupt flags left over from reset or configuration.
    fn clear_interrupts(&mut self);

    fn enable_interrupt(&mut self, edge: InterruptEdge);

    /// Power up the comparator.
    fn enable(&mut self);

    /// Busy-wait for the reference to settle.
    fn settle(&mut self, cycles: u32);
}

/// A peripheral interrupt whose pending flag is cleared by software.
pub trait InterruptSource {
    fn clear_interrupt(&mut self);
}

/// Core sleep control.
pub trait SleepControl {
    /// Return to the configured low-power mode as soon as the running ISR exits.
    fn sleep_on_exit(&mut self);

    /// Halt until an interrupt arrives.
    fn wait_for_interrupt(&mut self);
}
