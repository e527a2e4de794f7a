//! One-shot startup: configure the comparator and its interrupt, then park the core.

use crate::{
    comp::NegativeInput,
    config::AppConfig,
    error::Result,
    traits::{CompPeripheral, SleepControl},
};

/// Configure and start the comparator. Stops at the first error, before the
/// comparator is powered.
pub fn start<C: CompPeripheral>(comp: &mut C, cfg: &AppConfig) -> Result<()> {
    cfg.validate()?;

    comp.configure(&cfg.comp)?;
    // An IO inverting input leaves the ladder unused; `validate` has checked it already.
    if cfg.comp.inmsel == NegativeInput::Reference {
        comp.configure_reference(&cfg.reference)?;
    }

    // Clear any errant interrupts before unmasking.
    comp.clear_interrupts();
    comp.enable_interrupt(cfg.edge);
    comp.enable();

    comp.settle(cfg.settle_cycles);

    comp_info!(
        "Comparator running: {} mV threshold, {:?} edge, divide by {}",
        cfg.reference.lower_threshold_mv(),
        cfg.edge,
        cfg.divide_by
    );
    Ok(())
}

/// Hand the core over to interrupts for good. Each ISR exit drops straight back
/// into the low-power mode; the loop only guards against spurious wakeups.
pub fn park<L: SleepControl>(sleep: &mut L) -> ! {
    sleep.sleep_on_exit();
    loop {
        sleep.wait_for_interrupt();
    }
}
