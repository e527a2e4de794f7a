//! This module contains code used to place the MCU in low power modes.
//! Reference section 6.3: `Low-power modes` of the G4 Reference Manual.

/// Mode the core waits in between comparator events.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum LowPowerMode {
    /// Core clock stopped, peripherals running.
    Sleep,
    /// Values correspond to the PWR_CR1 LPMS bits.
    Stop0,
    Stop1,
    Standby,
}

impl LowPowerMode {
    /// Whether SLEEPDEEP must be set to enter this mode.
    pub fn is_deep(self) -> bool {
        !matches!(self, Self::Sleep)
    }

    /// `PWR_CR1.LPMS` value, for deep modes.
    pub fn lpms(self) -> u8 {
        match self {
            Self::Sleep | Self::Stop0 => 0b000,
            Self::Stop1 => 0b001,
            Self::Standby => 0b011,
        }
    }

    /// Whether an EXTI line (and so a comparator) can wake the core. Standby only
    /// wakes on WKUP pins, RTC and reset.
    pub fn wakes_on_exti(self) -> bool {
        !matches!(self, Self::Standby)
    }
}

#[cfg(hw)]
pub use hw::*;

#[cfg(hw)]
mod hw {
    use cortex_m::{Peripherals, asm::wfi, peripheral::SCB};

    use super::LowPowerMode;
    use crate::{pac, traits::SleepControl};

    /// Select `mode` for the next WFI / ISR exit: SLEEPDEEP in the SCB, LPMS in PWR_CR1.
    fn select(scb: &mut SCB, mode: LowPowerMode) {
        if mode.is_deep() {
            let pwr = unsafe { &(*pac::PWR::ptr()) };
            pwr.cr1().modify(|_, w| unsafe { w.lpms().bits(mode.lpms()) });
            scb.set_sleepdeep();
        } else {
            scb.clear_sleepdeep();
        }
    }

    /// Drops the core into the configured mode whenever the last ISR exits. Holds no
    /// peripheral; the SCB is stolen per call, so `main` and the ISR can each have one.
    #[derive(Clone, Copy)]
    pub struct SleepOnExit {
        mode: LowPowerMode,
    }

    impl SleepOnExit {
        pub fn new(mode: LowPowerMode) -> Self {
            let mut scb = unsafe { Peripherals::steal().SCB };
            select(&mut scb, mode);
            Self { mode }
        }

        pub fn mode(&self) -> LowPowerMode {
            self.mode
        }
    }

    impl SleepControl for SleepOnExit {
        fn sleep_on_exit(&mut self) {
            let mut scb = unsafe { Peripherals::steal().SCB };
            // Re-select in case something woke us up from a different mode.
            select(&mut scb, self.mode);
            // Sleep-on-exit: if the SLEEPONEXIT bit is set, the MCU enters the selected mode
            // as soon as it exits the lowest priority ISR.
            scb.set_sleeponexit();
        }

        fn wait_for_interrupt(&mut self) {
            wfi();
        }
    }
}
