//! Application configuration. `Default` gives the reference board's settings: COMP input
//! 1 against 2.0 V * 8/32, rising-edge interrupt, divide by 200, Stop 1 between events.

use crate::{
    comp::{CompConfig, InterruptEdge, ReferenceConfig},
    divider::{DEFAULT_RATIO, EdgeDivider},
    error::Result,
    gpio::PinState,
    low_power::LowPowerMode,
};

/// Cycles to wait after enabling the comparator, for the reference to settle.
pub const DEFAULT_SETTLE_CYCLES: u32 = 75;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The selected low-power mode can't be woken by a comparator interrupt.
    NoComparatorWakeup,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AppConfig {
    pub comp: CompConfig,
    pub reference: ReferenceConfig,
    pub edge: InterruptEdge,
    /// Comparator edges per secondary indicator toggle.
    pub divide_by: u16,
    pub low_power: LowPowerMode,
    pub settle_cycles: u32,
    /// Level both indicators are driven to before the first event.
    pub initial: PinState,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            comp: CompConfig::default(),
            reference: ReferenceConfig::default(),
            edge: InterruptEdge::Rising,
            divide_by: DEFAULT_RATIO,
            low_power: LowPowerMode::Stop1,
            settle_cycles: DEFAULT_SETTLE_CYCLES,
            initial: PinState::Low,
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        self.reference.validate()?;
        EdgeDivider::new(self.divide_by)?;
        if !self.low_power.wakes_on_exti() {
            return Err(ConfigError::NoComparatorWakeup.into());
        }
        Ok(())
    }

    /// A fresh divider for this config.
    pub fn divider(&self) -> Result<EdgeDivider> {
        Ok(EdgeDivider::new(self.divide_by)?)
    }
}
