//! Comparator
//!
//! Configuration types and reference ladder math are chip-independent. The `Comp`
//! driver for the STM32G4 comparators is only built with a chip feature.

// Config enums
/// Comparator input plus (Non-inverting Input)
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
// STM32G4 reference manual section 24.3.2 table 196
pub enum PositiveInput {
    /// From the first GPIO pin connected to the comparator.
    ///
    /// The GPIO pin used depends on the MCU and comparator used.
    #[default]
    Io1 = 0b0,
    /// From the second GPIO pin connected to the comparator.
    Io2 = 0b1,
}

/// Comparator input minus (Inverting Input), as seen by the application.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NegativeInput {
    /// The internal reference ladder, set up by [ReferenceConfig].
    #[default]
    Reference,
    Io1,
    Io2,
}

/// Comparator power mode. Trades propagation delay for supply current.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerMode {
    /// Lowest propagation delay.
    HighSpeed,
    #[default]
    Normal,
    /// Highest propagation delay.
    UltraLow,
}

/// Output filter. Each level lengthens the filter's delay.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FilterDelay {
    Off,
    #[default]
    Level1,
    Level2,
    Level3,
    Level4,
}

/// Comparator output polarity
///
/// When [OutputPolarity::NotInverted] is used.
/// The comparator output will be high (1) when [PositiveInput] has higher
/// voltage than [NegativeInput]. The comparator output will be low (0) when
/// [PositiveInput] has lower voltage than [NegativeInput].
///
/// When [OutputPolarity::Inverted] is used, the opposite holds.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputPolarity {
    #[default]
    NotInverted = 0b0,
    Inverted = 0b1,
}

/// Which comparator output edge raises the interrupt.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterruptEdge {
    #[default]
    Rising,
    Falling,
    Both,
}

impl InterruptEdge {
    /// (rising trigger, falling trigger)
    pub fn triggers(self) -> (bool, bool) {
        match self {
            Self::Rising => (true, false),
            Self::Falling => (false, true),
            Self::Both => (true, true),
        }
    }
}

/// Base voltage of the reference ladder.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RefBase {
    V1_5,
    #[default]
    V2_0,
    V2_5,
}

impl RefBase {
    pub fn millivolts(self) -> u32 {
        match self {
            Self::V1_5 => 1_500,
            Self::V2_0 => 2_000,
            Self::V2_5 => 2_500,
        }
    }
}

/// Whether the reference is held continuously or sampled.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReferenceAccuracy {
    #[default]
    Static,
    Clocked,
}

/// Comparator hysteresis
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Hysteresis {
    None = 0b000,
    TenMilliVolt = 0b001,
    TwentyMilliVolt = 0b010,
    ThirtyMilliVolt = 0b011,
    FourtyMilliVolt = 0b100,
    FiftyMilliVolt = 0b101,
    SixtyMilliVolt = 0b110,
    SeventyMilliVolt = 0b111,
}

impl Hysteresis {
    /// The largest step that doesn't exceed a threshold band of `mv` millivolts.
    pub fn from_band_mv(mv: u32) -> Self {
        match mv / 10 {
            0 => Self::None,
            1 => Self::TenMilliVolt,
            2 => Self::TwentyMilliVolt,
            3 => Self::ThirtyMilliVolt,
            4 => Self::FourtyMilliVolt,
            5 => Self::FiftyMilliVolt,
            6 => Self::SixtyMilliVolt,
            _ => Self::SeventyMilliVolt,
        }
    }
}

/// Comparator input minus, as encoded in `COMPx_CSR.INMSEL`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
// STM32G4 reference manual section 24.3.2 table 197
pub enum InvertingInput {
    OneQuarterVref = 0b000,
    OneHalfVref = 0b001,
    ThreeQuarterVref = 0b010,
    Vref = 0b011,
    Dac1 = 0b100,
    Dac2 = 0b101,
    Io1 = 0b110,
    Io2 = 0b111,
}

impl InvertingInput {
    /// The scaler tap matching a ladder fraction. The G4 scaler only has the four
    /// quarter taps.
    pub fn from_fraction_of_32(fraction: u8) -> Result<Self, CompError> {
        match fraction {
            8 => Ok(Self::OneQuarterVref),
            16 => Ok(Self::OneHalfVref),
            24 => Ok(Self::ThreeQuarterVref),
            32 => Ok(Self::Vref),
            _ => Err(CompError::UnsupportedReference),
        }
    }

    /// Whether this input needs the VREFINT scaler and bridge powered.
    pub fn uses_scaler(self) -> bool {
        matches!(
            self,
            Self::OneQuarterVref | Self::OneHalfVref | Self::ThreeQuarterVref
        )
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CompError {
    /// A ladder fraction outside 1..=32.
    FractionOutOfRange,
    /// Lower limit above upper limit.
    InvertedWindow,
    /// The hardware has no reference tap for this fraction.
    UnsupportedReference,
    /// The comparator registers are locked until reset.
    Locked,
}

// Structs
/// Reference voltage fed to the inverting input: a base voltage divided by a
/// 32-step ladder. Equal lower and upper fractions give a single static threshold;
/// distinct ones a hysteresis band.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReferenceConfig {
    pub base: RefBase,
    pub lower_fraction_of_32: u8,
    pub upper_fraction_of_32: u8,
    pub accuracy: ReferenceAccuracy,
}

impl Default for ReferenceConfig {
    /// 2.0 V * 8/32 = 0.5 V, no band.
    fn default() -> Self {
        Self {
            base: RefBase::V2_0,
            lower_fraction_of_32: 8,
            upper_fraction_of_32: 8,
            accuracy: ReferenceAccuracy::Static,
        }
    }
}

impl ReferenceConfig {
    pub fn validate(&self) -> Result<(), CompError> {
        let in_range = |f: u8| (1..=32).contains(&f);
        if !in_range(self.lower_fraction_of_32) || !in_range(self.upper_fraction_of_32) {
            return Err(CompError::FractionOutOfRange);
        }
        if self.lower_fraction_of_32 > self.upper_fraction_of_32 {
            return Err(CompError::InvertedWindow);
        }
        Ok(())
    }

    pub fn lower_threshold_mv(&self) -> u32 {
        self.base.millivolts() * self.lower_fraction_of_32 as u32 / 32
    }

    pub fn upper_threshold_mv(&self) -> u32 {
        self.base.millivolts() * self.upper_fraction_of_32 as u32 / 32
    }

    /// Width of the hysteresis band.
    pub fn band_mv(&self) -> u32 {
        self.upper_threshold_mv()
            .saturating_sub(self.lower_threshold_mv())
    }

    pub fn is_static(&self) -> bool {
        self.lower_fraction_of_32 == self.upper_fraction_of_32
    }
}

/// Initial configuration data for the comparator peripheral.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CompConfig {
    /// Comparator non-inverting input.
    pub inpsel: PositiveInput,
    /// Comparator inverting input.
    pub inmsel: NegativeInput,
    /// Comparator power mode.
    pub pwrmode: PowerMode,
    /// Comparator output filter.
    pub filter: FilterDelay,
    /// Comparator output polarity.
    pub polarity: OutputPolarity,
}

#[cfg(hw)]
pub use hw::*;

#[cfg(hw)]
mod hw {
    use super::*;
    use crate::{
        error::Result,
        pac::{self, comp::CCSR},
        traits::{CompPeripheral, InterruptSource},
    };

    /// Comparator devices avaiable on every G4 part.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub enum CompDevice {
        One,
        Two,
        Three,
        Four,
    }

    impl CompDevice {
        /// EXTI line the comparator output is wired to. G4 RM, table 104.
        pub fn exti_line(self) -> u8 {
            match self {
                Self::One => 21,
                Self::Two => 22,
                Self::Three => 29,
                Self::Four => 30,
            }
        }
    }

    /// Represents an Analog Comparator peripheral.
    pub struct Comp {
        device: CompDevice,
        /// The lock status of the comparator.
        is_locked: bool,
    }

    impl Comp {
        /// Enable the SYSCFG/COMP clock and take this comparator.
        pub fn new(device: CompDevice) -> Self {
            let rcc = unsafe { &(*pac::RCC::ptr()) };
            rcc.apb2enr().modify(|_, w| w.syscfgen().set_bit());

            Self {
                device,
                is_locked: false,
            }
        }

        pub fn device(&self) -> CompDevice {
            self.device
        }

        // Get a reference to the CSR from the COMP RegisterBlock for this comparator.
        // All four share the `CCSR` layout.
        pub fn csr(&self) -> &CCSR {
            let comp = unsafe { &(*pac::COMP::ptr()) };
            match self.device {
                CompDevice::One => comp.c1csr(),
                CompDevice::Two => comp.c2csr(),
                CompDevice::Three => comp.c3csr(),
                CompDevice::Four => comp.c4csr(),
            }
        }

        fn check_unlocked(&self) -> Result<()> {
            if self.is_locked {
                return Err(CompError::Locked.into());
            }
            Ok(())
        }

        pub fn enable(&self) {
            self.csr().modify(|_, w| w.en().set_bit());
        }

        pub fn disable(&self) {
            self.csr().modify(|_, w| w.en().clear_bit());
        }

        // Sets the inverting input in the CSR, powering the scaler when a
        // VREFINT tap is selected.
        pub fn set_inverting_input(&self, input: InvertingInput) {
            let scaler = input.uses_scaler();
            self.csr().modify(|_, w| unsafe {
                w.inmsel().bits(input as u8);
                w.scalen().bit(scaler || input == InvertingInput::Vref);
                w.brgen().bit(scaler)
            });
        }

        pub fn set_non_inverting_input(&self, input: PositiveInput) {
            self.csr().modify(|_, w| w.inpsel().bit(input as u8 != 0));
        }

        pub fn set_polarity(&self, polarity: OutputPolarity) {
            self.csr().modify(|_, w| w.pol().bit((polarity as u8) != 0));
        }

        pub fn set_hysteresis(&self, hyst: Hysteresis) {
            self.csr().modify(|_, w| unsafe { w.hyst().bits(hyst as u8) });
        }

        /// Locks the comparator.
        ///
        /// This locks the comparator registers making it only read-only.
        ///
        /// **Note:** The lock also applies to the lock bit itself. Therefore,
        /// the comparator register/configuration **cannot** be changed until
        /// a hardware reset.
        pub fn lock(&mut self) {
            self.is_locked = true;
            self.csr().modify(|_, w| w.lock().set_bit());
        }

        /// Gets the output level of the comparator, after polarity.
        pub fn get_output_level(&self) -> bool {
            self.csr().read().value().bit()
        }

        // The EXTI registers are accessed as raw bits: COMP3/4 sit on lines 29/30,
        // which the PAC doesn't name in every register.

        /// Route the comparator output to its EXTI line and select the
        /// triggering edge(s).
        pub fn enable_interrupt(&mut self, edge: InterruptEdge) {
            let exti = unsafe { &(*pac::EXTI::ptr()) };
            let mask = 1 << self.device.exti_line();
            let (rise, fall) = edge.triggers();

            let apply = |bits: u32, on: bool| if on { bits | mask } else { bits & !mask };

            exti.rtsr1().modify(|r, w| unsafe { w.bits(apply(r.bits(), rise)) });
            exti.ftsr1().modify(|r, w| unsafe { w.bits(apply(r.bits(), fall)) });
            exti.imr1().modify(|r, w| unsafe { w.bits(r.bits() | mask) });
        }

        pub fn disable_interrupt(&mut self) {
            let exti = unsafe { &(*pac::EXTI::ptr()) };
            let mask = 1 << self.device.exti_line();
            exti.imr1().modify(|r, w| unsafe { w.bits(r.bits() & !mask) });
        }

        /// Clear the pending bit. `PR1` is write-1-to-clear, so other lines are untouched.
        pub fn clear_interrupt(&mut self) {
            let exti = unsafe { &(*pac::EXTI::ptr()) };
            exti.pr1()
                .write(|w| unsafe { w.bits(1 << self.device.exti_line()) });
        }

        /// Whether this comparator's EXTI line is pending.
        pub fn interrupt_pending(&self) -> bool {
            let exti = unsafe { &(*pac::EXTI::ptr()) };
            exti.pr1().read().bits() & (1 << self.device.exti_line()) != 0
        }
    }

    impl CompPeripheral for Comp {
        fn configure(&mut self, cfg: &CompConfig) -> Result<()> {
            self.check_unlocked()?;

            self.set_non_inverting_input(cfg.inpsel);
            match cfg.inmsel {
                // Set with the reference, in `configure_reference`.
                NegativeInput::Reference => (),
                NegativeInput::Io1 => self.set_inverting_input(InvertingInput::Io1),
                NegativeInput::Io2 => self.set_inverting_input(InvertingInput::Io2),
            }
            self.set_polarity(cfg.polarity);

            // The G4 comparators have a single power mode, and no output filter
            // of their own; both settings are accepted and logged.
            comp_debug!(
                "COMP power mode {:?}, filter {:?}",
                cfg.pwrmode,
                cfg.filter
            );
            Ok(())
        }

        fn configure_reference(&mut self, cfg: &ReferenceConfig) -> Result<()> {
            self.check_unlocked()?;
            cfg.validate()?;

            let input = InvertingInput::from_fraction_of_32(cfg.lower_fraction_of_32)?;
            self.set_inverting_input(input);
            self.set_hysteresis(Hysteresis::from_band_mv(cfg.band_mv()));

            comp_info!(
                "COMP reference {} mV, band {} mV",
                cfg.lower_threshold_mv(),
                cfg.band_mv()
            );
            Ok(())
        }

        fn clear_interrupts(&mut self) {
            self.clear_interrupt();
        }

        fn enable_interrupt(&mut self, edge: InterruptEdge) {
            Comp::enable_interrupt(self, edge);
        }

        fn enable(&mut self) {
            Comp::enable(self);
        }

        fn settle(&mut self, cycles: u32) {
            cortex_m::asm::delay(cycles);
        }
    }

    impl InterruptSource for Comp {
        fn clear_interrupt(&mut self) {
            Comp::clear_interrupt(self);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_reference_is_half_a_volt() {
        let r = ReferenceConfig::default();
        assert_eq!(r.lower_threshold_mv(), 500);
        assert_eq!(r.upper_threshold_mv(), 500);
        assert_eq!(r.band_mv(), 0);
        assert!(r.is_static());
        assert!(r.validate().is_ok());
    }

    #[test]
    fn fractions_outside_ladder_rejected() {
        let mut r = ReferenceConfig::default();
        r.lower_fraction_of_32 = 0;
        assert_eq!(r.validate(), Err(CompError::FractionOutOfRange));

        r.lower_fraction_of_32 = 8;
        r.upper_fraction_of_32 = 33;
        assert_eq!(r.validate(), Err(CompError::FractionOutOfRange));
    }

    #[test]
    fn inverted_window_rejected() {
        let r = ReferenceConfig {
            lower_fraction_of_32: 12,
            upper_fraction_of_32: 10,
            ..Default::default()
        };
        assert_eq!(r.validate(), Err(CompError::InvertedWindow));
    }

    #[test]
    fn band_maps_to_hysteresis_step() {
        // 2.5 V / 32 = 78.125 mV per step
        let r = ReferenceConfig {
            base: RefBase::V2_5,
            lower_fraction_of_32: 8,
            upper_fraction_of_32: 9,
            ..Default::default()
        };
        assert_eq!(r.band_mv(), 78);
        assert_eq!(Hysteresis::from_band_mv(r.band_mv()), Hysteresis::SeventyMilliVolt);
        assert_eq!(Hysteresis::from_band_mv(0), Hysteresis::None);
        assert_eq!(Hysteresis::from_band_mv(29), Hysteresis::TwentyMilliVolt);
    }

    #[test]
    fn only_quarter_taps_map_to_scaler() {
        assert_eq!(
            InvertingInput::from_fraction_of_32(8),
            Ok(InvertingInput::OneQuarterVref)
        );
        assert_eq!(InvertingInput::from_fraction_of_32(32), Ok(InvertingInput::Vref));
        assert_eq!(
            InvertingInput::from_fraction_of_32(9),
            Err(CompError::UnsupportedReference)
        );
        assert!(InvertingInput::OneQuarterVref.uses_scaler());
        assert!(!InvertingInput::Io1.uses_scaler());
    }

    #[test]
    fn edge_triggers() {
        assert_eq!(InterruptEdge::Rising.triggers(), (true, false));
        assert_eq!(InterruptEdge::Both.triggers(), (true, true));
    }
}
