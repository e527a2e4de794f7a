//! This module provides the indicator pin model used by the event handler, and, with a
//! chip feature enabled, a register-level GPIO `Pin` for the STM32G4 that implements the
//! `embedded-hal` digital traits.

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
/// Values for `GPIOx_IDR` and `GPIOx_ODR`.
pub enum PinState {
    High = 1,
    Low = 0,
}

impl PinState {
    /// The opposite level.
    pub fn toggled(self) -> Self {
        match self {
            Self::High => Self::Low,
            Self::Low => Self::High,
        }
    }

    pub fn is_high(self) -> bool {
        self == Self::High
    }
}

impl From<bool> for PinState {
    fn from(high: bool) -> Self {
        if high { Self::High } else { Self::Low }
    }
}

impl From<PinState> for embedded_hal::digital::PinState {
    fn from(state: PinState) -> Self {
        match state {
            PinState::High => Self::High,
            PinState::Low => Self::Low,
        }
    }
}

/// The two outputs driven by the comparator event handler.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Indicator {
    /// Follows every comparator edge. The LED on the reference board.
    Primary,
    /// Flips once per divider wrap.
    Secondary,
}

#[cfg(hw)]
pub use hw::*;

#[cfg(hw)]
mod hw {
    use core::convert::Infallible;

    use embedded_hal::digital::{ErrorType, InputPin, OutputPin, StatefulOutputPin};

    use super::PinState;
    use crate::pac::{self, gpioa::RegisterBlock};

    #[derive(Copy, Clone)]
    /// Values for `GPIOx_MODER`
    pub enum PinMode {
        Input,
        Output,
        Alt(u8),
        Analog,
    }

    impl PinMode {
        /// We use this function to find the value bits due to being unable to repr(u8) with
        /// the wrapped alternate function value.
        fn val(&self) -> u32 {
            match self {
                Self::Input => 0b00,
                Self::Output => 0b01,
                Self::Alt(_) => 0b10,
                Self::Analog => 0b11,
            }
        }
    }

    #[derive(Copy, Clone, Eq, PartialEq)]
    /// GPIO port letter
    pub enum Port {
        A,
        B,
        C,
        D,
        E,
        F,
        G,
    }

    impl Port {
        /// Bit offset of the port's clock enable in `RCC_AHB2ENR`.
        fn rcc_bit(&self) -> u32 {
            match self {
                Self::A => 0,
                Self::B => 1,
                Self::C => 2,
                Self::D => 3,
                Self::E => 4,
                Self::F => 5,
                Self::G => 6,
            }
        }
    }

    /// A single GPIO pin. Registers are reached through raw pointers, since the
    /// `embedded-hal` traits can't accept a register block.
    pub struct Pin {
        pub port: Port,
        pub pin: u8,
    }

    impl Pin {
        /// Enable the port's clock and set the pin's mode. Alternate function
        /// numbers are written to `AFRL`/`AFRH` as needed.
        pub fn new(port: Port, pin: u8, mode: PinMode) -> Self {
            assert!(pin <= 15, "Pin must be 0 - 15.");

            let rcc = unsafe { &(*pac::RCC::ptr()) };
            rcc.ahb2enr()
                .modify(|r, w| unsafe { w.bits(r.bits() | (1 << port.rcc_bit())) });

            let mut result = Self { port, pin };
            result.mode(mode);
            result
        }

        fn regs(&self) -> &'static RegisterBlock {
            let ptr = match self.port {
                Port::A => pac::GPIOA::ptr() as *const RegisterBlock,
                Port::B => pac::GPIOB::ptr() as *const RegisterBlock,
                Port::C => pac::GPIOC::ptr() as *const RegisterBlock,
                Port::D => pac::GPIOD::ptr() as *const RegisterBlock,
                Port::E => pac::GPIOE::ptr() as *const RegisterBlock,
                Port::F => pac::GPIOF::ptr() as *const RegisterBlock,
                Port::G => pac::GPIOG::ptr() as *const RegisterBlock,
            };
            unsafe { &*ptr }
        }

        /// Set pin mode. Sets the `MODER` register, and the `AFRx` register for
        /// alternate functions.
        pub fn mode(&mut self, value: PinMode) {
            let regs = self.regs();
            let offset = self.pin as u32 * 2;
            regs.moder().modify(|r, w| unsafe {
                w.bits((r.bits() & !(0b11 << offset)) | (value.val() << offset))
            });

            if let PinMode::Alt(af) = value {
                let af = af as u32 & 0b1111;
                if self.pin < 8 {
                    let shift = self.pin as u32 * 4;
                    regs.afrl().modify(|r, w| unsafe {
                        w.bits((r.bits() & !(0b1111 << shift)) | (af << shift))
                    });
                } else {
                    let shift = (self.pin as u32 - 8) * 4;
                    regs.afrh().modify(|r, w| unsafe {
                        w.bits((r.bits() & !(0b1111 << shift)) | (af << shift))
                    });
                }
            }
        }

        /// Drive the pin through `BSRR`, which sets or resets atomically.
        pub fn set_state(&mut self, value: PinState) {
            let bit = match value {
                PinState::High => 1 << self.pin,
                PinState::Low => 1 << (self.pin + 16),
            };
            self.regs().bsrr().write(|w| unsafe { w.bits(bit) });
        }

        pub fn set_high(&mut self) {
            self.set_state(PinState::High);
        }

        pub fn set_low(&mut self) {
            self.set_state(PinState::Low);
        }

        /// Level currently latched in `ODR`.
        pub fn output_state(&self) -> PinState {
            PinState::from(self.regs().odr().read().bits() & (1 << self.pin) != 0)
        }

        /// Level currently read from `IDR`.
        pub fn input_state(&self) -> PinState {
            PinState::from(self.regs().idr().read().bits() & (1 << self.pin) != 0)
        }

        pub fn toggle(&mut self) {
            let next = self.output_state().toggled();
            self.set_state(next);
        }
    }

    impl ErrorType for Pin {
        type Error = Infallible;
    }

    impl OutputPin for Pin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            Pin::set_low(self);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            Pin::set_high(self);
            Ok(())
        }
    }

    impl StatefulOutputPin for Pin {
        fn is_set_high(&mut self) -> Result<bool, Self::Error> {
            Ok(self.output_state().is_high())
        }

        fn is_set_low(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.output_state().is_high())
        }
    }

    impl InputPin for Pin {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(self.input_state().is_high())
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.input_state().is_high())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggled_is_an_involution() {
        assert_eq!(PinState::Low.toggled(), PinState::High);
        assert_eq!(PinState::High.toggled().toggled(), PinState::High);
    }

    #[test]
    fn converts_to_embedded_hal_state() {
        let s: embedded_hal::digital::PinState = PinState::High.into();
        assert_eq!(s, embedded_hal::digital::PinState::High);
    }
}
