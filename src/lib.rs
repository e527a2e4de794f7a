//! Comparator-driven LED toggling.
//!
//! An analog comparator watches an external voltage against an internal reference
//! (2.0 V * 8/32 by default). Each comparator edge raises an interrupt whose handler
//! flips an LED, and flips a second indicator once every 200 edges. Between events
//! the core waits in a low-power mode.
//!
//! The handler, divider, initializer sequencing and configuration are chip-independent
//! and talk to the hardware only through the traits in [traits]. Enable a chip
//! feature (eg `g431`) for the STM32G4 register-level drivers: `comp::Comp`,
//! `gpio::Pin` and `low_power::SleepOnExit`.

#![cfg_attr(not(test), no_std)]

// Textual scope for the internal logging macros; keep this first.
#[macro_use]
mod macros;

cfg_if::cfg_if! {
    if #[cfg(feature = "g431")] {
        pub use stm32g4::stm32g431 as pac;
    } else if #[cfg(feature = "g441")] {
        pub use stm32g4::stm32g441 as pac;
    } else if #[cfg(feature = "g471")] {
        pub use stm32g4::stm32g471 as pac;
    } else if #[cfg(feature = "g473")] {
        pub use stm32g4::stm32g473 as pac;
    } else if #[cfg(feature = "g474")] {
        pub use stm32g4::stm32g474 as pac;
    } else if #[cfg(feature = "g484")] {
        pub use stm32g4::stm32g484 as pac;
    } else if #[cfg(feature = "g491")] {
        pub use stm32g4::stm32g491 as pac;
    }
}

pub mod board;
pub mod comp;
pub mod config;
pub mod divider;
pub mod error;
pub mod gpio;
pub mod handler;
pub mod init;
pub mod low_power;
pub mod traits;

pub use crate::{
    board::Board,
    config::AppConfig,
    divider::EdgeDivider,
    error::{Error, Result},
    handler::CompEventHandler,
};
