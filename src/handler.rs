//! The comparator event handler.
//!
//! Call [CompEventHandler::on_event] from the comparator ISR. Each call clears the
//! interrupt flag, flips the primary indicator, feeds the edge divider, flips the
//! secondary indicator when the divider wraps, and finally re-arms the low-power wait.

use crate::{
    divider::{EdgeDivider, Tick},
    gpio::{Indicator, PinState},
    traits::CompEventHw,
};

/// Core state, from the handler's point of view.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerState {
    /// Running the handler.
    Awake,
    /// In the low-power wait, interrupts enabled.
    Asleep,
}

/// What a single event did to the outputs.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EventOutcome {
    /// Primary level after the event.
    pub primary: PinState,
    pub secondary_toggled: bool,
}

/// State owned by the comparator ISR.
pub struct CompEventHandler {
    divider: EdgeDivider,
    primary: PinState,
    secondary: PinState,
    power: PowerState,
    /// Total events, saturating. Diagnostics only.
    events: u32,
}

impl CompEventHandler {
    /// `initial` is the level both indicators were driven to during init.
    pub fn new(divider: EdgeDivider, initial: PinState) -> Self {
        Self {
            divider,
            primary: initial,
            secondary: initial,
            power: PowerState::Asleep,
            events: 0,
        }
    }

    /// Mark the core awake. `on_event` does this itself; exposed for ISRs that need
    /// to do work of their own before handing over.
    pub fn wake(&mut self) {
        self.power = PowerState::Awake;
    }

    /// Service one comparator edge. Cannot fail.
    pub fn on_event<H: CompEventHw>(&mut self, hw: &mut H) -> EventOutcome {
        self.wake();

        // Before anything else; the flag re-fires the interrupt if left set.
        hw.clear_interrupt_flag();

        self.primary = self.primary.toggled();
        hw.set_output(Indicator::Primary, self.primary);

        let secondary_toggled = match self.divider.on_edge() {
            Tick::Counted => false,
            Tick::Wrapped => {
                self.secondary = self.secondary.toggled();
                hw.set_output(Indicator::Secondary, self.secondary);
                comp_trace!("Divider wrapped; secondary now {:?}", self.secondary);
                true
            }
        };

        self.events = self.events.saturating_add(1);

        hw.enter_low_power();
        self.power = PowerState::Asleep;

        EventOutcome {
            primary: self.primary,
            secondary_toggled,
        }
    }

    pub fn primary(&self) -> PinState {
        self.primary
    }

    pub fn secondary(&self) -> PinState {
        self.secondary
    }

    /// Edges since the last divider wrap.
    pub fn count(&self) -> u16 {
        self.divider.count()
    }

    pub fn events(&self) -> u32 {
        self.events
    }

    pub fn power_state(&self) -> PowerState {
        self.power
    }
}

impl Default for CompEventHandler {
    /// Divide by 200, both indicators starting low.
    fn default() -> Self {
        Self::new(EdgeDivider::default(), PinState::Low)
    }
}
