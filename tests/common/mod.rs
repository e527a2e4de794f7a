// Recording stand-ins for the hardware traits.

#![allow(dead_code)]

use std::{cell::RefCell, convert::Infallible, rc::Rc};

use comp_toggle::{
    comp::{CompConfig, CompError, InterruptEdge, ReferenceConfig},
    error::Result,
    gpio::{Indicator, PinState},
    traits::{CompEventHw, CompPeripheral, InterruptSource, SleepControl},
};
use embedded_hal::digital::{Error, ErrorKind, ErrorType, OutputPin};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    ClearFlag,
    SetOutput(Indicator, PinState),
    EnterLowPower,
}

/// Register interface for the event handler. Tracks pin levels and toggle counts.
#[derive(Default)]
pub struct MockHw {
    pub ops: Vec<Op>,
    pub flag_pending: bool,
    pub primary: Option<PinState>,
    pub secondary: Option<PinState>,
    pub primary_writes: usize,
    pub secondary_writes: usize,
}

impl MockHw {
    /// Latch the comparator flag, as the hardware does on an edge.
    pub fn raise(&mut self) {
        self.flag_pending = true;
    }

    pub fn clear_log(&mut self) {
        self.ops.clear();
    }
}

impl CompEventHw for MockHw {
    fn set_output(&mut self, pin: Indicator, level: PinState) {
        self.ops.push(Op::SetOutput(pin, level));
        match pin {
            Indicator::Primary => {
                self.primary = Some(level);
                self.primary_writes += 1;
            }
            Indicator::Secondary => {
                self.secondary = Some(level);
                self.secondary_writes += 1;
            }
        }
    }

    fn clear_interrupt_flag(&mut self) {
        self.flag_pending = false;
        self.ops.push(Op::ClearFlag);
    }

    fn enter_low_power(&mut self) {
        self.ops.push(Op::EnterLowPower);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Configure,
    Reference,
    ClearInterrupts,
    EnableInterrupt(InterruptEdge),
    Enable,
    Settle(u32),
}

/// Comparator that records the init sequence. `reject_reference` makes
/// `configure_reference` fail the way hardware without a matching tap does.
#[derive(Default)]
pub struct MockComp {
    pub steps: Vec<Step>,
    pub reject_reference: bool,
    pub last_config: Option<CompConfig>,
}

impl CompPeripheral for MockComp {
    fn configure(&mut self, cfg: &CompConfig) -> Result<()> {
        self.last_config = Some(*cfg);
        self.steps.push(Step::Configure);
        Ok(())
    }

    fn configure_reference(&mut self, _cfg: &ReferenceConfig) -> Result<()> {
        if self.reject_reference {
            return Err(CompError::UnsupportedReference.into());
        }
        self.steps.push(Step::Reference);
        Ok(())
    }

    fn clear_interrupts(&mut self) {
        self.steps.push(Step::ClearInterrupts);
    }

    fn enable_interrupt(&mut self, edge: InterruptEdge) {
        self.steps.push(Step::EnableInterrupt(edge));
    }

    fn enable(&mut self) {
        self.steps.push(Step::Enable);
    }

    fn settle(&mut self, cycles: u32) {
        self.steps.push(Step::Settle(cycles));
    }
}

/// Output pin whose level can be inspected after it's moved into a `Board`.
#[derive(Clone, Default)]
pub struct SharedPin(pub Rc<RefCell<Vec<bool>>>);

impl SharedPin {
    pub fn history(&self) -> Vec<bool> {
        self.0.borrow().clone()
    }

    pub fn level(&self) -> Option<bool> {
        self.0.borrow().last().copied()
    }
}

impl ErrorType for SharedPin {
    type Error = Infallible;
}

impl OutputPin for SharedPin {
    fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
        self.0.borrow_mut().push(false);
        Ok(())
    }

    fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
        self.0.borrow_mut().push(true);
        Ok(())
    }
}

#[derive(Debug)]
pub struct PinFault;

impl Error for PinFault {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Output pin that rejects every write, counting the attempts.
#[derive(Clone, Default)]
pub struct FailingPin(pub Rc<RefCell<usize>>);

impl ErrorType for FailingPin {
    type Error = PinFault;
}

impl OutputPin for FailingPin {
    fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
        *self.0.borrow_mut() += 1;
        Err(PinFault)
    }

    fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
        *self.0.borrow_mut() += 1;
        Err(PinFault)
    }
}

#[derive(Clone, Default)]
pub struct CountingIrq(pub Rc<RefCell<usize>>);

impl InterruptSource for CountingIrq {
    fn clear_interrupt(&mut self) {
        *self.0.borrow_mut() += 1;
    }
}

/// Sleep control that counts arms and gives up after `max_waits` waits, so `park`
/// can be exercised without hanging.
#[derive(Clone, Default)]
pub struct CountingSleep {
    pub arms: Rc<RefCell<usize>>,
    pub waits: Rc<RefCell<usize>>,
    pub max_waits: usize,
}

impl SleepControl for CountingSleep {
    fn sleep_on_exit(&mut self) {
        *self.arms.borrow_mut() += 1;
    }

    fn wait_for_interrupt(&mut self) {
        *self.waits.borrow_mut() += 1;
        if *self.waits.borrow() >= self.max_waits {
            panic!("parked");
        }
    }
}
