//! This module contains utility macros: global-state helpers for sharing peripherals
//! with interrupt handlers, NVIC setup, and the crate's internal logging wrappers.

/// Syntax helper for getting global variables of the form `Mutex<RefCell<Option>>>` from an interrupt-free
/// context - eg in interrupt handlers. Returns from the enclosing closure if the global
/// hasn't been initialized yet.
///
/// Example: `access_global!(HANDLER, handler, cs);`
#[macro_export]
macro_rules! access_global {
    ($NAME_GLOBAL:ident, $name_local:ident, $cs:expr) => {
        let mut part1 = $NAME_GLOBAL.borrow($cs).borrow_mut();
        let Some($name_local) = part1.as_mut() else {
            return;
        };
    };
}

/// Syntax helper for setting global variables of the form `Mutex<RefCell<Option>>>`.
/// eg in interrupt handlers. Ideal for non-copy-type variables that can't be initialized
/// immediatiately.
///
/// Example: `make_globals!(
///     (HANDLER, CompEventHandler),
///     (BOARD, MyBoard),
/// )`
#[macro_export]
macro_rules! make_globals {
    ($(($NAME:ident, $type:ty)),+ $(,)?) => {
        $(
            static $NAME: ::critical_section::Mutex<core::cell::RefCell<Option<$type>>> = ::critical_section::Mutex::new(core::cell::RefCell::new(None));
        )+
    };
}

/// Initialize one or more globals inside a critical section.
///
/// Usage:
/// ```ignore
/// init_globals!(
///     (HANDLER, handler),
///     (BOARD, board),
/// );
/// ```
#[macro_export]
macro_rules! init_globals {
    ($(($NAME:ident, $val:expr)),* $(,)?) => {
        ::critical_section::with(|cs| {
            $(
                $NAME.borrow(cs).replace(Some($val));
            )*
        });
    };
}

/// Automates Cortex-M NVIC setup. The second value is NVIC priority; lower
/// is higher priority. Example use:
/// setup_nvic!([
///     (COMP1_2_3, 1),
/// ], cp);
#[macro_export]
macro_rules! setup_nvic {
    (
        [ $( ($int:ident, $prio:expr) ),* $(,)? ],
        $cp:ident
    ) => {
        unsafe {
            $(
                cortex_m::peripheral::NVIC::unmask($crate::pac::Interrupt::$int);
            )*
            $(
                $cp.NVIC.set_priority($crate::pac::Interrupt::$int, $prio);
            )*
        }
    };
}

// Logging. These expand to nothing without the `defmt` feature, so host builds
// don't need a global logger.

macro_rules! comp_info {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        defmt::info!($($arg)*);
    }};
}

// Only the register-level drivers log at debug level.
#[allow(unused_macros)]
macro_rules! comp_debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        defmt::debug!($($arg)*);
    }};
}

macro_rules! comp_trace {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        defmt::trace!($($arg)*);
    }};
}
