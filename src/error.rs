//! Common error definitions.

use crate::{comp::CompError, config::ConfigError, divider::DividerError};

macro_rules! impl_from_error {
    ($error:ident) => {
        impl From<$error> for Error {
            fn from(error: $error) -> Self {
                Self::$error(error)
            }
        }
    };
}

/// Alias for Result<T, Error>.
pub type Result<T> = core::result::Result<T, Error>;

/// Collection of all errors that can occur.
///
/// Every variant is a configuration-time error. The event handler itself has no
/// failure path.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Comparator or reference configuration was rejected.
    CompError(CompError),
    /// Edge divider setup.
    DividerError(DividerError),
    ConfigError(ConfigError),
}

impl_from_error!(CompError);
impl_from_error!(DividerError);
impl_from_error!(ConfigError);

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::CompError(e) => write!(f, "comparator: {e:?}"),
            Self::DividerError(e) => write!(f, "divider: {e:?}"),
            Self::ConfigError(e) => write!(f, "config: {e:?}"),
        }
    }
}
