//! Error types
//!
//! The only fallible operations in the control path are pin reads and writes.
//! On the RP2040 those can not fail (`Infallible`), but the `embedded-hal`
//! traits allow it, so the error is carried instead of swallowed.

use embedded_hal::digital::{self, ErrorKind};

/// Result alias used throughout the control logic
pub type Result<T> = core::result::Result<T, Error>;

/// Control logic errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum Error {
    /// A digital pin refused a read or write
    Pin(ErrorKind),
}

impl Error {
    /// Wraps any `embedded-hal` digital pin error
    pub fn pin<E: digital::Error>(error: E) -> Self {
        Error::Pin(error.kind())
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Pin(kind) => write!(f, "pin error: {kind}"),
        }
    }
}
