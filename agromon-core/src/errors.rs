//! Error Types for Record Assembly and Storage
//!
//! The statistics engine itself never fails: degenerate numeric input
//! (all-NaN windows, zero variance, constant correlation series)
//! degrades to NaN or 0 in the output rather than raising an error,
//! because a field device must keep logging something over crashing.
//!
//! What *can* fail is turning a tick into a persisted CSV line, and
//! those failures are modeled here. Design constraints, shared with the
//! rest of the crate:
//!
//! 1. **Small and Copy**: errors are returned on every tick; no heap,
//!    no `String`, only `&'static str` context if any.
//! 2. **Recoverable by skipping**: a failed write drops that tick's
//!    row and nothing else. The next tick starts clean.

use thiserror_no_std::Error;

/// Result type for record assembly and in-crate store operations.
pub type RecordResult<T> = Result<T, RecordError>;

/// Errors produced while assembling or storing a CSV record.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordError {
    /// The assembled CSV line did not fit the fixed line buffer.
    ///
    /// The buffer is sized with generous headroom over the worst-case
    /// row, so hitting this indicates corrupted float formatting
    /// rather than normal operation.
    #[error("CSV line exceeds the fixed line buffer capacity")]
    LineOverflow,

    /// The record store refused the line because it is out of space.
    #[error("record store is full")]
    StoreFull,
}

impl From<core::fmt::Error> for RecordError {
    fn from(_: core::fmt::Error) -> Self {
        Self::LineOverflow
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for RecordError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::LineOverflow => defmt::write!(fmt, "CSV line overflow"),
            Self::StoreFull => defmt::write!(fmt, "record store full"),
        }
    }
}
