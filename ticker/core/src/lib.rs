#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![forbid(unsafe_code)]

//! # Ticker Core
//!
//! Timestamp arithmetic for queues driven by a free-running, wraparound
//! hardware counter. The counter width is a configuration value
//! ([`TimeMask`]) rather than the width of the storage type, so every
//! comparison in this crate is relative to a moving "now".

use core::fmt;

pub mod config;
pub mod time;

pub use config::*;
pub use time::*;

/// Ticker core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type used for ticker configuration
pub type TickerResult<T> = Result<T, TickerError>;

/// Error types for ticker configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickerError {
    /// Mask is zero or not of the form `2^n - 1`
    InvalidMask,
    /// A tolerance does not fit in the time domain
    ToleranceOutOfRange,
    /// Future tolerance reaches into the past tolerance window
    ToleranceOverlap,
    /// Service latency does not fit in the time domain
    LatencyOutOfRange,
}

impl fmt::Display for TickerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TickerError::InvalidMask => write!(f, "Time mask must be 2^n - 1"),
            TickerError::ToleranceOutOfRange => write!(f, "Tolerance exceeds time mask"),
            TickerError::ToleranceOverlap => {
                write!(f, "Future tolerance overlaps past tolerance")
            }
            TickerError::LatencyOutOfRange => write!(f, "Service latency exceeds time mask"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TickerError {}

#[cfg(feature = "defmt")]
impl defmt::Format for TickerError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            TickerError::InvalidMask => defmt::write!(fmt, "InvalidMask"),
            TickerError::ToleranceOutOfRange => defmt::write!(fmt, "ToleranceOutOfRange"),
            TickerError::ToleranceOverlap => defmt::write!(fmt, "ToleranceOverlap"),
            TickerError::LatencyOutOfRange => defmt::write!(fmt, "LatencyOutOfRange"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(TickerError::InvalidMask.to_string(), "Time mask must be 2^n - 1");
        assert_eq!(
            TickerError::ToleranceOverlap.to_string(),
            "Future tolerance overlaps past tolerance"
        );
    }
}
