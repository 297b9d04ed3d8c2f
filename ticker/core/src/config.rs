//! Per-timer calibration constants

use core::fmt;
use crate::{TickerError, TickerResult, TimeMask, Timestamp};

/// Calibration for one hardware ticker.
///
/// The tolerances and the service latency depend on interrupt latency and
/// counter resolution of the target, so they are always supplied by the
/// port rather than fixed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickerConfig {
    mask: TimeMask,
    future_tolerance: u32,
    past_tolerance: u32,
    service_latency: u32,
}

impl TickerConfig {
    /// Create a configuration with no tolerance windows and a past
    /// tolerance of half a counter cycle
    ///
    /// The past tolerance never drops below one tick, so the default stays
    /// valid for a 1-bit counter.
    pub const fn new(mask: TimeMask) -> Self {
        let half = mask.raw() / 2;
        Self {
            mask,
            future_tolerance: 0,
            past_tolerance: if half == 0 { 1 } else { half },
            service_latency: 0,
        }
    }

    /// Fire events this many ticks early instead of re-arming for them
    pub const fn with_future_tolerance(mut self, ticks: u32) -> Self {
        self.future_tolerance = ticks;
        self
    }

    /// Treat a head whose distance ahead exceeds this as already passed
    pub const fn with_past_tolerance(mut self, ticks: u32) -> Self {
        self.past_tolerance = ticks;
        self
    }

    /// Ticks subtracted from the counter before ordering a new event
    pub const fn with_service_latency(mut self, ticks: u32) -> Self {
        self.service_latency = ticks;
        self
    }

    /// Check that every constant fits the time domain
    pub const fn validate(self) -> TickerResult<Self> {
        let max = self.mask.raw();
        if self.future_tolerance > max || self.past_tolerance > max {
            return Err(TickerError::ToleranceOutOfRange);
        }
        if self.future_tolerance >= self.past_tolerance {
            return Err(TickerError::ToleranceOverlap);
        }
        if self.service_latency > max {
            return Err(TickerError::LatencyOutOfRange);
        }
        Ok(self)
    }

    /// Width of the hardware counter
    pub const fn mask(&self) -> TimeMask {
        self.mask
    }

    /// Ticks ahead of the counter that still count as due
    pub const fn future_tolerance(&self) -> u32 {
        self.future_tolerance
    }

    /// Distance beyond which a timestamp is taken as already passed
    pub const fn past_tolerance(&self) -> u32 {
        self.past_tolerance
    }

    /// Ticks subtracted from the counter before ordering an insertion
    pub const fn service_latency(&self) -> u32 {
        self.service_latency
    }

    /// Counter reading used to order a newly inserted event
    pub const fn ordering_origin(&self, count: Timestamp) -> Timestamp {
        self.mask.wrapping_sub(count, self.service_latency)
    }

    /// Returns true if an event at `timestamp` should fire when the counter
    /// reads `now`.
    ///
    /// An event is due when it is at most `future_tolerance` ticks ahead, or
    /// when it is so far "ahead" (more than `past_tolerance`) that it can only
    /// have been missed.
    pub const fn is_due(&self, timestamp: Timestamp, now: Timestamp) -> bool {
        let diff = self.mask.wrapping_sub(timestamp, now);
        diff <= self.future_tolerance || diff > self.past_tolerance
    }
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self::new(TimeMask::FULL)
    }
}

impl fmt::Display for TickerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} future:{} past:{} latency:{}",
            self.mask, self.future_tolerance, self.past_tolerance, self.service_latency
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TickerConfig {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "{} future:{} past:{} latency:{}",
            self.mask,
            self.future_tolerance,
            self.past_tolerance,
            self.service_latency
        );
    }
}
