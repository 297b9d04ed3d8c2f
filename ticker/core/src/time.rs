//! Modular timestamp types and the wraparound comparator

use core::fmt;
use crate::{TickerError, TickerResult};

/// Raw counter reading, always reduced by the active [`TimeMask`]
pub type Timestamp = u32;

/// Bit mask describing the width of the hardware counter.
///
/// All timestamp arithmetic wraps at `mask + 1`, which is independent of the
/// `u32` storage width: a 16-bit timer uses `TimeMask::from_bits(16)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeMask(u32);

impl TimeMask {
    /// Full 32-bit counter
    pub const FULL: Self = Self(u32::MAX);

    /// Create a mask covering the low `bits` bits.
    ///
    /// # Panics
    ///
    /// Panics (at compile time in const contexts) if `bits` is not in `1..=32`.
    pub const fn from_bits(bits: u32) -> Self {
        assert!(bits >= 1 && bits <= 32, "time mask width must be 1..=32 bits");
        Self(u32::MAX >> (32 - bits))
    }

    /// Create a mask from its raw value, which must be `2^n - 1` with `n >= 1`
    pub const fn new(raw: u32) -> TickerResult<Self> {
        if raw == 0 || raw & raw.wrapping_add(1) != 0 {
            Err(TickerError::InvalidMask)
        } else {
            Ok(Self(raw))
        }
    }

    /// Raw mask value (also the largest representable timestamp)
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Counter width in bits
    pub const fn bits(self) -> u32 {
        32 - self.0.leading_zeros()
    }

    /// Reduce a value into the time domain
    pub const fn wrap(self, value: u32) -> Timestamp {
        value & self.0
    }

    /// `a + b` in the time domain
    pub const fn wrapping_add(self, a: Timestamp, b: u32) -> Timestamp {
        a.wrapping_add(b) & self.0
    }

    /// `a - b` in the time domain
    pub const fn wrapping_sub(self, a: Timestamp, b: u32) -> Timestamp {
        a.wrapping_sub(b) & self.0
    }
}

impl Default for TimeMask {
    fn default() -> Self {
        Self::FULL
    }
}

impl fmt::Display for TimeMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bit", self.bits())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TimeMask {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=u32:#x}", self.0);
    }
}

/// Returns true if `time` is due no later than `end`, given that the counter
/// currently reads `start`.
///
/// This is a point-in-cyclic-interval test, not a less-than:
///
/// ```text
///   (A.1)               S    T   E
///        0 -------------|----|---|-- max
///
///   (A.2)     E              S    T      also covers S == T == E
///        0 ---|--------------|----|-- max
///
///   (B)       T   E              S
///        0 ---|---|--------------|--- max
/// ```
#[inline]
pub const fn is_due_within(start: Timestamp, time: Timestamp, end: Timestamp) -> bool {
    (time >= start && (time < end || start >= end)) || (time < start && end < start && end > time)
}

#[cfg(test)]
mod tests {
    use super::*;

    const M: u32 = 16;

    /// Distance from `start` going forward around a 4-bit cycle.
    fn offset(start: u32, t: u32) -> u32 {
        (t + M - start) % M
    }

    #[test]
    fn test_comparator_exhaustive_4bit() {
        for start in 0..M {
            for time in 0..M {
                for end in 0..M {
                    let expected = if end == start {
                        time >= start
                    } else {
                        offset(start, time) < offset(start, end)
                    };
                    assert_eq!(
                        is_due_within(start, time, end),
                        expected,
                        "start={start} time={time} end={end}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_comparator_cases() {
        // A.1
        assert!(is_due_within(3, 5, 9));
        assert!(is_due_within(3, 3, 9));
        assert!(!is_due_within(3, 9, 9));
        // A.2
        assert!(is_due_within(12, 14, 2));
        assert!(is_due_within(7, 7, 7));
        assert!(is_due_within(7, 9, 7));
        // B
        assert!(is_due_within(12, 1, 2));
        assert!(!is_due_within(12, 2, 2));
        assert!(!is_due_within(12, 3, 2));
        // time behind start, end ahead of start
        assert!(!is_due_within(12, 1, 14));
        assert!(!is_due_within(7, 6, 7));
    }

    #[test]
    fn test_mask_from_bits() {
        assert_eq!(TimeMask::from_bits(4).raw(), 0xF);
        assert_eq!(TimeMask::from_bits(16).raw(), 0xFFFF);
        assert_eq!(TimeMask::from_bits(32), TimeMask::FULL);
        assert_eq!(TimeMask::from_bits(24).bits(), 24);
    }

    #[test]
    #[should_panic(expected = "time mask width")]
    fn test_mask_from_bits_zero() {
        let _ = TimeMask::from_bits(0);
    }

    #[test]
    fn test_mask_new() {
        assert_eq!(TimeMask::new(0xFF), Ok(TimeMask::from_bits(8)));
        assert_eq!(TimeMask::new(u32::MAX), Ok(TimeMask::FULL));
        assert_eq!(TimeMask::new(0), Err(TickerError::InvalidMask));
        assert_eq!(TimeMask::new(0xF0), Err(TickerError::InvalidMask));
        assert_eq!(TimeMask::new(10), Err(TickerError::InvalidMask));
    }

    #[test]
    fn test_mask_arithmetic() {
        let mask = TimeMask::from_bits(4);
        assert_eq!(mask.wrap(0x1_2345), 0x5);
        assert_eq!(mask.wrapping_add(14, 3), 1);
        assert_eq!(mask.wrapping_sub(1, 3), 14);
        assert_eq!(TimeMask::FULL.wrapping_sub(0, 1), u32::MAX);
    }
}
