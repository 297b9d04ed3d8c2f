//! Timestamp domain tests for ticker-core

use proptest::prelude::*;
use ticker_core::{is_due_within, TickerConfig, TickerError, TimeMask};

#[test]
fn test_wrap_order_4bit() {
    let mask = TimeMask::from_bits(4);
    let now = 13;
    let a = mask.wrap(14);
    let b = mask.wrap(2);

    // 2 comes after 14 once the counter wraps
    assert!(is_due_within(now, a, b));
    assert!(!is_due_within(now, b, a));
}

#[test]
fn test_single_element_boundary() {
    for t in 0..16 {
        assert!(is_due_within(t, t, t));
    }
}

#[test]
fn test_mask_display() {
    assert_eq!(TimeMask::from_bits(16).to_string(), "16bit");
}

#[test]
fn test_config_const_construction() {
    const CFG: TickerConfig = TickerConfig::new(TimeMask::from_bits(24))
        .with_future_tolerance(5)
        .with_service_latency(2);

    assert_eq!(CFG.mask().raw(), 0x00FF_FFFF);
    assert_eq!(CFG.future_tolerance(), 5);
    assert_eq!(CFG.validate(), Ok(CFG));
}

#[test]
fn test_invalid_mask() {
    assert_eq!(TimeMask::new(0x7FFE), Err(TickerError::InvalidMask));
}

proptest! {
    /// Across the full 32-bit range, "due before `end`" is the same as being
    /// fewer ticks ahead of `start` than `end` is.
    #[test]
    fn test_comparator_matches_forward_distance(start: u32, time: u32, end: u32) {
        let expected = if end == start {
            time >= start
        } else {
            time.wrapping_sub(start) < end.wrapping_sub(start)
        };
        prop_assert_eq!(is_due_within(start, time, end), expected);
    }

    #[test]
    fn test_mask_sub_undoes_add(bits in 1u32..=32, base: u32, delta: u32) {
        let mask = TimeMask::from_bits(bits);
        let base = mask.wrap(base);
        let later = mask.wrapping_add(base, delta);
        prop_assert!(later <= mask.raw());
        prop_assert_eq!(mask.wrapping_sub(later, base), mask.wrap(delta));
    }
}
