//! Hardware ticker abstraction consumed by the queue

use crate::Timestamp;

/// A free-running counter with one compare interrupt.
///
/// Implemented by a port for each target. Every method may be called from
/// interrupt context and from inside a critical section, so none of them may
/// block.
pub trait TickerDriver {
    /// One-time hardware setup. Must tolerate repeated calls.
    fn init(&self);

    /// Current counter value, already reduced by the timer's mask
    fn read(&self) -> Timestamp;

    /// Arm the one-shot compare interrupt for `timestamp`, replacing any
    /// previously armed value
    fn set_interrupt(&self, timestamp: Timestamp);

    /// Disarm the compare interrupt
    fn disable_interrupt(&self);

    /// Acknowledge a pending compare interrupt
    fn clear_interrupt(&self);
}

impl<D: TickerDriver + ?Sized> TickerDriver for &D {
    #[inline]
    fn init(&self) {
        (**self).init()
    }

    #[inline]
    fn read(&self) -> Timestamp {
        (**self).read()
    }

    #[inline]
    fn set_interrupt(&self, timestamp: Timestamp) {
        (**self).set_interrupt(timestamp)
    }

    #[inline]
    fn disable_interrupt(&self) {
        (**self).disable_interrupt()
    }

    #[inline]
    fn clear_interrupt(&self) {
        (**self).clear_interrupt()
    }
}
