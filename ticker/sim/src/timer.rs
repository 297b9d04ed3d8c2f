//! Simulated Hardware Ticker
//!
//! A modular counter with a single one-shot compare register. The counter
//! only moves through [`SimTimer::tick`], [`SimTimer::advance`] or
//! [`SimTimer::set_now`], so tests decide exactly when time passes.

use std::cell::RefCell;
use std::fmt;

use critical_section::Mutex;
use log::trace;
use ticker_queue::{TickerDriver, TimeMask, Timestamp};

/// Number of calls the queue made into the driver
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriverStats {
    pub init: usize,
    pub armed: usize,
    pub disarmed: usize,
    pub cleared: usize,
}

#[derive(Debug)]
struct SimState {
    now: Timestamp,
    mask: TimeMask,
    compare: Option<Timestamp>,
    pending: bool,
    stats: DriverStats,
}

/// Simulated free-running counter implementing [`TickerDriver`]
pub struct SimTimer {
    state: Mutex<RefCell<SimState>>,
}

impl SimTimer {
    /// Create a counter of width `mask` reading zero
    pub const fn new(mask: TimeMask) -> Self {
        Self::starting_at(mask, 0)
    }

    /// Create a counter of width `mask` reading `now`
    pub const fn starting_at(mask: TimeMask, now: Timestamp) -> Self {
        Self {
            state: Mutex::new(RefCell::new(SimState {
                now: mask.wrap(now),
                mask,
                compare: None,
                pending: false,
                stats: DriverStats {
                    init: 0,
                    armed: 0,
                    disarmed: 0,
                    cleared: 0,
                },
            })),
        }
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut SimState) -> R) -> R {
        critical_section::with(|cs| f(&mut self.state.borrow_ref_mut(cs)))
    }

    /// Current counter value
    pub fn now(&self) -> Timestamp {
        self.with_state(|s| s.now)
    }

    /// Jump the counter to `now` without evaluating the compare register
    pub fn set_now(&self, now: Timestamp) {
        self.with_state(|s| s.now = s.mask.wrap(now));
    }

    /// Advance the counter by one tick, latching the interrupt if it reaches
    /// the armed compare value. Returns the pending flag.
    pub fn tick(&self) -> bool {
        self.with_state(|s| {
            s.now = s.mask.wrapping_add(s.now, 1);
            if s.compare == Some(s.now) {
                trace!("sim: compare match at {}", s.now);
                s.compare = None;
                s.pending = true;
            }
            s.pending
        })
    }

    /// Advance the counter by `ticks`. Returns the pending flag.
    pub fn advance(&self, ticks: u32) -> bool {
        let mut pending = self.is_pending();
        for _ in 0..ticks {
            pending = self.tick();
        }
        pending
    }

    /// Returns true if the compare interrupt is latched and not yet cleared
    pub fn is_pending(&self) -> bool {
        self.with_state(|s| s.pending)
    }

    /// Compare value currently armed, if any
    pub fn armed_at(&self) -> Option<Timestamp> {
        self.with_state(|s| s.compare)
    }

    /// Returns true if a compare value is armed
    pub fn is_armed(&self) -> bool {
        self.armed_at().is_some()
    }

    /// Counts of driver calls made so far
    pub fn stats(&self) -> DriverStats {
        self.with_state(|s| s.stats)
    }

    /// Width of the simulated counter
    pub fn mask(&self) -> TimeMask {
        self.with_state(|s| s.mask)
    }
}

impl fmt::Debug for SimTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.with_state(|s| {
            f.debug_struct("SimTimer")
                .field("now", &s.now)
                .field("mask", &s.mask)
                .field("compare", &s.compare)
                .field("pending", &s.pending)
                .finish()
        })
    }
}

impl TickerDriver for SimTimer {
    fn init(&self) {
        self.with_state(|s| s.stats.init += 1);
        trace!("sim: init");
    }

    fn read(&self) -> Timestamp {
        self.now()
    }

    fn set_interrupt(&self, timestamp: Timestamp) {
        self.with_state(|s| {
            let timestamp = s.mask.wrap(timestamp);
            s.stats.armed += 1;
            if timestamp == s.now {
                // Compare already matches the counter
                s.compare = None;
                s.pending = true;
            } else {
                s.compare = Some(timestamp);
            }
            trace!("sim: armed at {} (now {})", timestamp, s.now);
        });
    }

    fn disable_interrupt(&self) {
        self.with_state(|s| {
            s.stats.disarmed += 1;
            s.compare = None;
            s.pending = false;
        });
        trace!("sim: disarmed");
    }

    fn clear_interrupt(&self) {
        self.with_state(|s| {
            s.stats.cleared += 1;
            s.pending = false;
        });
    }
}
