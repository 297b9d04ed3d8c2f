//! Tick-stepping Interrupt Runner
//!
//! Plays the role of the interrupt controller: moves the simulated counter
//! forward and enters the queue's interrupt handler whenever the compare
//! interrupt is latched.

use log::debug;
use ticker_queue::{TickerDriver, TickerQueue};

use crate::SimTimer;

/// Run the simulation for `ticks` counter ticks.
///
/// An interrupt that is already latched is serviced before the first tick;
/// after that at most one interrupt is serviced per tick, as a real vector
/// would. Returns the number of interrupts serviced.
pub fn run_for<D: TickerDriver>(timer: &SimTimer, queue: &TickerQueue<'_, D>, ticks: u32) -> usize {
    let mut serviced = 0;

    if timer.is_pending() {
        queue.irq_handler();
        serviced += 1;
    }

    for _ in 0..ticks {
        if timer.tick() {
            debug!("sim: servicing compare interrupt at {}", timer.now());
            queue.irq_handler();
            serviced += 1;
        }
    }

    serviced
}
