//! Ticker Host Port
//!
//! Runs the ticker queue on a development machine. The hardware counter is
//! replaced by [`SimTimer`], a modular counter that only moves when told to,
//! so interrupt timing is fully deterministic. Critical sections come from
//! the `std` implementation of `critical-section`.
//!
//! # Examples
//!
//! ```
//! use std::sync::atomic::{AtomicU32, Ordering};
//! use ticker_sim::{run_for, SimTimer};
//! use ticker_queue::{EventId, TickerConfig, TickerEvent, TickerQueue, TimeMask};
//!
//! let mask = TimeMask::from_bits(16);
//! let timer = SimTimer::new(mask);
//! let event = TickerEvent::new();
//! let queue = TickerQueue::new(&timer, TickerConfig::new(mask));
//! let last = AtomicU32::new(0);
//! let handler = |id: EventId| last.store(id, Ordering::SeqCst);
//! queue.set_handler(&handler);
//!
//! queue.insert_event(&event, 25, 9);
//! run_for(&timer, &queue, 30);
//!
//! assert_eq!(last.load(Ordering::SeqCst), 9);
//! assert!(!timer.is_armed());
//! ```

pub mod runner;
pub mod timer;

pub use runner::*;
pub use timer::*;
