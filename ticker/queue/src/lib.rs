#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![forbid(unsafe_code)]

//! # Ticker Queue
//!
//! A time-ordered queue of caller-owned events multiplexed onto a single
//! hardware compare interrupt. The queue never allocates: each
//! [`TickerEvent`] is an intrusive list node that lives wherever the caller
//! put it (usually a `static`), and is borrowed by the queue while linked.
//!
//! ```rust,ignore
//! use ticker_queue::{EventId, TickerConfig, TickerEvent, TickerQueue, TimeMask};
//!
//! static TICKER: TickerQueue<'static, Lptim1> =
//!     TickerQueue::new(Lptim1, TickerConfig::new(TimeMask::from_bits(16)));
//! static BLINK: TickerEvent<'static> = TickerEvent::new();
//!
//! fn on_event(id: EventId) {
//!     // runs in interrupt context and may reschedule itself
//!     TICKER.insert_event_in(&BLINK, 500, id);
//! }
//!
//! TICKER.set_handler(&on_event);
//! TICKER.insert_event_in(&BLINK, 500, 1);
//!
//! // in the LPTIM1 interrupt vector
//! TICKER.irq_handler();
//! ```

#[macro_use]
mod macros;

pub mod driver;
pub mod event;
pub mod queue;

pub use ticker_core::*;
pub use driver::*;
pub use event::*;
pub use queue::*;
