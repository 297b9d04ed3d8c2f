//! Ordered event queue bound to one hardware ticker

use core::cell::Cell;
use core::ptr;
use critical_section::{CriticalSection, Mutex};

use crate::{is_due_within, EventId, TickerConfig, TickerDriver, TickerEvent, Timestamp};

/// Callback invoked with the id of each fired event.
///
/// Runs in interrupt context, outside any critical section, and may insert
/// or remove events on the queue that called it.
pub type EventHandler<'a> = dyn Fn(EventId) + Sync + 'a;

type Head<'a> = Option<&'a TickerEvent<'a>>;

/// Time-ordered chain of [`TickerEvent`]s multiplexed onto one hardware
/// compare interrupt.
///
/// The hardware is armed for the head of the chain, and for nothing else.
/// Chain state is only touched inside `critical_section::with`, which masks
/// interrupts on the target; the handler is always called with interrupts
/// unmasked again.
pub struct TickerQueue<'a, D> {
    driver: D,
    config: TickerConfig,
    head: Mutex<Cell<Head<'a>>>,
    handler: Mutex<Cell<Option<&'a EventHandler<'a>>>>,
}

impl<'a, D: TickerDriver> TickerQueue<'a, D> {
    /// Bind a queue to `driver`.
    ///
    /// The hardware is not touched until [`set_handler`](Self::set_handler).
    ///
    /// # Panics
    ///
    /// Panics if `config` fails [`TickerConfig::validate`]. For a queue in a
    /// `static` this is a compile-time error.
    pub const fn new(driver: D, config: TickerConfig) -> Self {
        assert!(config.validate().is_ok(), "invalid ticker configuration");
        Self {
            driver,
            config,
            head: Mutex::new(Cell::new(None)),
            handler: Mutex::new(Cell::new(None)),
        }
    }

    /// Install the fired-event callback and initialise the hardware.
    ///
    /// Must be called before the first insertion. Replacing the handler while
    /// events are being dispatched is not supported.
    pub fn set_handler(&self, handler: &'a EventHandler<'a>) {
        self.driver.init();
        critical_section::with(|cs| self.handler.borrow(cs).set(Some(handler)));
        tq_debug!("ticker: handler installed");
    }

    /// Schedule `event` to fire at `timestamp` with payload `id`.
    ///
    /// Inserting an event that is still scheduled on this queue moves it to
    /// the new time.
    ///
    /// # Panics
    ///
    /// Panics if `event` is scheduled on a different queue.
    pub fn insert_event(&self, event: &'a TickerEvent<'a>, timestamp: Timestamp, id: EventId) {
        let timestamp = self.config.mask().wrap(timestamp);

        let foreign = critical_section::with(|cs| {
            if event.is_linked_cs(cs) && !self.unlink(cs, event) {
                return true;
            }

            let now = self.config.ordering_origin(self.driver.read());

            // Stop at the first element the new event is due before; equal
            // timestamps are passed over so ties keep insertion order.
            let mut prev: Head<'a> = None;
            let mut cursor = self.head.borrow(cs).get();
            while let Some(p) = cursor {
                if is_due_within(now, timestamp, p.timestamp_cs(cs)) {
                    break;
                }
                prev = Some(p);
                cursor = p.next_cs(cs);
            }

            event.attach(cs, timestamp, id, cursor);
            match prev {
                None => {
                    self.head.borrow(cs).set(Some(event));
                    self.driver.set_interrupt(timestamp);
                    tq_trace!("ticker: insert id={} at={} as head", id, timestamp);
                }
                Some(p) => {
                    p.set_next(cs, Some(event));
                    tq_trace!("ticker: insert id={} at={}", id, timestamp);
                }
            }
            false
        });
        assert!(!foreign, "ticker event is scheduled on another queue");
    }

    /// Schedule `event` to fire `delay` ticks after the current count
    pub fn insert_event_in(&self, event: &'a TickerEvent<'a>, delay: u32, id: EventId) {
        let timestamp = self.config.mask().wrapping_add(self.driver.read(), delay);
        self.insert_event(event, timestamp, id);
    }

    /// Cancel `event`. Does nothing if it already fired or was never
    /// scheduled.
    pub fn remove_event(&self, event: &TickerEvent<'a>) {
        critical_section::with(|cs| {
            if event.is_linked_cs(cs) && self.unlink(cs, event) {
                tq_trace!("ticker: removed id={}", event.id_cs(cs));
            }
        });
    }

    /// Current hardware count
    #[inline]
    pub fn read(&self) -> Timestamp {
        self.driver.read()
    }

    /// Service the compare interrupt.
    ///
    /// Fires every due event in order, then leaves the hardware armed for the
    /// next future event, or disarmed when the queue runs dry. The head is
    /// re-read after each handler call because the handler may have changed
    /// the chain.
    pub fn irq_handler(&self) {
        self.driver.clear_interrupt();

        while let Some(id) = critical_section::with(|cs| self.pop_due(cs)) {
            match critical_section::with(|cs| self.handler.borrow(cs).get()) {
                Some(handler) => {
                    tq_trace!("ticker: fire id={}", id);
                    handler(id);
                }
                None => {
                    tq_debug!("ticker: no handler, dropped id={}", id);
                }
            }
        }
    }

    /// Timestamp of the earliest scheduled event
    pub fn next_timestamp(&self) -> Option<Timestamp> {
        critical_section::with(|cs| self.head.borrow(cs).get().map(|e| e.timestamp_cs(cs)))
    }

    /// Returns true if no event is scheduled
    pub fn is_empty(&self) -> bool {
        critical_section::with(|cs| self.head.borrow(cs).get().is_none())
    }

    /// Number of scheduled events
    pub fn len(&self) -> usize {
        critical_section::with(|cs| {
            let mut count = 0;
            let mut cursor = self.head.borrow(cs).get();
            while let Some(p) = cursor {
                count += 1;
                cursor = p.next_cs(cs);
            }
            count
        })
    }

    /// Snapshot of up to `N` scheduled events as `(timestamp, id)` pairs, in
    /// firing order
    pub fn pending<const N: usize>(&self) -> heapless::Vec<(Timestamp, EventId), N> {
        critical_section::with(|cs| {
            let mut out = heapless::Vec::new();
            let mut cursor = self.head.borrow(cs).get();
            while let Some(p) = cursor {
                if out.push((p.timestamp_cs(cs), p.id_cs(cs))).is_err() {
                    break;
                }
                cursor = p.next_cs(cs);
            }
            out
        })
    }

    /// Hardware driver the queue is bound to
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Calibration the queue was built with
    pub fn config(&self) -> &TickerConfig {
        &self.config
    }

    /// Pop the head if it is due. Re-arms or disarms the hardware and returns
    /// `None` once nothing is left to fire.
    fn pop_due(&self, cs: CriticalSection<'_>) -> Option<EventId> {
        let head = self.head.borrow(cs);
        let Some(event) = head.get() else {
            self.driver.disable_interrupt();
            tq_trace!("ticker: queue empty, disarmed");
            return None;
        };

        let timestamp = event.timestamp_cs(cs);
        if self.config.is_due(timestamp, self.driver.read()) {
            head.set(event.next_cs(cs));
            let id = event.id_cs(cs);
            event.detach(cs);
            Some(id)
        } else {
            self.driver.set_interrupt(timestamp);
            tq_trace!("ticker: armed at={}", timestamp);
            None
        }
    }

    /// Unlink `event` from the chain, keeping the hardware armed for the
    /// head. Returns false if `event` is not in this chain.
    fn unlink(&self, cs: CriticalSection<'_>, event: &TickerEvent<'a>) -> bool {
        let head = self.head.borrow(cs);
        let Some(first) = head.get() else {
            return false;
        };

        if ptr::eq(first, event) {
            let next = event.next_cs(cs);
            head.set(next);
            event.detach(cs);
            match next {
                Some(n) => self.driver.set_interrupt(n.timestamp_cs(cs)),
                None => self.driver.disable_interrupt(),
            }
            return true;
        }

        let mut p = first;
        while let Some(n) = p.next_cs(cs) {
            if ptr::eq(n, event) {
                p.set_next(cs, event.next_cs(cs));
                event.detach(cs);
                return true;
            }
            p = n;
        }
        false
    }
}
