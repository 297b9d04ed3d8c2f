//! Caller-owned event records

use core::cell::Cell;
use core::fmt;
use critical_section::{CriticalSection, Mutex};

use crate::Timestamp;

/// Opaque payload handed to the event handler when an event fires
pub type EventId = u32;

#[derive(Clone, Copy)]
struct Link<'a> {
    timestamp: Timestamp,
    id: EventId,
    next: Option<&'a TickerEvent<'a>>,
    linked: bool,
}

/// An intrusive queue node.
///
/// The record is owned by the caller and only borrowed by a
/// [`TickerQueue`](crate::TickerQueue) while scheduled; the borrow checker
/// keeps it alive for as long as the queue might reach it. The queue is the
/// only writer of its fields, always inside a critical section.
pub struct TickerEvent<'a> {
    link: Mutex<Cell<Link<'a>>>,
}

impl<'a> TickerEvent<'a> {
    /// Create an unscheduled record
    pub const fn new() -> Self {
        Self {
            link: Mutex::new(Cell::new(Link {
                timestamp: 0,
                id: 0,
                next: None,
                linked: false,
            })),
        }
    }

    /// Timestamp of the last scheduling
    pub fn timestamp(&self) -> Timestamp {
        critical_section::with(|cs| self.get(cs).timestamp)
    }

    /// Id of the last scheduling
    pub fn id(&self) -> EventId {
        critical_section::with(|cs| self.get(cs).id)
    }

    /// Returns true while the record is linked into a queue
    pub fn is_scheduled(&self) -> bool {
        critical_section::with(|cs| self.get(cs).linked)
    }

    fn get(&self, cs: CriticalSection<'_>) -> Link<'a> {
        self.link.borrow(cs).get()
    }

    pub(crate) fn timestamp_cs(&self, cs: CriticalSection<'_>) -> Timestamp {
        self.get(cs).timestamp
    }

    pub(crate) fn id_cs(&self, cs: CriticalSection<'_>) -> EventId {
        self.get(cs).id
    }

    pub(crate) fn is_linked_cs(&self, cs: CriticalSection<'_>) -> bool {
        self.get(cs).linked
    }

    pub(crate) fn next_cs(&self, cs: CriticalSection<'_>) -> Option<&'a TickerEvent<'a>> {
        self.get(cs).next
    }

    pub(crate) fn set_next(&self, cs: CriticalSection<'_>, next: Option<&'a TickerEvent<'a>>) {
        let cell = self.link.borrow(cs);
        let mut link = cell.get();
        link.next = next;
        cell.set(link);
    }

    /// Mark the record as scheduled at `timestamp`, followed by `next`
    pub(crate) fn attach(
        &self,
        cs: CriticalSection<'_>,
        timestamp: Timestamp,
        id: EventId,
        next: Option<&'a TickerEvent<'a>>,
    ) {
        self.link.borrow(cs).set(Link {
            timestamp,
            id,
            next,
            linked: true,
        });
    }

    /// Mark the record as unscheduled, keeping its last timestamp and id
    pub(crate) fn detach(&self, cs: CriticalSection<'_>) {
        let cell = self.link.borrow(cs);
        let mut link = cell.get();
        link.next = None;
        link.linked = false;
        cell.set(link);
    }
}

impl Default for TickerEvent<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TickerEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let link = critical_section::with(|cs| self.get(cs));
        f.debug_struct("TickerEvent")
            .field("timestamp", &link.timestamp)
            .field("id", &link.id)
            .field("scheduled", &link.linked)
            .finish()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TickerEvent<'_> {
    fn format(&self, fmt: defmt::Formatter) {
        let link = critical_section::with(|cs| self.get(cs));
        defmt::write!(
            fmt,
            "TickerEvent {{ timestamp: {}, id: {}, scheduled: {} }}",
            link.timestamp,
            link.id,
            link.linked
        );
    }
}
