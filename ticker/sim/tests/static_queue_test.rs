//! A queue living in statics, the way a firmware image declares it

use std::sync::atomic::{AtomicU32, Ordering};

use ticker_queue::{EventId, TickerConfig, TickerEvent, TickerQueue, TimeMask};
use ticker_sim::{run_for, SimTimer};

const MASK: TimeMask = TimeMask::from_bits(16);
const PERIOD: u32 = 100;

static TIMER: SimTimer = SimTimer::new(MASK);
static QUEUE: TickerQueue<'static, &'static SimTimer> =
    TickerQueue::new(&TIMER, TickerConfig::new(MASK).with_future_tolerance(1));
static HEARTBEAT: TickerEvent<'static> = TickerEvent::new();
static BEATS: AtomicU32 = AtomicU32::new(0);

fn on_event(id: EventId) {
    let beats = BEATS.fetch_add(1, Ordering::SeqCst) + 1;
    if beats < 5 {
        QUEUE.insert_event(&HEARTBEAT, HEARTBEAT.timestamp() + PERIOD, id);
    }
}

#[test]
fn test_periodic_reschedule_from_static_handler() {
    QUEUE.set_handler(&on_event);
    QUEUE.insert_event_in(&HEARTBEAT, PERIOD, 7);

    let serviced = run_for(&TIMER, &QUEUE, 10 * PERIOD);

    assert_eq!(serviced, 5);
    assert_eq!(BEATS.load(Ordering::SeqCst), 5);
    assert!(!HEARTBEAT.is_scheduled());
    assert_eq!(HEARTBEAT.id(), 7);
    assert_eq!(TIMER.stats().init, 1);
    assert!(!TIMER.is_armed());
}
