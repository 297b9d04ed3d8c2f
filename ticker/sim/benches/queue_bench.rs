use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ticker_queue::{EventId, TickerConfig, TickerEvent, TickerQueue, TimeMask};
use ticker_sim::{run_for, SimTimer};

const MASK: TimeMask = TimeMask::from_bits(32);

fn bench_insert_tail(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_tail");
    for depth in [1usize, 8, 32] {
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, &depth| {
            let timer = SimTimer::new(MASK);
            let events: Vec<TickerEvent> = (0..=depth).map(|_| TickerEvent::new()).collect();
            let queue = TickerQueue::new(&timer, TickerConfig::new(MASK));
            for (i, event) in events[..depth].iter().enumerate() {
                queue.insert_event(event, 1_000 + i as u32, i as EventId);
            }
            let last = &events[depth];

            b.iter(|| {
                queue.insert_event(last, black_box(1_000_000), 0);
                queue.remove_event(last);
            });
        });
    }
    group.finish();
}

fn bench_dispatch(c: &mut Criterion) {
    c.bench_function("dispatch_32", |b| {
        b.iter(|| {
            let timer = SimTimer::new(MASK);
            let events: Vec<TickerEvent> = (0..32).map(|_| TickerEvent::new()).collect();
            let queue = TickerQueue::new(&timer, TickerConfig::new(MASK));
            let handler = |id: EventId| {
                black_box(id);
            };
            queue.set_handler(&handler);
            for (i, event) in events.iter().enumerate() {
                queue.insert_event(event, 1 + i as u32, i as EventId);
            }
            run_for(&timer, &queue, 40)
        });
    });
}

criterion_group!(benches, bench_insert_tail, bench_dispatch);
criterion_main!(benches);
