use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rinkside::feed::{
    advance_positions, push_bounded, synthesize_chat, synthesize_commentary, FeedTuning,
};
use rinkside::fixtures;
use rinkside::types::CommentaryEntry;

/// Benchmark the position random walk over the full seed roster
fn bench_position_tick(c: &mut Criterion) {
    let tuning = FeedTuning::default();

    c.bench_function("position_tick", |b| {
        let mut rng = StdRng::seed_from_u64(42);
        let mut snapshot = fixtures::seed_snapshot();
        b.iter(|| {
            advance_positions(black_box(&mut snapshot), &tuning, &mut rng);
        })
    });
}

/// Benchmark event synthesis plus the bounded append path
fn bench_event_synthesis(c: &mut Criterion) {
    let tuning = FeedTuning::default();

    let mut group = c.benchmark_group("event_synthesis");

    group.bench_function("commentary_append", |b| {
        let mut rng = StdRng::seed_from_u64(42);
        let mut entries: Vec<CommentaryEntry> = fixtures::seed_commentary();
        let mut next_id = 100;
        b.iter(|| {
            let entry = synthesize_commentary(next_id, "12:34".to_string(), &mut rng);
            next_id += 1;
            push_bounded(black_box(&mut entries), entry, tuning.commentary_cap);
        })
    });

    group.bench_function("chat_append", |b| {
        let mut rng = StdRng::seed_from_u64(42);
        let mut messages = fixtures::seed_chat();
        let now = chrono::Local::now();
        let mut next_id = 100;
        b.iter(|| {
            let message = synthesize_chat(next_id, now, &mut rng);
            next_id += 1;
            push_bounded(black_box(&mut messages), message, tuning.chat_cap);
        })
    });

    group.finish();
}

criterion_group!(benches, bench_position_tick, bench_event_synthesis);
criterion_main!(benches);
