//! Criterion benchmarks for the widget state machines.
//!
//! Run with:
//!   cargo bench -p folio_widgets
//!
//! Results are saved to target/criterion/

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use chrono::Weekday;
use folio::prng::Prng;
use folio::surface::DrawList;
use folio_widgets::cartpole::{CartPole, CartPoleParams};
use folio_widgets::render::CartPoleView;
use folio_widgets::responder;
use folio_widgets::risk::{self, RiskFeatures};

/// Benchmark raw simulation steps in batches.
fn bench_cartpole_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("cartpole_step");

    for steps in [1u64, 100, 10_000].iter() {
        group.throughput(Throughput::Elements(*steps));
        group.bench_with_input(BenchmarkId::from_parameter(steps), steps, |b, &steps| {
            let mut rng = Prng::new(42);
            let mut sim = CartPole::new(CartPoleParams::default(), &mut rng);
            b.iter(|| {
                for _ in 0..steps {
                    black_box(sim.step(&mut rng));
                }
            });
        });
    }

    group.finish();
}

/// Benchmark one full frame: step plus recorded draw.
fn bench_cartpole_frame(c: &mut Criterion) {
    c.bench_function("cartpole_frame_600x300", |b| {
        let mut rng = Prng::new(7);
        let mut sim = CartPole::new(CartPoleParams::default(), &mut rng);
        let view = CartPoleView::new(600.0, 300.0, sim.params.track_limit);
        let mut surface = DrawList::new(600.0, 300.0);
        b.iter(|| {
            sim.step(&mut rng);
            view.draw(&mut surface, &sim, 10);
            black_box(surface.commands().len())
        });
    });
}

fn bench_risk_and_reply(c: &mut Criterion) {
    let f = RiskFeatures {
        amount: 1200.0,
        hour: 2.0,
        day: Some(Weekday::Sat),
        merchant_risk: 0.8,
        distance_from_home: 150.0,
        unusual_category: true,
    };
    c.bench_function("risk_score", |b| b.iter(|| black_box(risk::score(black_box(&f)))));

    c.bench_function("responder_reply", |b| {
        let mut rng = Prng::new(1);
        b.iter(|| black_box(responder::respond(black_box("I feel so much stress"), &mut rng)))
    });
}

criterion_group!(
    benches,
    bench_cartpole_step,
    bench_cartpole_frame,
    bench_risk_and_reply
);
criterion_main!(benches);
