use criterion::{criterion_group, criterion_main, Criterion};
use sim::{LetterConfig, LetterSim};

fn bench_step(c: &mut Criterion) {
    let mut env = LetterSim::new(LetterConfig::default(), 7);
    env.reset();
    c.bench_function("letter_step", |b| {
        b.iter(|| {
            let (_, _, terminated, truncated) = env.step([0.6, -0.3]);
            if terminated || truncated {
                env.reset();
            }
        });
    });
}

criterion_group!(benches, bench_step);
criterion_main!(benches);
