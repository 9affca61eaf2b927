//! Collision benchmarks for gr_core.
//!
//! Run with: `cargo bench -p gr_core`

// Benchmark binaries don't need docs on macro-generated functions
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gr_core::prelude::*;
use gr_test_utils::fixtures::{asteroid, missile, quiet_config};

fn crowded_field(asteroids: usize) -> SpaceField {
    let mut field = SpaceField::new(&quiet_config());
    for i in 0..asteroids {
        let x = (i % 12) as f64;
        let y = 6.0 + (i / 12) as f64;
        field
            .place_asteroid(asteroid((x, y), (0.1, -1.0), 0.8, 600.0))
            .unwrap();
        field
            .place_missile(missile((x + 0.5, y - 1.0), (0.0, 1.0)))
            .unwrap();
    }
    field
}

/// Pairwise resolution over growing populations.
pub fn collision_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_collisions");
    for count in [8usize, 32, 96] {
        let field = crowded_field(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &field, |b, field| {
            b.iter(|| {
                let mut field = field.clone();
                black_box(resolve_collisions(&mut field, Fixed::from_num(0.8)))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, collision_benchmark);
criterion_main!(benches);
