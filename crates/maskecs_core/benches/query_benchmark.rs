//! # Query Benchmark
//!
//! Measures the linear mask scan behind `System::query` at several
//! population sizes and match ratios.
//!
//! Run with: `cargo bench --package maskecs_core --bench query_benchmark`

// Benchmarks don't need docs and may carry unread payload fields
#![allow(missing_docs)]
#![allow(dead_code)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use maskecs_core::{Component, EntityId, System};

#[derive(Clone, Copy, Default)]
struct Position {
    x: f32,
    y: f32,
}
impl Component for Position {}

#[derive(Clone, Copy, Default)]
struct Velocity {
    dx: f32,
    dy: f32,
}
impl Component for Velocity {}

#[derive(Clone, Copy, Default)]
struct Sprite(u32);
impl Component for Sprite {}

/// Builds a system where every `stride`-th entity has all three components
/// and the rest only have a position.
fn populated(count: usize, stride: usize) -> System {
    let mut system = System::builder()
        .with_component::<Position>()
        .with_component::<Velocity>()
        .with_component::<Sprite>()
        .with_capacity(count)
        .build()
        .expect("three distinct components");

    for i in 0..count {
        let id = system.spawn_entity().unwrap();
        if i % stride == 0 {
            system
                .enable_components::<(Position, Velocity, Sprite)>(id)
                .expect("fresh entity");
        } else {
            system
                .enable_components::<(Position,)>(id)
                .expect("fresh entity");
        }
    }
    system
}

/// Benchmark: full scan with a three-component mask.
fn bench_query_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_scan");

    for count in [1_000, 10_000, 100_000] {
        let system = populated(count, 2);
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| black_box(system.query::<(Position, Velocity, Sprite)>().unwrap().len()));
        });
    }

    group.finish();
}

/// Benchmark: the scan costs the same whether few or many entities match.
fn bench_query_selectivity(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_selectivity_100K");

    for stride in [1, 10, 1_000] {
        let system = populated(100_000, stride);
        group.bench_with_input(BenchmarkId::from_parameter(stride), &stride, |b, _| {
            b.iter(|| black_box(system.query::<(Velocity,)>().unwrap().len()));
        });
    }

    group.finish();
}

/// Benchmark: query followed by per-handle component writes (a typical hook).
fn bench_query_and_mutate(c: &mut Criterion) {
    let mut system = populated(100_000, 2);

    c.bench_function("query_and_mutate_100K", |b| {
        b.iter(|| {
            let moving: Vec<EntityId> = system.query::<(Position, Velocity)>().unwrap();
            for id in moving {
                let vel = *system.component_ref::<Velocity>(id).unwrap();
                let pos = system.component::<Position>(id).unwrap();
                pos.x += vel.dx;
                pos.y += vel.dy;
            }
            black_box(system.alive_count())
        });
    });
}

criterion_group!(
    benches,
    bench_query_scan,
    bench_query_selectivity,
    bench_query_and_mutate,
);

criterion_main!(benches);
