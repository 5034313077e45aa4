//! # Entity Lifecycle Benchmark
//!
//! Spawning fresh handles (column growth) versus recycling killed ones.
//!
//! Run with: `cargo bench --package maskecs_core --bench lifecycle_benchmark`

// Benchmarks don't need docs and may carry unread payload fields
#![allow(missing_docs)]
#![allow(dead_code)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use maskecs_core::{Component, System};

#[derive(Clone, Copy, Default)]
struct Position([f32; 2]);
impl Component for Position {}

#[derive(Clone, Copy, Default)]
struct Health(u32);
impl Component for Health {}

fn empty_system(capacity: usize) -> System {
    System::builder()
        .with_component::<Position>()
        .with_component::<Health>()
        .with_capacity(capacity)
        .build()
        .expect("two distinct components")
}

/// Benchmark: spawn N fresh entities (every spawn grows both columns).
fn bench_spawn_fresh(c: &mut Criterion) {
    let mut group = c.benchmark_group("spawn_fresh");

    for count in [1_000, 10_000, 100_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                let mut system = empty_system(0);
                for _ in 0..count {
                    black_box(system.spawn_entity().unwrap());
                }
                system.entity_count()
            });
        });
    }

    group.finish();
}

/// Benchmark: kill and respawn 10K handles (free-list only, no growth).
fn bench_kill_respawn_cycle(c: &mut Criterion) {
    let mut system = empty_system(100_000);
    let mut ids: Vec<_> = (0..100_000).map(|_| system.spawn_entity().unwrap()).collect();

    c.bench_function("kill_respawn_cycle_10K", |b| {
        b.iter(|| {
            for id in ids.iter().take(10_000) {
                system.kill(*id).unwrap();
            }
            for id in ids.iter_mut().take(10_000) {
                *id = system.spawn_entity().unwrap();
            }
            black_box(system.alive_count())
        });
    });
}

/// Benchmark: enabling components on every entity.
fn bench_enable_components(c: &mut Criterion) {
    let mut system = empty_system(100_000);
    let ids: Vec<_> = (0..100_000).map(|_| system.spawn_entity().unwrap()).collect();

    c.bench_function("enable_components_100K", |b| {
        b.iter(|| {
            for &id in &ids {
                system.enable_components::<(Position, Health)>(id).unwrap();
            }
            black_box(system.alive_count())
        });
    });
}

criterion_group!(
    benches,
    bench_spawn_fresh,
    bench_kill_respawn_cycle,
    bench_enable_components,
);

criterion_main!(benches);
