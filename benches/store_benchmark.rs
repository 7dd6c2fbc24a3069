use chrono::{TimeZone, Utc};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use std::sync::Arc;
use workout_mapper::db::{MemoryKeyValueStore, WorkoutRepository};
use workout_mapper::models::{Coords, Workout, WorkoutId};
use workout_mapper::services::WorkoutStore;

fn sample_workouts(count: u32) -> Vec<Workout> {
    let date = Utc.with_ymd_and_hms(2024, 4, 14, 8, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            let id = WorkoutId::new(format!("{}", 1_000_000 + i));
            let coords = Coords::new(37.0 + f64::from(i) * 1e-3, -122.0);
            // Scatter distances so sorting has real work to do.
            let distance = f64::from((i * 7919) % 997) / 10.0 + 0.1;
            let workout = if i % 2 == 0 {
                Workout::running(id, date, coords, distance, 30.0, 170.0)
            } else {
                Workout::cycling(id, date, coords, distance, 60.0, 120.0)
            };
            workout.expect("Failed to build workout")
        })
        .collect()
}

fn benchmark_store(c: &mut Criterion) {
    let workouts = sample_workouts(1_000);
    let last_id = workouts
        .last()
        .map(|w| w.id().clone())
        .expect("No workouts");

    let mut group = c.benchmark_group("workout_store");

    group.bench_function("sort_by_distance_1000", |b| {
        b.iter(|| {
            let mut store = WorkoutStore::from_workouts(workouts.clone());
            store.sort_by_distance();
            black_box(store.len())
        })
    });

    let store = WorkoutStore::from_workouts(workouts.clone());
    group.bench_function("find_last_by_id", |b| {
        b.iter(|| store.find_by_id(black_box(&last_id)).is_some())
    });

    group.finish();
}

fn benchmark_persistence(c: &mut Criterion) {
    let workouts = sample_workouts(1_000);
    let repository = WorkoutRepository::new(Arc::new(MemoryKeyValueStore::new()), "workouts");

    let mut group = c.benchmark_group("workout_repository");

    group.bench_function("save_1000", |b| {
        b.iter(|| repository.save(black_box(&workouts)).expect("Failed to save"))
    });

    repository.save(&workouts).expect("Failed to save");
    group.bench_function("load_and_rehydrate_1000", |b| {
        b.iter(|| {
            let records = repository.load().expect("Failed to load");
            records
                .into_iter()
                .filter_map(|r| Workout::try_from(r).ok())
                .count()
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_store, benchmark_persistence);
criterion_main!(benches);
