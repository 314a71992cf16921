use std::hint::black_box;

use chrono::{Duration, TimeZone, Utc};
use criterion::{criterion_group, criterion_main, Criterion};
use mapty_tracker::db::MemoryStore;
use mapty_tracker::models::{Coordinates, Workout, WorkoutExtra, WorkoutId};
use mapty_tracker::services::{PersistenceAdapter, WorkoutStore};

const WORKOUT_COUNT: u32 = 1_000;

fn build_store() -> WorkoutStore {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 7, 0, 0).unwrap();
    let mut store = WorkoutStore::new();
    for i in 0..WORKOUT_COUNT {
        let extra = if i % 3 == 0 {
            WorkoutExtra::Cycling {
                elevation_gain_m: f64::from(i % 500),
            }
        } else {
            WorkoutExtra::Running {
                cadence_spm: 150 + i % 40,
            }
        };
        let workout = Workout::new(
            WorkoutId(format!("{:010}", i)),
            start + Duration::hours(i64::from(i)),
            Coordinates::new(37.0 + f64::from(i) * 1e-4, -122.0),
            3.0 + f64::from(i % 20),
            20.0 + f64::from(i % 90),
            extra,
        )
        .expect("Failed to build workout");
        store.append(workout);
    }
    store
}

fn benchmark_store(c: &mut Criterion) {
    let store = build_store();
    let adapter = PersistenceAdapter::new(MemoryStore::new());

    let mut group = c.benchmark_group("workout_store");

    group.bench_function("find_by_id_last", |b| {
        b.iter(|| store.find_by_id(black_box("0000000999")))
    });

    group.bench_function("save_1000", |b| b.iter(|| adapter.save(black_box(&store))));

    adapter.save(&store).expect("Failed to save store");
    group.bench_function("load_1000", |b| b.iter(|| adapter.load()));

    group.finish();
}

criterion_group!(benches, benchmark_store);
criterion_main!(benches);
