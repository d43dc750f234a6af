use activity_sync::models::{NormalizedActivity, SyncStore};
use activity_sync::services::merge;
use chrono::{DateTime, Duration, NaiveDate};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn activity(id: u64) -> NormalizedActivity {
    NormalizedActivity {
        activity_id: id.to_string(),
        date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + Duration::days((id / 2) as i64),
        title: format!("Activity {}", id),
        sport: "Run".to_string(),
        distance: 6.21,
        time: "51:40".to_string(),
        pace: "8:03".to_string(),
        elevation: 148,
        avg_heart_rate: Some(150),
        max_heart_rate: Some(171),
        effort: None,
        is_race: false,
    }
}

fn benchmark_merge(c: &mut Criterion) {
    let now = DateTime::from_timestamp(1_710_000_000, 0).unwrap();

    // Five years of history, roughly two activities a day
    let history = merge(SyncStore::default(), (0..3_650).map(activity).collect(), now).store;

    // A typical incremental sync: a handful of new activities plus overlap
    let incremental: Vec<_> = (3_640..3_660).map(activity).collect();

    // A full re-sync where everything is already stored
    let full_overlap: Vec<_> = (0..3_650).map(activity).collect();

    let mut group = c.benchmark_group("merge");

    group.bench_function("incremental_sync", |b| {
        b.iter(|| merge(history.clone(), black_box(incremental.clone()), now))
    });

    group.bench_function("full_resync_no_new", |b| {
        b.iter(|| merge(history.clone(), black_box(full_overlap.clone()), now))
    });

    group.finish();
}

criterion_group!(benches, benchmark_merge);
criterion_main!(benches);
