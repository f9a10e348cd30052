use chrono::{Days, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gradetrack_core::statistics::{subject_summaries, total_score};
use gradetrack_core::{goals, radar, trend};
use gradetrack_core::{ExamDraft, ExamStore, GoalSet, SubjectCatalog};

fn make_store(count: u64) -> ExamStore {
    let catalog = SubjectCatalog::default();
    let start = NaiveDate::from_ymd_opt(2024, 9, 1).unwrap();
    let mut store = ExamStore::new();
    for i in 0..count {
        let date = start + Days::new(i % 365);
        let draft = catalog.ids().enumerate().fold(
            ExamDraft::new(format!("exam-{i}"), date),
            |d, (n, id)| {
                let value = ((i * 7 + n as u64 * 13) % 101) as f64;
                if n % 4 == 0 {
                    d.with_score(id, value.to_string())
                } else {
                    d.with_score(id, value)
                }
            },
        );
        store.add(draft).unwrap();
    }
    store
}

fn bench_totals(c: &mut Criterion) {
    let store = make_store(500);
    c.bench_function("total_score_500", |b| {
        b.iter(|| {
            store
                .list()
                .iter()
                .map(|e| total_score(black_box(e)))
                .sum::<f64>()
        })
    });
}

fn bench_summaries(c: &mut Criterion) {
    let catalog = SubjectCatalog::default();
    let store = make_store(500);
    c.bench_function("subject_summaries_500", |b| {
        b.iter(|| subject_summaries(black_box(&catalog), black_box(store.list())))
    });
}

fn bench_views(c: &mut Criterion) {
    let catalog = SubjectCatalog::default();
    let store = make_store(500);
    let mut goal_set = GoalSet::new();
    goal_set.set("math", 120.0).unwrap();
    goal_set.set("english", 110.0).unwrap();

    c.bench_function("trend_series_500", |b| {
        b.iter(|| trend::build_series(black_box(&catalog), black_box(store.list())))
    });
    c.bench_function("radar_profile_500", |b| {
        b.iter(|| radar::build_profile(black_box(&catalog), black_box(store.list())))
    });
    c.bench_function("goal_progress_500", |b| {
        b.iter(|| goals::progress_all(black_box(&catalog), &goal_set, black_box(store.list())))
    });
}

criterion_group!(benches, bench_totals, bench_summaries, bench_views);
criterion_main!(benches);
