//! Benchmarks for dashboard aggregation and filtering.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use survey_core::dashboard::{filter_entries, summarize_surveyors, DashboardState};
use survey_core::SurveyEntry;

fn create_entries(n: usize) -> Vec<SurveyEntry> {
    (0..n)
        .map(|i| SurveyEntry {
            surveyor_name: format!("Surveyor {}", i % 40),
            occupiers_name: format!("Occupier {i}"),
            property_address: format!("{} Mall Road, Ward {}, Delhi Cantt", i, i % 9),
            date: format!("2025-{:02}-{:02}", i % 12 + 1, i % 28 + 1),
            ..Default::default()
        })
        .collect()
}

fn benchmark_summary(c: &mut Criterion) {
    let entries = create_entries(5_000);

    c.bench_function("summarize_5k", |b| {
        b.iter(|| summarize_surveyors(black_box(&entries)))
    });
}

fn benchmark_filter(c: &mut Criterion) {
    let entries = create_entries(5_000);

    c.bench_function("filter_5k_hit", |b| {
        b.iter(|| filter_entries(black_box(&entries), black_box("surveyor 7")))
    });

    c.bench_function("filter_5k_miss", |b| {
        b.iter(|| filter_entries(black_box(&entries), black_box("nowhere")))
    });
}

fn benchmark_paging(c: &mut Criterion) {
    let mut state = DashboardState::new(create_entries(5_000));
    state.set_query("ward 3");

    c.bench_function("page_walk", |b| {
        b.iter(|| {
            let pages = state.submission_pager().page_count(state.filtered_len());
            for page in 1..=pages {
                state.go_to_submission_page(page);
                black_box(state.current_submissions());
            }
        })
    });
}

criterion_group!(benches, benchmark_summary, benchmark_filter, benchmark_paging);
criterion_main!(benches);
