use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use flowshelf::adapters::StaticCatalog;
use flowshelf::domain::models::{
    AutomationCategory, FilterState, Origin, RecordId, WorkflowRecord,
};
use flowshelf::services::catalog_query::query;

const DEPARTMENTS: [&str; 5] = ["Sales", "Finance", "Operations", "IT/Eng", "Executive"];

/// Synthetic remote snapshot of `size` user-authored records.
fn remote_records(size: usize) -> Vec<WorkflowRecord> {
    (0..size)
        .map(|i| {
            let id = i64::try_from(i).unwrap_or_default();
            let mut record = WorkflowRecord::new(
                RecordId::Remote(id),
                format!("Saved workflow {i}"),
                Origin::UserAuthored,
            );
            record.summary = "Watch -> Summarise -> Post".to_string();
            record.department = DEPARTMENTS[i % DEPARTMENTS.len()].to_string();
            record.category = AutomationCategory::ALL[i % AutomationCategory::ALL.len()];
            record.tags = vec![format!("tag-{}", i % 7)];
            record
        })
        .collect()
}

fn bench_unfiltered(c: &mut Criterion) {
    let catalog = StaticCatalog::embedded().unwrap();
    let filter = FilterState::default();

    let mut group = c.benchmark_group("catalog_query_unfiltered");
    for size in [0usize, 100, 1_000] {
        let remote = remote_records(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &remote, |b, remote| {
            b.iter(|| black_box(query(catalog.records(), remote, &filter).len()));
        });
    }
    group.finish();
}

fn bench_filtered(c: &mut Criterion) {
    let catalog = StaticCatalog::embedded().unwrap();
    let remote = remote_records(1_000);
    let filter = FilterState::new()
        .with_search("summarise")
        .with_department("Finance")
        .with_department("Sales")
        .with_category(AutomationCategory::Triggered)
        .with_tag("tag-3");

    c.bench_function("catalog_query_filtered_1000", |b| {
        b.iter(|| black_box(query(catalog.records(), &remote, &filter).len()));
    });
}

criterion_group!(benches, bench_unfiltered, bench_filtered);
criterion_main!(benches);
