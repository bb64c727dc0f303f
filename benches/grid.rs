//! Benchmarks for width reflow, sorting and body rendering.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.
#![allow(clippy::expect_used, clippy::cast_possible_truncation)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use datagrid::{CellContent, ColumnDescriptor, ColumnOptions, ColumnWidths, Grid, GridConfig};

#[derive(Clone)]
struct Row {
    id: u32,
    name: String,
}

fn rows(count: u32) -> Vec<Row> {
    (0..count)
        .map(|i| Row {
            // Scrambled so neither column arrives presorted
            id: i.wrapping_mul(2_654_435_761) % 100_000,
            name: format!("user{:05}", (i * 7919) % count.max(1)),
        })
        .collect()
}

fn schema() -> Vec<ColumnDescriptor<Row>> {
    vec![
        ColumnDescriptor::new("id", |r: &Row, _| r.id.to_string().into()).value(|r| r.id.into()),
        ColumnDescriptor::new("name", |r: &Row, _| CellContent::text(r.name.clone()))
            .width(240)
            .value(|r| r.name.as_str().into()),
    ]
}

/// Reflow a wide schema across alternating container widths
fn bench_reflow(c: &mut Criterion) {
    let mut group = c.benchmark_group("reflow");
    for count in [10usize, 100, 1000] {
        let columns: Vec<ColumnOptions> = (0..count)
            .map(|i| ColumnOptions {
                requested_width: Some(100 + (i as u32 % 7) * 20),
                resizable: i % 5 != 0,
                ..ColumnOptions::new(format!("c{i}"))
            })
            .collect();
        let mut widths = ColumnWidths::new(&columns, 100);
        group.bench_with_input(BenchmarkId::new("columns", count), &count, |b, _| {
            let mut container = 0u32;
            b.iter(|| {
                container = if container == 150_000 { 90_000 } else { 150_000 };
                widths.reflow(black_box(container));
            });
        });
    }
    group.finish();
}

/// Sort rows by a numeric and a text column
fn bench_sort(c: &mut Criterion) {
    let data = rows(10_000);
    let mut group = c.benchmark_group("sort_10k");
    group.throughput(Throughput::Elements(data.len() as u64));

    for key in ["id", "name"] {
        group.bench_function(key, |b| {
            b.iter_batched(
                || (Grid::new(schema(), GridConfig::default()), data.clone()),
                |(mut grid, mut rows)| {
                    grid.sort_by_key(key, &mut rows).expect("known column");
                    rows
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

/// Build the body render model for a scrolled window
fn bench_body(c: &mut Criterion) {
    let data = rows(100_000);
    let mut grid = Grid::new(schema(), GridConfig::default());
    grid.set_viewport_height(1080.0);
    grid.scroll_to_index(50_000, data.len());

    c.bench_function("body_window", |b| b.iter(|| grid.body(black_box(&data))));
}

criterion_group!(benches, bench_reflow, bench_sort, bench_body);

criterion_main!(benches);
