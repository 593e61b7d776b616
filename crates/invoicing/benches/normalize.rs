use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use ledgerline_core::RawNumeric;
use ledgerline_invoicing::{normalize_items, normalize_items_checked, RawLineItem};

/// Clean payload: plain numbers only, the fast path.
fn clean_items(count: usize) -> Vec<RawLineItem> {
    (0..count)
        .map(|i| {
            RawLineItem::new(format!("line-{i}"), (i % 97) as f64 + 0.5, (i % 7 + 1) as f64)
                .with_tax((i % 25) as f64)
        })
        .collect()
}

/// Messy payload: every third price is a numeric string, every fifth field
/// is garbage, tax alternates between the current and the legacy key.
fn messy_items(count: usize) -> Vec<RawLineItem> {
    (0..count)
        .map(|i| {
            let unit_price = match i % 5 {
                0 => RawNumeric::Text("not a price".to_string()),
                _ if i % 3 == 0 => RawNumeric::Text(format!(" {}.25 ", i % 97)),
                _ => RawNumeric::Number((i % 97) as f64),
            };
            let mut item = RawLineItem {
                name: format!("line-{i}"),
                unit_price,
                quantity: RawNumeric::Number((i % 7 + 1) as f64),
                tax_percentage: RawNumeric::Missing,
                tax_percent: RawNumeric::Missing,
            };
            if i % 2 == 0 {
                item.tax_percentage = RawNumeric::Number((i % 25) as f64);
            } else {
                item.tax_percent = RawNumeric::Text(format!("{}", i % 25));
            }
            item
        })
        .collect()
}

fn bench_normalize_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize_items_throughput");

    for count in [1usize, 16, 256, 4096].iter() {
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::new("clean", count), count, |b, &count| {
            let items = clean_items(count);
            b.iter(|| black_box(normalize_items(black_box(&items))));
        });
        group.bench_with_input(BenchmarkId::new("messy", count), count, |b, &count| {
            let items = messy_items(count);
            b.iter(|| black_box(normalize_items(black_box(&items))));
        });
    }

    group.finish();
}

fn bench_checked_overhead(c: &mut Criterion) {
    let mut group = c.benchmark_group("checked_normalization_overhead");
    group.sample_size(1000);

    let items = messy_items(256);
    group.bench_function("lenient", |b| {
        b.iter(|| black_box(normalize_items(black_box(&items))));
    });
    group.bench_function("checked", |b| {
        b.iter(|| black_box(normalize_items_checked(black_box(&items))));
    });

    group.finish();
}

criterion_group!(benches, bench_normalize_throughput, bench_checked_overhead);
criterion_main!(benches);
