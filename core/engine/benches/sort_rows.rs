//! FILENAME: core/engine/benches/sort_rows.rs
//! Benchmarks for cache building and multi-key sorting over generated rows.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use grid_engine::{
    ColumnParams, DataType, FormatSettings, SortSpec, TableConfig, TranslateValue, Translations,
};
use serde_json::{json, Value};

const TYPES: [&str; 4] = ["buy", "sell", "dividend", "interest"];

fn generate_rows(count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| {
            json!({
                "security": {"name": format!("Security {}", (i * 7919) % 997)},
                "transactionType": TYPES[i % TYPES.len()],
                "amount": ((i * 104_729) % 100_000) as f64 / 100.0,
            })
        })
        .collect()
}

fn table() -> TableConfig {
    let mut table = TableConfig::new(FormatSettings::for_locale("de-CH"));
    table
        .add_column(DataType::String, "security.name", "NAME", true, true, None)
        .unwrap();
    table
        .add_column(
            DataType::String,
            "transactionType",
            "TRANSACTION_TYPE",
            true,
            true,
            Some(ColumnParams::new().translate(TranslateValue::UpperCase)),
        )
        .unwrap();
    table
        .add_column(DataType::Numeric, "amount", "AMOUNT", true, true, None)
        .unwrap();
    table.set_translations(Translations::with_entries(
        "de",
        [("BUY", "Kauf"), ("SELL", "Verkauf"), ("DIVIDEND", "Dividende"), ("INTEREST", "Zins")],
    ));
    table
}

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_permutation");
    let specs = [
        SortSpec::ascending("transactionType$"),
        SortSpec::descending("amount"),
        SortSpec::ascending("security.name"),
    ];

    for count in [1_000, 10_000, 100_000] {
        let rows = generate_rows(count);
        let mut table = table();
        table.build_translated_cache(&rows);

        group.bench_with_input(BenchmarkId::from_parameter(count), &rows, |b, rows| {
            b.iter(|| table.sort_permutation(black_box(rows), &specs))
        });
    }
    group.finish();
}

fn bench_cache(c: &mut Criterion) {
    let rows = generate_rows(100_000);
    c.bench_function("build_translated_cache_100k", |b| {
        b.iter(|| {
            let mut table = table();
            table.build_translated_cache(black_box(&rows));
            table
        })
    });
}

criterion_group!(benches, bench_sort, bench_cache);
criterion_main!(benches);
