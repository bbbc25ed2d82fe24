//! Criterion benchmarks for the settings decode path.
//!
//! Measures the cost of turning settings text into a validated
//! [`SettingsModel`], for a minimal file and for a legacy file that carries
//! many ignored keys.
//!
//! Run with:
//! ```bash
//! cargo bench --package schoolbag-core --bench settings_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use schoolbag_core::{SettingsDocument, SettingsModel};

const MINIMAL: &str = r#"{"height": 170, "weight": 60, "birthday": "2000-01-01"}"#;

/// Builds a settings object with `n` extra tag entries that the decoder must skip.
fn legacy_settings_with_n_tags(n: usize) -> String {
    let tags: Vec<String> = (0..n)
        .map(|i| format!(r#""TAG{i:04}": {{"monday": "1", "tuesday": "0"}}"#))
        .collect();
    format!(
        r#"{{"gender": "male", "height": 170, "weight": 60, "birthday": "2000-01-01",
             "lightingMode": "off", "tags": {{{}}}}}"#,
        tags.join(",")
    )
}

fn bench_decode_minimal(c: &mut Criterion) {
    c.bench_function("decode_minimal_settings", |b| {
        b.iter(|| {
            let doc = SettingsDocument::from_json_str(black_box(MINIMAL)).expect("parse");
            SettingsModel::try_from(doc).expect("decode")
        })
    });
}

fn bench_decode_legacy(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_legacy_settings");
    for n in [10usize, 100, 1000] {
        let text = legacy_settings_with_n_tags(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &text, |b, text| {
            b.iter(|| {
                let doc = SettingsDocument::from_json_str(black_box(text)).expect("parse");
                SettingsModel::try_from(doc).expect("decode")
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_decode_minimal, bench_decode_legacy);
criterion_main!(benches);
