use chrono::{Duration, Utc};
use criterion::{criterion_group, criterion_main, Criterion};

use proofpack_core::config::HealthConfig;
use proofpack_core::models::{Document, DocumentCategory, DocumentMetadata};
use proofpack_health::{compute_pack_health, identify_gaps};

const CATEGORIES: [DocumentCategory; 6] = [
    DocumentCategory::Insurance,
    DocumentCategory::License,
    DocumentCategory::Certification,
    DocumentCategory::TaxCompliance,
    DocumentCategory::PastPerformance,
    DocumentCategory::SafetyRecord,
];

/// A pack with `n` documents spread across categories and expiry states.
fn build_pack(n: usize) -> Vec<Document> {
    let today = Utc::now().date_naive();
    (0..n)
        .map(|i| {
            let category = CATEGORIES[i % CATEGORIES.len()].clone();
            Document::new("bench", category)
                .with_expiration(today + Duration::days((i as i64 % 120) - 30))
                .with_file_size(512 * (i as u64 % 4))
                .with_metadata(DocumentMetadata {
                    title: Some(format!("Document {i}")),
                    notes: (i % 2 == 0).then(|| "notes".to_string()),
                    ..Default::default()
                })
        })
        .collect()
}

fn bench_health_small_pack(c: &mut Criterion) {
    let config = HealthConfig::default();
    let docs = build_pack(10);
    let now = Utc::now();
    c.bench_function("pack_health_10_docs", |b| {
        b.iter(|| compute_pack_health(&docs, &config, now))
    });
}

fn bench_health_large_pack(c: &mut Criterion) {
    let config = HealthConfig::default();
    let docs = build_pack(500);
    let now = Utc::now();
    c.bench_function("pack_health_500_docs", |b| {
        b.iter(|| compute_pack_health(&docs, &config, now))
    });
}

fn bench_identify_gaps(c: &mut Criterion) {
    let config = HealthConfig::default();
    let docs = build_pack(500);
    let now = Utc::now();
    c.bench_function("identify_gaps_500_docs", |b| {
        b.iter(|| identify_gaps(&docs, &config, now))
    });
}

criterion_group!(
    benches,
    bench_health_small_pack,
    bench_health_large_pack,
    bench_identify_gaps
);
criterion_main!(benches);
