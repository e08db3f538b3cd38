use std::collections::HashMap;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sitepulse_core::{Analyzer, Document, FeatureSet, FetchResult, LinkCheckReport, Tier};

fn page(paragraphs: usize) -> String {
    let body: String = (0..paragraphs)
        .map(|i| {
            format!(
                "<p>Paragraph {} covers outsole grip, drainage, midsole durability, \
                 and the kind of rocky terrain that wears a shoe down fast.</p>",
                i
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <title>Trail Running Shoes Reviewed On Real Trails</title>
    <meta name="description" content="Trail shoes reviewed after real miles.">
    <meta name="viewport" content="width=device-width">
</head>
<body><main><h1>Trail shoes</h1>{}</main></body>
</html>"#,
        body
    )
}

fn fetch_for(body: String) -> FetchResult {
    FetchResult {
        status: 200,
        elapsed_ms: 150,
        body,
        headers: HashMap::new(),
        final_url: "https://example.com/".to_string(),
    }
}

fn bench_parse(c: &mut Criterion) {
    let small = page(10);
    let medium = page(200);
    let large = page(2000);

    let mut group = c.benchmark_group("parse");

    group.bench_with_input(BenchmarkId::new("small", "10p"), &small, |b, html| {
        b.iter(|| Document::parse(black_box(html)))
    });

    group.bench_with_input(BenchmarkId::new("medium", "200p"), &medium, |b, html| {
        b.iter(|| Document::parse(black_box(html)))
    });

    group.bench_with_input(BenchmarkId::new("large", "2000p"), &large, |b, html| {
        b.iter(|| Document::parse(black_box(html)))
    });

    group.finish();
}

fn bench_extractors(c: &mut Criterion) {
    let fetch = fetch_for(page(200));
    let doc = Document::parse(&fetch.body);

    c.bench_function("extract_features", |b| {
        b.iter(|| FeatureSet::extract(black_box(&doc), black_box(&fetch)))
    });
}

fn bench_full_analysis(c: &mut Criterion) {
    let analyzer = Analyzer::new();
    let fetch = fetch_for(page(200));

    c.bench_function("analyze_document", |b| {
        b.iter(|| analyzer.analyze_document(black_box(&fetch), Tier::Advanced, LinkCheckReport::default()))
    });
}

criterion_group!(benches, bench_parse, bench_extractors, bench_full_analysis);
criterion_main!(benches);
