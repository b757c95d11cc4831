use std::fmt::Write;
use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use gml::{Delimiters, Features};

const LINE: &str = "8.5,47.3 8.51,47.31 8.52,47.32 8.53,47.33 8.54,47.34 8.55,47.35";

/// Builds a feature collection of `n` roads with a 100 vertex center line each.
fn collection(n: usize) -> String {
    let mut xml = String::from(
        r#"<gml:FeatureCollection xmlns:gml="http://www.opengis.net/gml" xmlns:r="urn:roads">"#,
    );
    for i in 0..n {
        let coordinates = (0..100)
            .map(|j| format!("{}.{j},{}.{j}", i % 180, j % 90))
            .collect::<Vec<_>>()
            .join(" ");
        write!(
            xml,
            r#"<gml:featureMember><r:Road fid="road.{i}"><r:name>Road {i}</r:name><r:lanes>2</r:lanes><r:centerLine><gml:LineString><gml:coordinates>{coordinates}</gml:coordinates></gml:LineString></r:centerLine></r:Road></gml:featureMember>"#
        )
        .expect("writing to a string should succeed");
    }
    xml.push_str("</gml:FeatureCollection>");
    xml
}

/// Benchmark decoding of `coordinates` text
fn bench_tuples(c: &mut Criterion) {
    let delimiters = Delimiters::default();

    c.bench_function("tuples", |b| {
        b.iter(|| {
            delimiters
                .tuples(black_box(LINE))
                .filter(Result::is_ok)
                .count()
        })
    });
}

/// Benchmark a full pass over a generated feature collection
fn bench_features(c: &mut Criterion) {
    let xml = collection(1_000);
    let mut group = c.benchmark_group("feature collection");

    group.throughput(Throughput::Bytes(xml.len() as u64));

    group.bench_function("features", |b| {
        b.iter(|| {
            let count = Features::new(black_box(xml.as_bytes()))
                .filter(Result::is_ok)
                .count();
            black_box(count)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_tuples, bench_features);
criterion_main!(benches);
