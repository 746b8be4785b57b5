//! Box Model Benchmarks
//!
//! **Purpose:** Measure extraction, comparison and document walking
//!
//! **Regression Threshold:** >20% slower than baseline
//!
//! **How to Run:**
//! ```bash
//! cargo bench --bench box_model
//! ```
//!
//! **What's Being Measured:**
//! 1. `extract element` - Style lookup for twelve edge properties plus arithmetic
//! 2. `compare boxes` - Eight absolute differences and two tolerance checks
//! 3. `walk document/N` - Pre-order snapshot of a synthetic document with N blocks
//!
//! **Performance Notes:**
//! - Extraction is dominated by CSS length parsing of the style map
//! - Walking allocates text summaries and key styles per element

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use layout_parity::comparator::compare;
use layout_parity::document::{CapturedDocument, CapturedElement};
use layout_parity::extractor::{extract, extract_element};
use layout_parity::geometry::{EdgeValues, RawRect};
use layout_parity::snapshot::{walk, WalkOptions};
use std::hint::black_box;

fn padded_block(index: usize) -> CapturedElement {
    CapturedElement::new("DIV")
        .with_id(format!("block-{}", index))
        .with_class("block-test")
        .with_rect(RawRect::new(20.0, 103.5 + index as f64 * 84.0, 921.0, 74.0))
        .with_style("display", "block")
        .with_style("padding-top", "15px")
        .with_style("padding-right", "15px")
        .with_style("padding-bottom", "15px")
        .with_style("padding-left", "15px")
        .with_style("border-top-width", "2px")
        .with_style("border-right-width", "2px")
        .with_style("border-bottom-width", "2px")
        .with_style("border-left-width", "2px")
        .with_style("margin-bottom", "10px")
        .with_child(CapturedElement::new("SPAN").with_text("Block content"))
}

fn document(blocks: usize) -> CapturedDocument {
    let body = (0..blocks).fold(CapturedElement::new("BODY"), |body, i| {
        body.with_child(padded_block(i))
    });
    CapturedDocument::from_root(CapturedElement::new("HTML").with_child(body))
}

fn bench_extract(c: &mut Criterion) {
    let doc = document(1);
    let Some(target) = doc.first_body_child() else {
        return;
    };

    c.bench_function("extract element", |b| {
        b.iter(|| extract_element(black_box(&doc), black_box(target)))
    });
}

fn bench_compare(c: &mut Criterion) {
    let padding = EdgeValues::uniform(15.0);
    let border = EdgeValues::uniform(2.0);
    let reference = extract(
        RawRect::new(20.0, 103.5, 921.0, 74.0),
        padding,
        border,
        EdgeValues::default(),
    );
    let subject = extract(
        RawRect::new(20.5, 121.5, 921.0, 74.0),
        padding,
        border,
        EdgeValues::default(),
    );

    c.bench_function("compare boxes", |b| {
        b.iter(|| compare(black_box(&subject), black_box(&reference), black_box(1.0)))
    });
}

fn bench_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("walk document");
    let options = WalkOptions {
        include_styles: true,
        ..WalkOptions::default()
    };

    for blocks in [10, 100, 1000] {
        let doc = document(blocks);
        group.bench_with_input(BenchmarkId::from_parameter(blocks), &doc, |b, doc| {
            b.iter(|| walk(black_box(doc), &options))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_extract, bench_compare, bench_walk);
criterion_main!(benches);
