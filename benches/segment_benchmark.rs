//! Benchmarks for segmentation throughput.
//!
//! Run with: cargo bench
//!
//! Documents are synthetic line sequences shaped like encyclopedia articles.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use sectionize::segment::SectionSplitter;
use sectionize::{segment_lines, Line, SegmentOptions};

const HEADINGS: &[&str] = &[
    "History",
    "Design",
    "First generation",
    "Engines",
    "Motorsport",
    "Reception",
    "See also",
];

/// An article with `sections` headings, each followed by `lines_per_section` body lines.
fn create_article(sections: usize, lines_per_section: usize) -> Vec<Line> {
    let mut lines = Vec::with_capacity(sections * (lines_per_section + 1));
    for s in 0..sections {
        lines.push(Line::new(HEADINGS[s % HEADINGS.len()], 20.0));
        for i in 0..lines_per_section {
            lines.push(Line::new(
                format!("body line {} of section {} with a few more words", i, s),
                10.0,
            ));
        }
    }
    lines
}

fn bench_segment(c: &mut Criterion) {
    let mut group = c.benchmark_group("segment_lines");
    let options = SegmentOptions::default();

    for sections in [10, 100, 1000] {
        let lines = create_article(sections, 20);
        group.bench_with_input(BenchmarkId::from_parameter(sections), &lines, |b, lines| {
            b.iter(|| segment_lines(black_box(lines), &options))
        });
    }

    group.finish();
}

fn bench_split(c: &mut Criterion) {
    let paragraph = vec!["word"; 150].join(" ");
    let text = vec![paragraph; 40].join("\n\n");
    let splitter = SectionSplitter::new(800);

    c.bench_function("split_6000_words", |b| {
        b.iter(|| splitter.split(black_box("Engines"), black_box(&text)))
    });
}

criterion_group!(benches, bench_segment, bench_split);
criterion_main!(benches);
