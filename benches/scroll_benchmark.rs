//! Scroll and measurement benchmarks.
//!
//! Measures the per-frame cost of the virtualizer and the masonry layout for large feeds:
//! locating the visible range at a scroll position, and folding a measurement back into
//! the size cache.
//!
//! Run with: cargo bench --bench scroll_benchmark

#![allow(missing_docs)] // criterion macros generate undocumented items

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use notefeed::model::{DocumentPath, EntryRef, NoteEntry};
use notefeed::view_state::{MasonryLayout, SequenceId, Virtualizer, VirtualizerOptions};

const FEED_SIZES: [usize; 3] = [1_000, 10_000, 100_000];

/// Scroll position in the feed.
#[derive(Debug, Clone, Copy)]
enum ScrollPosition {
    Start,
    Middle,
    End,
}

impl ScrollPosition {
    fn name(&self) -> &'static str {
        match self {
            ScrollPosition::Start => "start",
            ScrollPosition::Middle => "middle",
            ScrollPosition::End => "end",
        }
    }

    fn offset(&self, total: u64) -> u64 {
        match self {
            ScrollPosition::Start => 0,
            ScrollPosition::Middle => total / 2,
            ScrollPosition::End => total.saturating_sub(800),
        }
    }
}

fn entries(count: usize) -> Vec<EntryRef> {
    (0..count)
        .map(|i| {
            NoteEntry::new(DocumentPath::new(format!("vault/note-{i}.md")).expect("valid path"))
                .into_ref()
        })
        .collect()
}

/// Virtualizer with every other row measured at a varying height.
fn measured_virtualizer(count: usize) -> Virtualizer {
    let mut virtualizer = Virtualizer::new(VirtualizerOptions::feed());
    virtualizer.set_sequence(count, SequenceId::of(&entries(count)));
    virtualizer.set_viewport_height(800);
    for index in (0..count).step_by(2) {
        virtualizer.measure(index, 120 + (index % 7) as u32 * 40);
    }
    virtualizer
}

fn bench_virtual_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("virtual_rows");

    for count in FEED_SIZES {
        let mut virtualizer = measured_virtualizer(count);
        let total = virtualizer.total_size();

        for position in [ScrollPosition::Start, ScrollPosition::Middle, ScrollPosition::End] {
            virtualizer.set_scroll_offset(position.offset(total));
            group.bench_with_input(
                BenchmarkId::new(position.name(), count),
                &virtualizer,
                |b, virtualizer| b.iter(|| black_box(virtualizer.virtual_rows())),
            );
        }
    }

    group.finish();
}

fn bench_measure(c: &mut Criterion) {
    let mut group = c.benchmark_group("measure");

    for count in FEED_SIZES {
        group.bench_function(BenchmarkId::from_parameter(count), |b| {
            b.iter_batched(
                || measured_virtualizer(count),
                |mut virtualizer| {
                    for index in (1..count).step_by(count / 50) {
                        black_box(virtualizer.measure(index, 333));
                    }
                    virtualizer
                },
                BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

fn bench_masonry_redistribute(c: &mut Criterion) {
    let mut group = c.benchmark_group("masonry_redistribute");

    for count in [1_000, 10_000] {
        let items = entries(count);
        group.bench_function(BenchmarkId::from_parameter(count), |b| {
            b.iter_batched(
                || {
                    let mut layout = MasonryLayout::new(400, VirtualizerOptions::column());
                    layout.set_container_width(1280);
                    layout.set_entries(items.clone());
                    layout
                },
                |mut layout| {
                    black_box(layout.set_container_width(900));
                    layout
                },
                BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_virtual_rows,
    bench_measure,
    bench_masonry_redistribute
);
criterion_main!(benches);
