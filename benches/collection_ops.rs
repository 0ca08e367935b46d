use colorfactor::{
    filter_by, sort_by, stats, Collection, ColorToken, Colorspace, Factor, FilterOptions,
    LuminanceSearch, Range, SortOptions, StatsOptions,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// A deterministic spread of lch tokens covering the hue wheel
fn sample_collection(size: usize) -> Collection {
    (0..size)
        .map(|i| {
            let t = i as f64 / size as f64;
            ColorToken::opaque(
                Colorspace::Lch,
                [20.0 + 60.0 * t, 10.0 + 50.0 * (1.0 - t), (i as f64 * 137.5) % 360.0],
            )
        })
        .collect()
}

fn benchmark_sort(c: &mut Criterion) {
    let collection = sample_collection(256);
    let options = SortOptions::default();

    c.bench_function("sort_by_hue", |b| {
        b.iter(|| sort_by(black_box(&collection), Some(&[Factor::Hue]), &options))
    });
    c.bench_function("sort_by_all_factors", |b| {
        b.iter(|| sort_by(black_box(&collection), None, &options))
    });
}

fn benchmark_filter_and_stats(c: &mut Criterion) {
    let collection = sample_collection(256);
    let filter = FilterOptions::default()
        .with_range(Factor::Luminance, Range::between(0.2, 0.6))
        .with_range(Factor::Contrast, Range::expression(">=3"));

    c.bench_function("filter_by_luminance_contrast", |b| {
        b.iter(|| {
            filter_by(
                black_box(&collection),
                Some(&[Factor::Luminance, Factor::Contrast]),
                &filter,
            )
        })
    });
    c.bench_function("stats_all_factors", |b| {
        b.iter(|| stats(black_box(&collection), None, &StatsOptions::default()))
    });
}

fn benchmark_luminance_search(c: &mut Criterion) {
    let search = LuminanceSearch::new();
    let gold = ColorToken::from_rgb8(0xff, 0xc3, 0x00);

    c.bench_function("luminance_search", |b| {
        b.iter(|| search.search(black_box(&gold), black_box(0.7)))
    });
}

criterion_group!(
    benches,
    benchmark_sort,
    benchmark_filter_and_stats,
    benchmark_luminance_search
);
criterion_main!(benches);
