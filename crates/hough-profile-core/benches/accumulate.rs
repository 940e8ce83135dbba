use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hough_profile_core::{
    analyze, binarize, build_accumulator, AnalysisParams, AngleSampling, BinarizeParams, GrayImage,
};

fn scribble(width: usize, height: usize) -> GrayImage {
    let mut img = GrayImage::filled(width, height, 0);
    for i in 0..width.min(height) {
        img.set(i, i, 255);
        img.set(i, height / 2, 255);
        img.set(width / 3, i, 255);
    }
    img
}

fn bench_accumulate(c: &mut Criterion) {
    let img = scribble(400, 400);
    let grid = binarize(&img.view(), &BinarizeParams::default()).expect("binarize");
    let sampling = AngleSampling::default();

    c.bench_function("build_accumulator_400", |b| {
        b.iter(|| build_accumulator(black_box(&grid), black_box(&sampling)))
    });

    let params = AnalysisParams::default();
    c.bench_function("analyze_400", |b| {
        b.iter(|| analyze(black_box(&img.view()), black_box(&params)))
    });
}

criterion_group!(benches, bench_accumulate);
criterion_main!(benches);
