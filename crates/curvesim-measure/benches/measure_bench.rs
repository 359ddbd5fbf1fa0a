//! Criterion benchmarks for curvesim-measure: the three measures, the parallel
//! Hausdorff variant, and the pairwise matrix.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use curvesim_measure::{Curve, DistanceMatrix, Dtw, Frechet, Hausdorff, Metric};

fn make_spiral(n: usize, phase: f64) -> Curve {
    let points: Vec<Vec<f64>> = (0..n)
        .map(|i| {
            let t = i as f64 * 0.05 + phase;
            vec![t.cos() * (1.0 + t), t.sin() * (1.0 + t)]
        })
        .collect();
    Curve::new(points).unwrap()
}

fn bench_measures(c: &mut Criterion) {
    let lengths = [64usize, 256, 1024];
    let mut group = c.benchmark_group("measure");

    for &len in &lengths {
        let a = make_spiral(len, 0.0);
        let b = make_spiral(len, 0.3);
        let frechet = Frechet::new(Metric::Euclidean).unwrap();
        let dtw = Dtw::new(Metric::Euclidean).unwrap();
        let hausdorff = Hausdorff::new(Metric::Euclidean).unwrap();

        group.bench_with_input(BenchmarkId::new("frechet", len), &(&a, &b), |bencher, (a, b)| {
            bencher.iter(|| frechet.distance(a.as_view(), b.as_view()).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("dtw", len), &(&a, &b), |bencher, (a, b)| {
            bencher.iter(|| dtw.distance(a.as_view(), b.as_view()).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("hausdorff", len), &(&a, &b), |bencher, (a, b)| {
            bencher.iter(|| hausdorff.distance(a.as_view(), b.as_view()).unwrap());
        });
        group.bench_with_input(
            BenchmarkId::new("hausdorff_naive", len),
            &(&a, &b),
            |bencher, (a, b)| {
                bencher.iter(|| hausdorff.distance_naive(a.as_view(), b.as_view()).unwrap());
            },
        );
        group.bench_with_input(
            BenchmarkId::new("hausdorff_par", len),
            &(&a, &b),
            |bencher, (a, b)| {
                bencher.iter(|| hausdorff.distance_par(a.as_view(), b.as_view()).unwrap());
            },
        );
    }

    group.finish();
}

fn bench_pairwise(c: &mut Criterion) {
    let curves: Vec<Curve> = (0..40).map(|i| make_spiral(128, i as f64 * 0.1)).collect();
    let frechet = Frechet::new(Metric::Euclidean).unwrap();

    c.bench_function("frechet_pairwise_40x128", |b| {
        b.iter(|| DistanceMatrix::pairwise(&frechet, &curves).unwrap());
    });
}

criterion_group!(benches, bench_measures, bench_pairwise);
criterion_main!(benches);
