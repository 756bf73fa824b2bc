use criterion::measurement::Measurement;
use criterion::{criterion_group, criterion_main, BenchmarkGroup, BenchmarkId, Criterion};
use explained_variance::dimred::pca::{PCABuilder, SpectrumMethod};
use explained_variance::svd::NalgebraSVD;
use explained_variance::{compute_variance_shares, min_components_for_variance};
use ndarray::Array2;
use rand::distr::{Distribution, Uniform};
use rand::{rngs::StdRng, SeedableRng};
use std::time::Duration;

#[derive(Clone)]
pub struct SpectrumConfig {
    seed: u64,
    spectrum_lengths: Vec<usize>,
    matrix_sizes: Vec<(usize, usize)>,
    measurement_time: u64,
    sample_size: usize,
}

impl Default for SpectrumConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            spectrum_lengths: vec![13, 100, 1_000, 10_000, 100_000],
            matrix_sizes: vec![(178, 13), (1000, 50), (5000, 100)],
            measurement_time: 10,
            sample_size: 10,
        }
    }
}

fn create_spectrum(len: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let value_dist = Uniform::try_from(-0.01..10.0).unwrap();
    (0..len).map(|_| value_dist.sample(&mut rng)).collect()
}

fn create_test_matrix(rows: usize, cols: usize, seed: u64) -> Array2<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let value_dist = Uniform::try_from(0.0..1.0).unwrap();
    Array2::from_shape_fn((rows, cols), |(_, j)| {
        value_dist.sample(&mut rng) * (j as f64 + 1.0)
    })
}

fn configure_group<'a, M: Measurement>(
    c: &'a mut Criterion<M>,
    name: &str,
    config: &SpectrumConfig,
) -> BenchmarkGroup<'a, M> {
    let mut group = c.benchmark_group(name);
    group.measurement_time(Duration::from_secs(config.measurement_time));
    group.sample_size(config.sample_size);
    group
}

pub fn bench_variance_shares(c: &mut Criterion) {
    let config = SpectrumConfig::default();
    let mut group = configure_group(c, "Variance_Shares", &config);

    for &len in config.spectrum_lengths.iter() {
        let spectrum = create_spectrum(len, config.seed + len as u64);
        let shares = compute_variance_shares(&spectrum).unwrap();
        let prefix = shares.prefix().to_vec();

        group.bench_with_input(BenchmarkId::new("shares", len), &len, |b, _| {
            b.iter(|| compute_variance_shares(&spectrum).unwrap());
        });

        group.bench_with_input(BenchmarkId::new("min_components", len), &len, |b, _| {
            b.iter(|| min_components_for_variance(&prefix, 0.95).unwrap());
        });
    }
    group.finish();
}

pub fn bench_pca_spectrum(c: &mut Criterion) {
    let config = SpectrumConfig::default();
    let mut group = configure_group(c, "PCA_Spectrum", &config);

    for &(rows, cols) in config.matrix_sizes.iter() {
        let matrix = create_test_matrix(rows, cols, config.seed + (rows * cols) as u64);

        for method in [SpectrumMethod::Svd, SpectrumMethod::Covariance] {
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", method), format!("{}x{}", rows, cols)),
                &(rows, cols),
                |b, _| {
                    b.iter(|| {
                        let mut pca = PCABuilder::new(NalgebraSVD)
                            .scale(true)
                            .method(method)
                            .build();
                        pca.fit(matrix.view()).unwrap();
                        pca.n_components_for_variance(0.8).unwrap()
                    });
                },
            );
        }
    }
    group.finish();
}

criterion_group!(variance_benches, bench_variance_shares, bench_pca_spectrum);
criterion_main!(variance_benches);
