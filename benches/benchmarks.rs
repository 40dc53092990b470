//! Benchmarks for FaceForge operations.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use faceforge::{Explorer, LatentDirectionFinder, LatentSeeder, SamplingMode};

const LATENT_DIM: usize = 512;

/// Surface solver warnings with `RUST_LOG=faceforge=warn`.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn latents(n: usize, seed: u64) -> Vec<Vec<f64>> {
    let seeder = LatentSeeder::with_seed(LATENT_DIM, seed);
    (0..n).map(|i| seeder.latent_for(&format!("face-{}", i))).collect()
}

fn populated_explorer(n: usize) -> Explorer {
    let mut explorer = Explorer::new();
    for (i, v) in latents(n, 1).into_iter().enumerate() {
        let angle = i as f64 * 0.7;
        explorer.add_point(format!("face-{}", i), Some(v), Some([angle.cos(), angle.sin()]));
    }
    explorer
}

fn benchmark_seed_latent(c: &mut Criterion) {
    c.bench_function("seed_latent_uncached", |b| {
        b.iter(|| {
            let seeder = LatentSeeder::new(LATENT_DIM);
            seeder.latent_for(black_box("face"))
        })
    });
}

fn benchmark_sample(c: &mut Criterion) {
    let explorer = populated_explorer(64);

    c.bench_function("sample_distance_64x512", |b| {
        b.iter(|| explorer.sample(black_box([0.3, -0.2]), SamplingMode::Distance))
    });

    c.bench_function("sample_circle_64x512", |b| {
        b.iter(|| explorer.sample(black_box([0.3, -0.2]), SamplingMode::Circle))
    });
}

fn benchmark_pca(c: &mut Criterion) {
    init_tracing();
    // N < D: Gram path
    let wide = LatentDirectionFinder::new(latents(64, 2)).unwrap();
    c.bench_function("pca_64x512_k10", |b| b.iter(|| wide.pca_direction(black_box(10))));

    // N >= D: covariance path
    let seeder = LatentSeeder::with_seed(32, 3);
    let tall_rows: Vec<Vec<f64>> = (0..500).map(|i| seeder.latent_for(&format!("row-{}", i))).collect();
    let tall = LatentDirectionFinder::new(tall_rows).unwrap();
    c.bench_function("pca_500x32_k10", |b| b.iter(|| tall.pca_direction(black_box(10))));
}

fn benchmark_classifier(c: &mut Criterion) {
    init_tracing();
    let seeder = LatentSeeder::with_seed(32, 4);
    let rows: Vec<Vec<f64>> = (0..200)
        .map(|i| {
            let shift = if i < 100 { -1.0 } else { 1.0 };
            seeder
                .latent_for(&format!("row-{}", i))
                .into_iter()
                .map(|x| x + shift)
                .collect()
        })
        .collect();
    let labels: Vec<u8> = (0..200).map(|i| u8::from(i >= 100)).collect();
    let finder = LatentDirectionFinder::new(rows).unwrap();

    c.bench_function("classifier_200x32", |b| {
        b.iter(|| finder.classifier_direction(black_box(&labels)))
    });
}

criterion_group!(
    benches,
    benchmark_seed_latent,
    benchmark_sample,
    benchmark_pca,
    benchmark_classifier,
);

criterion_main!(benches);
