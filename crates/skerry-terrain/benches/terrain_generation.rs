use criterion::{Criterion, black_box, criterion_group, criterion_main};
use skerry_config::{LandmassVariant, WorldConfig};
use skerry_terrain::{BiomeClassifier, GradientNoise, Terrain};

fn world_config(resolution: u32, variant: LandmassVariant) -> WorldConfig {
    WorldConfig {
        seed: 42,
        grid_resolution: resolution,
        base_world_height: 400.0,
        base_world_scale: 128.0,
        landmass_size: 0.85,
        transition_sharpness: 0.9,
        terrain_breakup_scale: 3.0,
        terrain_breakup_intensity: 0.5,
        variant,
    }
}

fn bench_noise2d(c: &mut Criterion) {
    let noise = GradientNoise::new(42);
    c.bench_function("noise2d", |bencher| {
        bencher.iter(|| black_box(noise.noise2d(black_box(12.34), black_box(-5.67))))
    });
}

fn bench_fractal_6_octaves(c: &mut Criterion) {
    let noise = GradientNoise::new(42);
    c.bench_function("fractal_noise_6", |bencher| {
        bencher.iter(|| black_box(noise.fractal_noise(black_box(0.3), black_box(0.7), 6, 0.5)))
    });
}

fn bench_island_128(c: &mut Criterion) {
    let classifier = BiomeClassifier::standard();
    let config = world_config(128, LandmassVariant::Island);
    c.bench_function("terrain_island_128", |bencher| {
        bencher.iter(|| black_box(Terrain::generate(&config, &classifier)))
    });
}

fn bench_tiled_128(c: &mut Criterion) {
    let classifier = BiomeClassifier::standard();
    let config = world_config(128, LandmassVariant::Tiled);
    c.bench_function("terrain_tiled_128", |bencher| {
        bencher.iter(|| black_box(Terrain::generate(&config, &classifier)))
    });
}

criterion_group!(
    benches,
    bench_noise2d,
    bench_fractal_6_octaves,
    bench_island_128,
    bench_tiled_128
);
criterion_main!(benches);
