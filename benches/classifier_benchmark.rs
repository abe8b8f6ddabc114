use criterion::{black_box, criterion_group, criterion_main, Criterion};
use handspell::classifier::{Classifier, Engine};
use handspell::store::SampleStore;
use ndarray::Array1;

fn vector(seed: u64) -> Array1<f32> {
    // Cheap deterministic pseudo-random vector, enough to spread samples out.
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
    Array1::from_iter((0..63).map(|_| {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        ((state >> 33) as f32 / u32::MAX as f32) * 2.0 - 1.0
    }))
}

fn populated_store(classes: usize, samples_per_class: usize) -> SampleStore {
    let mut store = SampleStore::new(63);
    for c in 0..classes {
        for s in 0..samples_per_class {
            store
                .add_sample(&format!("class_{}", c), vector((c * 1000 + s) as u64))
                .unwrap();
        }
    }
    store
}

fn bench_encoding(c: &mut Criterion) {
    use handspell::pose::LANDMARK_COUNT;
    use handspell::{Descriptor, HandPose};

    let mut points = [[0.0f32; 3]; LANDMARK_COUNT];
    for (i, p) in points.iter_mut().enumerate() {
        p[0] = 0.3 + 0.01 * i as f32;
        p[1] = 0.4 - 0.015 * i as f32;
        p[2] = -0.002 * i as f32;
    }
    let pose = HandPose::from_points(&points).unwrap();

    let mut group = c.benchmark_group("Encoding");
    group.sample_size(100);
    group.bench_function("spatial", |b| {
        b.iter(|| black_box(&pose).encode(Descriptor::Spatial))
    });
    group.bench_function("planar", |b| {
        b.iter(|| black_box(&pose).encode(Descriptor::Planar))
    });
    group.finish();
}

fn bench_engines(c: &mut Criterion) {
    let store = populated_store(26, 20);
    let input = vector(99);

    let mut group = c.benchmark_group("Engines");
    group.sample_size(100);

    for (name, engine) in [
        ("nearest_neighbor", Engine::NearestNeighbor),
        ("nearest_centroid", Engine::NearestCentroid),
    ] {
        let classifier = Classifier::builder()
            .with_engine(engine)
            .with_match_threshold(10.0)
            .build()
            .unwrap();
        group.bench_function(name, |b| {
            b.iter(|| classifier.classify(&store, black_box(&input)).unwrap())
        });
    }
    group.finish();
}

fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("Scaling");
    group.sample_size(50);

    let classifier = Classifier::builder().build().unwrap();
    let input = vector(7);

    for &samples in &[5usize, 20, 100, 500] {
        let store = populated_store(26, samples);
        group.bench_function(format!("samples_per_class_{}", samples), |b| {
            b.iter(|| classifier.classify(&store, black_box(&input)).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_encoding, bench_engines, bench_scaling);
criterion_main!(benches);
