use criterion::{black_box, criterion_group, criterion_main, Criterion};
use socnet_core::rng::RngHandle;
use socnet_graph::{
    all_shortest_paths, clustering_coefficient, components, matrices_to_network,
    DegreeSequenceGenerator, GeneratorConfig,
};

fn paths_bench(c: &mut Criterion) {
    let mut rng = RngHandle::from_seed(11);
    let generator = DegreeSequenceGenerator::new(GeneratorConfig {
        nodes: 120,
        mean_degree: 5.0,
        ..GeneratorConfig::default()
    })
    .unwrap();
    let matrix = generator.generate(&mut rng).unwrap();
    let (network, _) = matrices_to_network(&[matrix]).unwrap();

    c.bench_function("all_shortest_paths_120", |b| {
        b.iter(|| black_box(all_shortest_paths(&network).unwrap()));
    });

    c.bench_function("components_120", |b| {
        b.iter(|| black_box(components(&network).unwrap()));
    });

    c.bench_function("clustering_120", |b| {
        b.iter(|| black_box(clustering_coefficient(&network).unwrap()));
    });
}

criterion_group!(benches, paths_bench);
criterion_main!(benches);
