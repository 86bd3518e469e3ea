use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use socnet_core::rng::RngHandle;
use socnet_graph::{
    matrices_to_network, network_to_matrices, DegreeSequenceGenerator, DoubleCell,
    GeneratorConfig, Network,
};

fn queries_bench(c: &mut Criterion) {
    let mut rng = RngHandle::from_seed(7);
    let generator = DegreeSequenceGenerator::new(GeneratorConfig {
        nodes: 500,
        mean_degree: 8.0,
        ..GeneratorConfig::default()
    })
    .unwrap();
    let matrix = generator.generate(&mut rng).unwrap();
    let (network, nodes) = matrices_to_network(&[matrix]).unwrap();
    let network = Arc::new(network);
    let edges: Vec<_> = network.edges().collect();

    c.bench_function("edge_lookup", |b| {
        b.iter(|| {
            for edge in &edges {
                black_box(network.edge(*edge).unwrap());
            }
        });
    });

    c.bench_function("degree_queries", |b| {
        b.iter(|| {
            for node in &nodes {
                black_box(network.in_degree(*node).unwrap());
                black_box(network.out_degree(*node).unwrap());
            }
        });
    });

    c.bench_function("neighbour_index", |b| {
        b.iter(|| {
            for pair in nodes.windows(2) {
                black_box(network.has_edge_to(pair[0], pair[1]).unwrap());
            }
        });
    });

    c.bench_function("network_to_matrices", |b| {
        b.iter(|| black_box(network_to_matrices::<DoubleCell>(&network).unwrap()));
    });
}

criterion_group!(benches, queries_bench);
criterion_main!(benches);
