#![deny(missing_docs)]

//! Directed, weighted, typed social networks: an arena-backed graph model,
//! dense adjacency matrices over bit, byte and double cells, conversion
//! between the two, a stochastic degree-sequence generator and the usual
//! network statistics.

mod analysis;
mod components;
mod config;
mod convert;
mod generators;
mod hash;
mod matrix;
mod network;
mod paths;
mod rewire;

pub use analysis::{
    clustering_coefficient, density, density_unchecked, has_self_loops, is_multiplex, symmetry,
};
pub use components::components;
pub use config::GeneratorConfig;
pub use convert::{matrices_to_network, network_to_matrices, nodes_to_matrices};
pub use generators::{generate_ensemble, DegreeSequenceGenerator, GenerationReport};
pub use hash::canonical_hash;
pub use matrix::{
    AdjacencyMatrix, BitCell, BitMatrix, ByteCell, ByteMatrix, CellCodec, DoubleCell,
    DoubleMatrix, MatrixKind,
};
pub use network::{EdgeSpec, SocialNetwork};
pub use paths::{
    all_shortest_paths, average_path_length, diameter, shortest_path_length, shortest_paths_from,
};
pub use rewire::{random_rewire, random_rewire_symmetric, RewireOutcome};

/// Re-export of the traversal contract so callers need a single import.
pub use socnet_core::{EdgeId, EdgeView, Network, NodeId};
