use std::collections::{BTreeMap, BTreeSet};

use socnet_core::errors::{ErrorInfo, NetError};
use socnet_core::{Network, NodeId};
use tracing::debug;

use crate::matrix::{AdjacencyMatrix, CellCodec};
use crate::network::{EdgeSpec, SocialNetwork};

/// Splits the out-edges of `nodes` by kind into one matrix per kind.
///
/// Row `i` of every matrix is `nodes[i]`, labelled with its node label. Cell
/// `(i, j)` receives the strength of the edge `nodes[i] -> nodes[j]`; with
/// parallel edges of one kind the last edge wins. Edges leaving the node set
/// are skipped. Matrices are returned ordered by kind.
pub fn nodes_to_matrices<C: CellCodec>(
    network: &SocialNetwork,
    nodes: &[NodeId],
) -> Result<Vec<AdjacencyMatrix<C>>, NetError> {
    let mut rows: BTreeMap<NodeId, usize> = BTreeMap::new();
    let mut labels = Vec::with_capacity(nodes.len());
    for (row, node) in nodes.iter().enumerate() {
        labels.push(network.node_label(*node)?.to_owned());
        if rows.insert(*node, row).is_some() {
            return Err(convert_error("duplicate-node", "node listed more than once")
                .with_context("node", node.as_raw()));
        }
    }

    let mut matrices: BTreeMap<String, AdjacencyMatrix<C>> = BTreeMap::new();
    let mut skipped = 0usize;
    for (row, node) in nodes.iter().enumerate() {
        for edge in network.out_edges(*node)? {
            let view = network.edge(*edge)?;
            let Some(&col) = rows.get(&view.to) else {
                skipped += 1;
                continue;
            };
            let matrix = matrices.entry(view.kind.to_owned()).or_insert_with(|| {
                AdjacencyMatrix::with_labels(labels.clone()).with_matrix_label(view.kind)
            });
            matrix.put(row, col, view.strength);
        }
    }
    if skipped > 0 {
        debug!(skipped, "edges leaving the node set were not converted");
    }
    Ok(matrices.into_values().collect())
}

/// Converts every live node of the network, in insertion order.
pub fn network_to_matrices<C: CellCodec>(
    network: &SocialNetwork,
) -> Result<Vec<AdjacencyMatrix<C>>, NetError> {
    let nodes: Vec<NodeId> = network.nodes().collect();
    nodes_to_matrices(network, &nodes)
}

/// Builds a fresh network from matrices sharing one node set.
///
/// Every matrix must have the same size and the identical label list. Node
/// `i` of the result stands for row `i` and is returned at position `i`; each
/// non-zero cell becomes an edge whose kind is the matrix label and whose
/// strength is the cell value.
pub fn matrices_to_network<C: CellCodec>(
    matrices: &[AdjacencyMatrix<C>],
) -> Result<(SocialNetwork, Vec<NodeId>), NetError> {
    let Some(first) = matrices.first() else {
        return Err(convert_error(
            "no-matrices",
            "at least one matrix is required to build a network",
        ));
    };
    for (position, matrix) in matrices.iter().enumerate().skip(1) {
        if matrix.size() != first.size() || matrix.labels() != first.labels() {
            return Err(convert_error(
                "label-mismatch",
                "all matrices must share the same row labels",
            )
            .with_context("matrix", position)
            .with_context("kind", matrix.matrix_label())
            .with_hint("convert matrices describing different node sets separately"));
        }
    }

    let size = first.size();
    let mut network = SocialNetwork::new();
    let nodes: Vec<NodeId> = (0..size)
        .map(|row| match first.label_of(row) {
            Some(label) => network.add_node(label),
            None => network.add_unlabeled_node(),
        })
        .collect();

    let mut kinds = BTreeSet::new();
    for matrix in matrices {
        kinds.insert(matrix.matrix_label());
        for row in 0..size {
            for col in 0..size {
                let value = matrix.cell(row, col);
                if value == 0.0 {
                    continue;
                }
                network.add_edge(
                    nodes[row],
                    nodes[col],
                    EdgeSpec::of_kind(matrix.matrix_label()).with_strength(value),
                )?;
            }
        }
    }
    debug!(nodes = size, kinds = kinds.len(), edges = network.edge_count(), "matrices converted");
    Ok((network, nodes))
}

fn convert_error(code: impl Into<String>, message: impl Into<String>) -> NetError {
    NetError::Convert(ErrorInfo::new(code, message))
}
