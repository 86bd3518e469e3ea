use std::collections::BTreeMap;

use socnet_core::errors::{ErrorInfo, NetError};
use socnet_core::{Network, NodeId};

/// Node order of a network together with the position of every node.
pub(crate) struct NodeOrder {
    pub(crate) nodes: Vec<NodeId>,
    pub(crate) positions: BTreeMap<NodeId, usize>,
}

impl NodeOrder {
    pub(crate) fn of<G: Network + ?Sized>(graph: &G) -> Self {
        let nodes: Vec<NodeId> = graph.nodes().collect();
        let positions = nodes
            .iter()
            .enumerate()
            .map(|(position, node)| (*node, position))
            .collect();
        Self { nodes, positions }
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn position(&self, node: NodeId) -> Result<usize, NetError> {
        self.positions.get(&node).copied().ok_or_else(|| {
            NetError::Graph(
                ErrorInfo::new("unknown-node", "node does not exist")
                    .with_context("node", node.as_raw().to_string()),
            )
        })
    }
}

/// Returns `sum of out-degrees / N^2`, rejecting multiplex graphs.
pub fn density<G: Network + ?Sized>(graph: &G) -> Result<f64, NetError> {
    if is_multiplex(graph)? {
        return Err(NetError::Analysis(
            ErrorInfo::new(
                "multiplex-graph",
                "density is undefined with parallel edges between one ordered pair",
            )
            .with_hint("use density_unchecked to count every parallel edge"),
        ));
    }
    density_unchecked(graph)
}

/// Returns `sum of out-degrees / N^2` without checking for parallel edges.
pub fn density_unchecked<G: Network + ?Sized>(graph: &G) -> Result<f64, NetError> {
    let mut links = 0usize;
    let mut count = 0usize;
    for node in graph.nodes() {
        links += graph.out_edges(node)?.len();
        count += 1;
    }
    if count == 0 {
        return Ok(0.0);
    }
    Ok(links as f64 / (count * count) as f64)
}

/// Returns the mean local clustering coefficient over all nodes.
///
/// For a node with distinct out-neighbours `J` (itself excluded), the local
/// coefficient is the number of ordered pairs `(j, k)` of distinct members of
/// `J` with an edge `j -> k`, divided by `|J| * (|J| - 1)`. Nodes with fewer
/// than two neighbours contribute zero.
pub fn clustering_coefficient<G: Network + ?Sized>(graph: &G) -> Result<f64, NetError> {
    let mut total = 0.0;
    let mut count = 0usize;
    for node in graph.nodes() {
        count += 1;
        let neighbours: Vec<NodeId> = graph
            .out_neighbours(node)?
            .into_iter()
            .filter(|neighbour| *neighbour != node)
            .collect();
        if neighbours.len() < 2 {
            continue;
        }
        let mut closed = 0usize;
        for j in &neighbours {
            for k in &neighbours {
                if j != k && graph.has_edge_to(*j, *k)? {
                    closed += 1;
                }
            }
        }
        total += closed as f64 / (neighbours.len() * (neighbours.len() - 1)) as f64;
    }
    if count == 0 {
        return Ok(0.0);
    }
    Ok(total / count as f64)
}

/// Returns whether some node has two or more out-edges to the same neighbour.
pub fn is_multiplex<G: Network + ?Sized>(graph: &G) -> Result<bool, NetError> {
    for node in graph.nodes() {
        if graph.out_neighbours(node)?.len() != graph.out_edges(node)?.len() {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Returns whether some node links to itself.
pub fn has_self_loops<G: Network + ?Sized>(graph: &G) -> Result<bool, NetError> {
    for node in graph.nodes() {
        if graph.has_edge_to(node, node)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Returns the fraction of edges `i -> j` for which some edge `j -> i` exists.
///
/// A network without edges is reported as fully symmetric.
pub fn symmetry<G: Network + ?Sized>(graph: &G) -> Result<f64, NetError> {
    let mut edges = 0usize;
    let mut reciprocated = 0usize;
    for edge in graph.edges() {
        let view = graph.edge(edge)?;
        edges += 1;
        if graph.has_edge_to(view.to, view.from)? {
            reciprocated += 1;
        }
    }
    if edges == 0 {
        return Ok(1.0);
    }
    Ok(reciprocated as f64 / edges as f64)
}
