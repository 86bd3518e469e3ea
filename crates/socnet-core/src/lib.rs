#![deny(missing_docs)]
#![doc = "Core identifiers, traversal contract, errors and randomness for the socnet graph engine."]

use std::iter::ExactSizeIterator;

use serde::{Deserialize, Serialize};

pub mod errors;
pub mod rng;

pub use errors::{ErrorInfo, NetError};
pub use rng::{derive_substream_seed, RngHandle};

/// Identifier for a node within a [`Network`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(u64);

impl NodeId {
    /// Creates a new identifier from its raw integer representation.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer representation of the identifier.
    pub fn as_raw(&self) -> u64 {
        self.0
    }
}

/// Identifier for an edge within a [`Network`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId(u64);

impl EdgeId {
    /// Creates a new identifier from its raw integer representation.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer representation of the identifier.
    pub fn as_raw(&self) -> u64 {
        self.0
    }
}

/// Borrowed description of an edge returned by [`Network::edge`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeView<'a> {
    /// Node the edge leaves.
    pub from: NodeId,
    /// Node the edge enters.
    pub to: NodeId,
    /// Free-text label.
    pub label: &'a str,
    /// Relationship kind partitioning edges into independent sub-networks.
    pub kind: &'a str,
    /// Weight of the edge, also read as a distance by path algorithms.
    pub strength: f64,
}

/// Read-only traversal contract over a directed, weighted, typed network.
///
/// Renderers and the analysis engine only ever see a network through this
/// trait; mutation stays on the concrete graph type.
pub trait Network: Send + Sync {
    /// Returns the node identifiers in insertion order.
    fn nodes(&self) -> Box<dyn ExactSizeIterator<Item = NodeId> + '_>;

    /// Returns the edge identifiers in insertion order.
    fn edges(&self) -> Box<dyn ExactSizeIterator<Item = EdgeId> + '_>;

    /// Returns the number of nodes.
    fn node_count(&self) -> usize {
        self.nodes().len()
    }

    /// Returns the label of a node (empty when unlabeled).
    fn node_label(&self, node: NodeId) -> Result<&str, NetError>;

    /// Returns the endpoints and payload of an edge.
    fn edge(&self, edge: EdgeId) -> Result<EdgeView<'_>, NetError>;

    /// Returns the outgoing edges of a node in insertion order.
    fn out_edges(&self, node: NodeId) -> Result<&[EdgeId], NetError>;

    /// Returns the incoming edges of a node in insertion order.
    fn in_edges(&self, node: NodeId) -> Result<&[EdgeId], NetError>;

    /// Returns whether at least one edge leads from `from` to `to`.
    fn has_edge_to(&self, from: NodeId, to: NodeId) -> Result<bool, NetError>;

    /// Returns the distinct targets of a node's outgoing edges in first-seen order.
    fn out_neighbours(&self, node: NodeId) -> Result<Vec<NodeId>, NetError>;
}
