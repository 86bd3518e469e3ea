use std::collections::{BTreeMap, BTreeSet};

use socnet_core::errors::{ErrorInfo, NetError};
use socnet_core::rng::RngHandle;
use socnet_core::{EdgeId, EdgeView, Network, NodeId};

/// Payload used when creating a new edge.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeSpec {
    /// Free-text label.
    pub label: String,
    /// Weight of the edge, read as a distance by path algorithms.
    pub strength: f64,
    /// Relationship kind used to partition edges into sub-networks.
    pub kind: String,
}

impl EdgeSpec {
    /// Returns a spec with the given kind and the default strength of `1.0`.
    pub fn of_kind(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    /// Sets the label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the strength.
    pub fn with_strength(mut self, strength: f64) -> Self {
        self.strength = strength;
        self
    }

    /// Sets the kind.
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }
}

impl Default for EdgeSpec {
    fn default() -> Self {
        Self {
            label: String::new(),
            strength: 1.0,
            kind: String::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct NodeRecord {
    alive: bool,
    label: String,
    in_edges: Vec<EdgeId>,
    out_edges: Vec<EdgeId>,
    in_index: BTreeMap<NodeId, BTreeSet<EdgeId>>,
    out_index: BTreeMap<NodeId, BTreeSet<EdgeId>>,
}

impl NodeRecord {
    fn new(label: String) -> Self {
        Self {
            alive: true,
            label,
            in_edges: Vec::new(),
            out_edges: Vec::new(),
            in_index: BTreeMap::new(),
            out_index: BTreeMap::new(),
        }
    }

    fn is_isolated(&self) -> bool {
        self.in_edges.is_empty() && self.out_edges.is_empty()
    }

    fn holds_out(&self, neighbour: NodeId, edge: EdgeId) -> bool {
        self.out_index
            .get(&neighbour)
            .is_some_and(|edges| edges.contains(&edge))
    }

    fn holds_in(&self, neighbour: NodeId, edge: EdgeId) -> bool {
        self.in_index
            .get(&neighbour)
            .is_some_and(|edges| edges.contains(&edge))
    }

    /// Registers an outgoing edge; returns `false` when already present.
    fn attach_out(&mut self, neighbour: NodeId, edge: EdgeId) -> bool {
        if self.holds_out(neighbour, edge) {
            return false;
        }
        self.out_edges.push(edge);
        self.out_index.entry(neighbour).or_default().insert(edge);
        true
    }

    /// Registers an incoming edge; returns `false` when already present.
    fn attach_in(&mut self, neighbour: NodeId, edge: EdgeId) -> bool {
        if self.holds_in(neighbour, edge) {
            return false;
        }
        self.in_edges.push(edge);
        self.in_index.entry(neighbour).or_default().insert(edge);
        true
    }

    fn detach_out(&mut self, neighbour: NodeId, edge: EdgeId) -> bool {
        let Some(position) = self.out_edges.iter().position(|id| *id == edge) else {
            return false;
        };
        self.out_edges.remove(position);
        drop_from_index(&mut self.out_index, neighbour, edge);
        true
    }

    fn detach_in(&mut self, neighbour: NodeId, edge: EdgeId) -> bool {
        let Some(position) = self.in_edges.iter().position(|id| *id == edge) else {
            return false;
        };
        self.in_edges.remove(position);
        drop_from_index(&mut self.in_index, neighbour, edge);
        true
    }
}

/// Removes one edge from a neighbour entry; the entry itself goes with its last edge.
fn drop_from_index(
    index: &mut BTreeMap<NodeId, BTreeSet<EdgeId>>,
    neighbour: NodeId,
    edge: EdgeId,
) {
    if let Some(edges) = index.get_mut(&neighbour) {
        edges.remove(&edge);
        if edges.is_empty() {
            index.remove(&neighbour);
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct EdgeRecord {
    alive: bool,
    from: NodeId,
    to: NodeId,
    label: String,
    strength: f64,
    kind: String,
}

/// Arena-backed directed multigraph of labelled nodes and typed, weighted edges.
///
/// Nodes and edges are addressed by stable identifiers. Each node keeps its
/// incident edges twice: as insertion-ordered sequences (degree queries and
/// traversal order) and as neighbour-keyed indexes (existence and lookup).
/// Every public mutation updates both endpoints together, apart from the four
/// one-sided attach/detach operations which act on exactly the node named.
#[derive(Debug, Clone, Default)]
pub struct SocialNetwork {
    nodes: Vec<NodeRecord>,
    edges: Vec<EdgeRecord>,
}

impl SocialNetwork {
    /// Creates an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a network with `count` unlabeled nodes.
    pub fn with_nodes(count: usize) -> Self {
        let mut network = Self::new();
        for _ in 0..count {
            network.add_unlabeled_node();
        }
        network
    }

    /// Adds a labelled node.
    pub fn add_node(&mut self, label: impl Into<String>) -> NodeId {
        let id = make_node(self.nodes.len());
        self.nodes.push(NodeRecord::new(label.into()));
        id
    }

    /// Adds a node with an empty label.
    pub fn add_unlabeled_node(&mut self) -> NodeId {
        self.add_node(String::new())
    }

    /// Removes a node that has no incident edges.
    pub fn remove_node(&mut self, node: NodeId) -> Result<(), NetError> {
        let record = self.node_mut(node)?;
        if !record.is_isolated() {
            return Err(graph_error(
                "node-not-isolated",
                "cannot remove node with incident edges",
            )
            .with_context("node", node.as_raw())
            .with_context("in_edges", record.in_edges.len())
            .with_context("out_edges", record.out_edges.len()));
        }
        record.alive = false;
        Ok(())
    }

    /// Returns the number of live edges.
    pub fn edge_count(&self) -> usize {
        self.edges.iter().filter(|edge| edge.alive).count()
    }

    /// Replaces the label of a node.
    pub fn set_node_label(
        &mut self,
        node: NodeId,
        label: impl Into<String>,
    ) -> Result<(), NetError> {
        self.node_mut(node)?.label = label.into();
        Ok(())
    }

    /// Creates an edge and registers it with both endpoints in one step.
    pub fn add_edge(
        &mut self,
        from: NodeId,
        to: NodeId,
        spec: EdgeSpec,
    ) -> Result<EdgeId, NetError> {
        self.node(from)?;
        self.node(to)?;
        let id = make_edge(self.edges.len());
        self.edges.push(EdgeRecord {
            alive: true,
            from,
            to,
            label: spec.label,
            strength: spec.strength,
            kind: spec.kind,
        });
        self.node_mut(from)?.attach_out(to, id);
        self.node_mut(to)?.attach_in(from, id);
        Ok(id)
    }

    /// Detaches an edge from both endpoints and retires it.
    pub fn remove_edge(&mut self, edge: EdgeId) -> Result<(), NetError> {
        let (from, to) = self.endpoints(edge)?;
        if let Some(record) = self.nodes.get_mut(node_index(from)) {
            record.detach_out(to, edge);
        }
        if let Some(record) = self.nodes.get_mut(node_index(to)) {
            record.detach_in(from, edge);
        }
        self.retire(edge);
        Ok(())
    }

    /// Registers `edge` in the outgoing structures of `node`.
    ///
    /// The edge must leave `node`. Registering the same edge twice is a no-op
    /// and returns `false`; distinct parallel edges are all kept.
    pub fn add_out_edge(&mut self, node: NodeId, edge: EdgeId) -> Result<bool, NetError> {
        let (from, to) = self.endpoints(edge)?;
        if from != node {
            return Err(endpoint_mismatch(node, edge, "from"));
        }
        Ok(self.node_mut(node)?.attach_out(to, edge))
    }

    /// Registers `edge` in the incoming structures of `node`.
    pub fn add_in_edge(&mut self, node: NodeId, edge: EdgeId) -> Result<bool, NetError> {
        let (from, to) = self.endpoints(edge)?;
        if to != node {
            return Err(endpoint_mismatch(node, edge, "to"));
        }
        Ok(self.node_mut(node)?.attach_in(from, edge))
    }

    /// Removes `edge` from the outgoing structures of `node` only.
    ///
    /// Returns `false` when the edge was not registered there. The neighbour
    /// index keeps any other parallel edges toward the same neighbour. An edge
    /// no longer referenced by either endpoint is retired.
    pub fn remove_out_edge(&mut self, node: NodeId, edge: EdgeId) -> Result<bool, NetError> {
        self.node(node)?;
        let Some(record) = self.edges.get(edge_index(edge)).filter(|record| record.alive) else {
            return Ok(false);
        };
        let to = record.to;
        let removed = self.node_mut(node)?.detach_out(to, edge);
        if removed {
            self.retire_if_orphaned(edge);
        }
        Ok(removed)
    }

    /// Removes `edge` from the incoming structures of `node` only.
    pub fn remove_in_edge(&mut self, node: NodeId, edge: EdgeId) -> Result<bool, NetError> {
        self.node(node)?;
        let Some(record) = self.edges.get(edge_index(edge)).filter(|record| record.alive) else {
            return Ok(false);
        };
        let from = record.from;
        let removed = self.node_mut(node)?.detach_in(from, edge);
        if removed {
            self.retire_if_orphaned(edge);
        }
        Ok(removed)
    }

    /// Returns whether at least one edge leads from `other` into `node`.
    pub fn has_edge_from(&self, node: NodeId, other: NodeId) -> Result<bool, NetError> {
        Ok(self.node(node)?.in_index.contains_key(&other))
    }

    /// Returns the edges leading from `node` to `other`.
    pub fn edges_to(&self, node: NodeId, other: NodeId) -> Result<Vec<EdgeId>, NetError> {
        Ok(self
            .node(node)?
            .out_index
            .get(&other)
            .map(|edges| edges.iter().copied().collect())
            .unwrap_or_default())
    }

    /// Returns the edges leading from `other` into `node`.
    pub fn edges_from(&self, node: NodeId, other: NodeId) -> Result<Vec<EdgeId>, NetError> {
        Ok(self
            .node(node)?
            .in_index
            .get(&other)
            .map(|edges| edges.iter().copied().collect())
            .unwrap_or_default())
    }

    /// Returns the number of incoming edges, parallel edges counted individually.
    pub fn in_degree(&self, node: NodeId) -> Result<usize, NetError> {
        Ok(self.node(node)?.in_edges.len())
    }

    /// Returns the number of outgoing edges, parallel edges counted individually.
    pub fn out_degree(&self, node: NodeId) -> Result<usize, NetError> {
        Ok(self.node(node)?.out_edges.len())
    }

    /// Returns the distinct sources of a node's incoming edges in first-seen order.
    pub fn in_neighbours(&self, node: NodeId) -> Result<Vec<NodeId>, NetError> {
        let record = self.node(node)?;
        let mut seen = BTreeSet::new();
        let mut neighbours = Vec::new();
        for edge in &record.in_edges {
            let source = self.edge_record(*edge)?.from;
            if seen.insert(source) {
                neighbours.push(source);
            }
        }
        Ok(neighbours)
    }

    /// Wires a new edge from `node` to a uniformly chosen candidate.
    ///
    /// `node` itself is excluded from the draw unless `allow_self_loops` is set.
    pub fn make_random_out_edge(
        &mut self,
        node: NodeId,
        candidates: &[NodeId],
        spec: EdgeSpec,
        allow_self_loops: bool,
        rng: &mut RngHandle,
    ) -> Result<EdgeId, NetError> {
        self.node(node)?;
        let pool: Vec<NodeId> = candidates
            .iter()
            .copied()
            .filter(|candidate| allow_self_loops || *candidate != node)
            .collect();
        if pool.is_empty() {
            return Err(graph_error(
                "empty-candidates",
                "no candidate node available for a random edge",
            )
            .with_context("node", node.as_raw())
            .with_context("candidates", candidates.len()));
        }
        let target = pool[rng.index(pool.len())];
        self.add_edge(node, target, spec)
    }

    /// Replaces the label of an edge.
    pub fn set_edge_label(
        &mut self,
        edge: EdgeId,
        label: impl Into<String>,
    ) -> Result<(), NetError> {
        self.edge_record_mut(edge)?.label = label.into();
        Ok(())
    }

    /// Replaces the strength of an edge.
    pub fn set_edge_strength(&mut self, edge: EdgeId, strength: f64) -> Result<(), NetError> {
        self.edge_record_mut(edge)?.strength = strength;
        Ok(())
    }

    /// Replaces the kind of an edge.
    pub fn set_edge_kind(&mut self, edge: EdgeId, kind: impl Into<String>) -> Result<(), NetError> {
        self.edge_record_mut(edge)?.kind = kind.into();
        Ok(())
    }

    /// Re-points the source of an edge, moving it between the old and new sources
    /// and rekeying the target's incoming index.
    pub fn set_edge_from(&mut self, edge: EdgeId, new_from: NodeId) -> Result<(), NetError> {
        let (old_from, to) = self.endpoints(edge)?;
        self.node(new_from)?;
        if old_from == new_from {
            return Ok(());
        }
        self.node_mut(old_from)?.detach_out(to, edge);
        self.node_mut(to)?.detach_in(old_from, edge);
        self.edge_record_mut(edge)?.from = new_from;
        self.node_mut(new_from)?.attach_out(to, edge);
        self.node_mut(to)?.attach_in(new_from, edge);
        Ok(())
    }

    /// Re-points the target of an edge, moving it between the old and new targets
    /// and rekeying the source's outgoing index.
    pub fn set_edge_to(&mut self, edge: EdgeId, new_to: NodeId) -> Result<(), NetError> {
        let (from, old_to) = self.endpoints(edge)?;
        self.node(new_to)?;
        if old_to == new_to {
            return Ok(());
        }
        self.node_mut(old_to)?.detach_in(from, edge);
        self.node_mut(from)?.detach_out(old_to, edge);
        self.edge_record_mut(edge)?.to = new_to;
        self.node_mut(new_to)?.attach_in(from, edge);
        self.node_mut(from)?.attach_out(new_to, edge);
        Ok(())
    }

    /// Returns the `(from, to)` endpoints of an edge.
    pub fn endpoints(&self, edge: EdgeId) -> Result<(NodeId, NodeId), NetError> {
        let record = self.edge_record(edge)?;
        Ok((record.from, record.to))
    }

    /// Verifies that sequences, neighbour indexes and edge endpoints agree.
    pub fn check_consistency(&self) -> Result<(), NetError> {
        for (idx, record) in self.nodes.iter().enumerate().filter(|(_, node)| node.alive) {
            let node = make_node(idx);
            let indexed_out: usize = record.out_index.values().map(BTreeSet::len).sum();
            let indexed_in: usize = record.in_index.values().map(BTreeSet::len).sum();
            if indexed_out != record.out_edges.len() || indexed_in != record.in_edges.len() {
                return Err(inconsistent(node, "index size differs from edge sequence"));
            }
            for edge in &record.out_edges {
                let target = self.edge_record(*edge)?;
                if target.from != node || !record.holds_out(target.to, *edge) {
                    return Err(inconsistent(node, "outgoing edge not indexed under its target")
                        .with_context("edge", edge.as_raw()));
                }
                if !self.node(target.to)?.holds_in(node, *edge) {
                    return Err(inconsistent(node, "outgoing edge missing at its target")
                        .with_context("edge", edge.as_raw()));
                }
            }
            for edge in &record.in_edges {
                let source = self.edge_record(*edge)?;
                if source.to != node || !record.holds_in(source.from, *edge) {
                    return Err(inconsistent(node, "incoming edge not indexed under its source")
                        .with_context("edge", edge.as_raw()));
                }
                if !self.node(source.from)?.holds_out(node, *edge) {
                    return Err(inconsistent(node, "incoming edge missing at its source")
                        .with_context("edge", edge.as_raw()));
                }
            }
        }
        Ok(())
    }

    /// Returns the identifiers of all live nodes in insertion order.
    pub(crate) fn node_ids(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.alive)
            .map(|(idx, _)| make_node(idx))
            .collect()
    }

    /// Returns the identifiers of all live edges in insertion order.
    pub(crate) fn edge_ids(&self) -> Vec<EdgeId> {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, edge)| edge.alive)
            .map(|(idx, _)| make_edge(idx))
            .collect()
    }

    pub(crate) fn node(&self, id: NodeId) -> Result<&NodeRecord, NetError> {
        self.nodes
            .get(node_index(id))
            .filter(|record| record.alive)
            .ok_or_else(|| unknown_node(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut NodeRecord, NetError> {
        self.nodes
            .get_mut(node_index(id))
            .filter(|record| record.alive)
            .ok_or_else(|| unknown_node(id))
    }

    pub(crate) fn edge_record(&self, id: EdgeId) -> Result<&EdgeRecord, NetError> {
        self.edges
            .get(edge_index(id))
            .filter(|record| record.alive)
            .ok_or_else(|| unknown_edge(id))
    }

    fn edge_record_mut(&mut self, id: EdgeId) -> Result<&mut EdgeRecord, NetError> {
        self.edges
            .get_mut(edge_index(id))
            .filter(|record| record.alive)
            .ok_or_else(|| unknown_edge(id))
    }

    fn retire(&mut self, edge: EdgeId) {
        if let Some(record) = self.edges.get_mut(edge_index(edge)) {
            record.alive = false;
        }
    }

    fn retire_if_orphaned(&mut self, edge: EdgeId) {
        let Some(record) = self.edges.get(edge_index(edge)) else {
            return;
        };
        let (from, to) = (record.from, record.to);
        let held_by_source = self
            .nodes
            .get(node_index(from))
            .is_some_and(|node| node.holds_out(to, edge));
        let held_by_target = self
            .nodes
            .get(node_index(to))
            .is_some_and(|node| node.holds_in(from, edge));
        if !held_by_source && !held_by_target {
            self.retire(edge);
        }
    }
}

impl Network for SocialNetwork {
    fn nodes(&self) -> Box<dyn ExactSizeIterator<Item = NodeId> + '_> {
        Box::new(self.node_ids().into_iter())
    }

    fn edges(&self) -> Box<dyn ExactSizeIterator<Item = EdgeId> + '_> {
        Box::new(self.edge_ids().into_iter())
    }

    fn node_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.alive).count()
    }

    fn node_label(&self, node: NodeId) -> Result<&str, NetError> {
        Ok(&self.node(node)?.label)
    }

    fn edge(&self, edge: EdgeId) -> Result<EdgeView<'_>, NetError> {
        let record = self.edge_record(edge)?;
        Ok(EdgeView {
            from: record.from,
            to: record.to,
            label: &record.label,
            kind: &record.kind,
            strength: record.strength,
        })
    }

    fn out_edges(&self, node: NodeId) -> Result<&[EdgeId], NetError> {
        Ok(&self.node(node)?.out_edges)
    }

    fn in_edges(&self, node: NodeId) -> Result<&[EdgeId], NetError> {
        Ok(&self.node(node)?.in_edges)
    }

    fn has_edge_to(&self, from: NodeId, to: NodeId) -> Result<bool, NetError> {
        Ok(self.node(from)?.out_index.contains_key(&to))
    }

    fn out_neighbours(&self, node: NodeId) -> Result<Vec<NodeId>, NetError> {
        let record = self.node(node)?;
        let mut seen = BTreeSet::new();
        let mut neighbours = Vec::new();
        for edge in &record.out_edges {
            let target = self.edge_record(*edge)?.to;
            if seen.insert(target) {
                neighbours.push(target);
            }
        }
        Ok(neighbours)
    }
}

fn node_index(id: NodeId) -> usize {
    id.as_raw() as usize
}

fn edge_index(id: EdgeId) -> usize {
    id.as_raw() as usize
}

fn make_node(index: usize) -> NodeId {
    NodeId::from_raw(index as u64)
}

fn make_edge(index: usize) -> EdgeId {
    EdgeId::from_raw(index as u64)
}

fn graph_error(code: impl Into<String>, message: impl Into<String>) -> NetError {
    NetError::Graph(ErrorInfo::new(code, message))
}

fn unknown_node(id: NodeId) -> NetError {
    graph_error("unknown-node", "node does not exist").with_context("node", id.as_raw())
}

fn unknown_edge(id: EdgeId) -> NetError {
    graph_error("unknown-edge", "edge does not exist").with_context("edge", id.as_raw())
}

fn endpoint_mismatch(node: NodeId, edge: EdgeId, side: &str) -> NetError {
    graph_error(
        "endpoint-mismatch",
        format!("edge {side} endpoint is not the given node"),
    )
    .with_context("node", node.as_raw())
    .with_context("edge", edge.as_raw())
}

fn inconsistent(node: NodeId, message: &str) -> NetError {
    graph_error("inconsistent-index", message).with_context("node", node.as_raw())
}
