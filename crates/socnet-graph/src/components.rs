//! Weakly connected components.
//!
//! Every unclaimed node seeds a flood fill that follows out-edges with an
//! explicit stack. When the fill reaches a node claimed by an earlier
//! component, the two components are united in a disjoint-set forest and the
//! fill carries on under the merged identity, so incoming links are honoured
//! without ever walking edges backwards.

use std::collections::{BTreeMap, BTreeSet};

use socnet_core::errors::NetError;
use socnet_core::{Network, NodeId};

use crate::analysis::NodeOrder;

#[derive(Clone, Debug)]
struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, mut node: usize) -> usize {
        let mut root = node;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        while self.parent[node] != node {
            let parent = self.parent[node];
            self.parent[node] = root;
            node = parent;
        }
        root
    }

    fn union(&mut self, left: usize, right: usize) -> usize {
        let mut left = self.find(left);
        let mut right = self.find(right);
        if left == right {
            return left;
        }
        if self.rank[left] < self.rank[right] {
            std::mem::swap(&mut left, &mut right);
        }
        self.parent[right] = left;
        if self.rank[left] == self.rank[right] {
            self.rank[left] = self.rank[left].saturating_add(1);
        }
        left
    }
}

/// Returns the weakly connected components of the network.
///
/// Components are ordered by their earliest node in `graph.nodes()` order.
pub fn components<G: Network + ?Sized>(graph: &G) -> Result<Vec<BTreeSet<NodeId>>, NetError> {
    let order = NodeOrder::of(graph);
    let size = order.len();
    let mut owner: Vec<Option<usize>> = vec![None; size];
    let mut sets = DisjointSet::new(size);
    let mut stack = Vec::new();

    for seed in 0..size {
        if owner[seed].is_some() {
            continue;
        }
        owner[seed] = Some(seed);
        stack.push(seed);
        while let Some(current) = stack.pop() {
            for edge in graph.out_edges(order.nodes[current])? {
                let next = order.position(graph.edge(*edge)?.to)?;
                match owner[next] {
                    None => {
                        owner[next] = Some(seed);
                        stack.push(next);
                    }
                    Some(other) => {
                        sets.union(seed, other);
                    }
                }
            }
        }
    }

    let mut grouped: BTreeMap<usize, BTreeSet<NodeId>> = BTreeMap::new();
    for (position, claimed) in owner.into_iter().enumerate() {
        let root = sets.find(claimed.unwrap_or(position));
        grouped
            .entry(root)
            .or_default()
            .insert(order.nodes[position]);
    }
    let mut result: Vec<(usize, BTreeSet<NodeId>)> = grouped
        .into_values()
        .map(|members| {
            let first = members
                .iter()
                .filter_map(|node| order.positions.get(node).copied())
                .min()
                .unwrap_or(0);
            (first, members)
        })
        .collect();
    result.sort_by_key(|(first, _)| *first);
    Ok(result.into_iter().map(|(_, members)| members).collect())
}
