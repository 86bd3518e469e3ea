use std::collections::BTreeSet;

use socnet_core::errors::{ErrorInfo, NetError};
use socnet_core::rng::RngHandle;
use socnet_core::{EdgeId, Network, NodeId};
use tracing::{debug, instrument, trace};

use crate::hash::canonical_hash;
use crate::network::SocialNetwork;

/// Result of a rewiring pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewireOutcome {
    /// Edges (or reciprocal pairs) selected by the per-edge coin flip.
    pub considered: usize,
    /// Selected edges that were actually moved.
    pub rewired: usize,
    /// Canonical structural hash of the network after the pass.
    pub hash: String,
}

impl RewireOutcome {
    /// Indicates whether the network structure changed.
    pub fn changed(&self) -> bool {
        self.rewired > 0
    }
}

/// Redirects the target of each edge, with probability `probability`, to a
/// uniformly drawn node. Draws that would create a self-loop or duplicate an
/// existing link leave the edge in place.
#[instrument(level = "debug", skip(network, rng), fields(edges = network.edge_count()))]
pub fn random_rewire(
    network: &mut SocialNetwork,
    probability: f64,
    rng: &mut RngHandle,
) -> Result<RewireOutcome, NetError> {
    check_probability(probability)?;
    let nodes: Vec<NodeId> = network.nodes().collect();
    let edges: Vec<EdgeId> = network.edges().collect();
    let mut considered = 0;
    let mut rewired = 0;
    for edge in edges {
        if rng.uniform() >= probability {
            continue;
        }
        considered += 1;
        let (from, _) = network.endpoints(edge)?;
        let candidate = nodes[rng.index(nodes.len())];
        if candidate == from || network.has_edge_to(from, candidate)? {
            trace!(edge = edge.as_raw(), "rewire rejected");
            continue;
        }
        network.set_edge_to(edge, candidate)?;
        rewired += 1;
    }
    debug!(considered, rewired, "rewire pass completed");
    Ok(RewireOutcome {
        considered,
        rewired,
        hash: canonical_hash(network)?,
    })
}

/// Symmetric variant of [`random_rewire`]: an edge `a -> b` and its reverse
/// `b -> a` move together to `a -> c` and `c -> a`.
///
/// Fails with `asymmetric-graph` when a selected edge has no reverse edge;
/// that pair is left untouched, earlier moves of the pass are kept.
#[instrument(level = "debug", skip(network, rng), fields(edges = network.edge_count()))]
pub fn random_rewire_symmetric(
    network: &mut SocialNetwork,
    probability: f64,
    rng: &mut RngHandle,
) -> Result<RewireOutcome, NetError> {
    check_probability(probability)?;
    let nodes: Vec<NodeId> = network.nodes().collect();
    let edges: Vec<EdgeId> = network.edges().collect();
    let mut moved: BTreeSet<EdgeId> = BTreeSet::new();
    let mut considered = 0;
    let mut rewired = 0;
    for edge in edges {
        if moved.contains(&edge) {
            continue;
        }
        let (from, to) = network.endpoints(edge)?;
        if from == to {
            continue;
        }
        if rng.uniform() >= probability {
            continue;
        }
        considered += 1;
        let reverse = network
            .edges_to(to, from)?
            .into_iter()
            .find(|candidate| !moved.contains(candidate))
            .ok_or_else(|| {
                NetError::Analysis(
                    ErrorInfo::new("asymmetric-graph", "edge has no reverse edge to move with it")
                        .with_context("edge", edge.as_raw().to_string())
                        .with_context("from", from.as_raw().to_string())
                        .with_context("to", to.as_raw().to_string())
                        .with_hint("use random_rewire for directed networks"),
                )
            })?;
        let candidate = nodes[rng.index(nodes.len())];
        if candidate == from
            || network.has_edge_to(from, candidate)?
            || network.has_edge_to(candidate, from)?
        {
            trace!(edge = edge.as_raw(), "symmetric rewire rejected");
            continue;
        }
        network.set_edge_to(edge, candidate)?;
        network.set_edge_from(reverse, candidate)?;
        moved.insert(edge);
        moved.insert(reverse);
        rewired += 1;
    }
    debug!(considered, rewired, "symmetric rewire pass completed");
    Ok(RewireOutcome {
        considered,
        rewired,
        hash: canonical_hash(network)?,
    })
}

fn check_probability(probability: f64) -> Result<(), NetError> {
    if (0.0..=1.0).contains(&probability) {
        return Ok(());
    }
    Err(NetError::Analysis(
        ErrorInfo::new("invalid-probability", "rewiring probability must lie in [0, 1]")
            .with_context("probability", probability.to_string()),
    ))
}
