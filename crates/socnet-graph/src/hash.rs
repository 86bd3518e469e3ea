use sha2::{Digest, Sha256};
use socnet_core::errors::NetError;
use socnet_core::Network;

use crate::analysis::NodeOrder;

/// Computes the canonical structural hash of a network.
///
/// Nodes are identified by their position in `graph.nodes()`, so two networks
/// built in the same node order with the same labels and the same multiset of
/// `(from, to, kind, strength)` edges hash equally regardless of edge order.
pub fn canonical_hash<G: Network + ?Sized>(graph: &G) -> Result<String, NetError> {
    let order = NodeOrder::of(graph);
    let mut hasher = Sha256::new();

    hasher.update((order.len() as u64).to_le_bytes());
    for node in &order.nodes {
        update_str(graph.node_label(*node)?, &mut hasher);
    }

    let mut signatures: Vec<(usize, usize, String, u64)> = Vec::new();
    for edge in graph.edges() {
        let view = graph.edge(edge)?;
        signatures.push((
            order.position(view.from)?,
            order.position(view.to)?,
            view.kind.to_owned(),
            view.strength.to_bits(),
        ));
    }
    signatures.sort();
    hasher.update((signatures.len() as u64).to_le_bytes());
    for (from, to, kind, strength) in signatures {
        hasher.update((from as u64).to_le_bytes());
        hasher.update((to as u64).to_le_bytes());
        update_str(&kind, &mut hasher);
        hasher.update(strength.to_le_bytes());
    }

    Ok(format!("{:x}", hasher.finalize()))
}

fn update_str(value: &str, hasher: &mut Sha256) {
    hasher.update((value.len() as u64).to_le_bytes());
    hasher.update(value.as_bytes());
}
