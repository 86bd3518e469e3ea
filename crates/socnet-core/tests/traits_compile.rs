use socnet_core::errors::{ErrorInfo, NetError};
use socnet_core::{EdgeId, EdgeView, Network, NodeId};

/// Two nodes joined by a single edge.
struct PairNetwork {
    out: Vec<EdgeId>,
    none: Vec<EdgeId>,
}

impl PairNetwork {
    fn new() -> Self {
        Self {
            out: vec![EdgeId::from_raw(0)],
            none: Vec::new(),
        }
    }
}

impl Network for PairNetwork {
    fn nodes(&self) -> Box<dyn ExactSizeIterator<Item = NodeId> + '_> {
        Box::new(vec![NodeId::from_raw(0), NodeId::from_raw(1)].into_iter())
    }

    fn edges(&self) -> Box<dyn ExactSizeIterator<Item = EdgeId> + '_> {
        Box::new(self.out.clone().into_iter())
    }

    fn node_label(&self, node: NodeId) -> Result<&str, NetError> {
        match node.as_raw() {
            0 => Ok("a"),
            1 => Ok("b"),
            _ => Err(NetError::Graph(ErrorInfo::new("unknown-node", "no such node"))),
        }
    }

    fn edge(&self, _edge: EdgeId) -> Result<EdgeView<'_>, NetError> {
        Ok(EdgeView {
            from: NodeId::from_raw(0),
            to: NodeId::from_raw(1),
            label: "",
            kind: "friend",
            strength: 1.0,
        })
    }

    fn out_edges(&self, node: NodeId) -> Result<&[EdgeId], NetError> {
        Ok(if node.as_raw() == 0 { &self.out } else { &self.none })
    }

    fn in_edges(&self, node: NodeId) -> Result<&[EdgeId], NetError> {
        Ok(if node.as_raw() == 1 { &self.out } else { &self.none })
    }

    fn has_edge_to(&self, from: NodeId, to: NodeId) -> Result<bool, NetError> {
        Ok(from.as_raw() == 0 && to.as_raw() == 1)
    }

    fn out_neighbours(&self, node: NodeId) -> Result<Vec<NodeId>, NetError> {
        Ok(if node.as_raw() == 0 {
            vec![NodeId::from_raw(1)]
        } else {
            Vec::new()
        })
    }
}

#[test]
fn network_trait_is_object_safe() {
    let network: Box<dyn Network> = Box::new(PairNetwork::new());
    assert_eq!(network.node_count(), 2);
    assert_eq!(network.edges().len(), 1);
    let view = network.edge(EdgeId::from_raw(0)).unwrap();
    assert_eq!(view.kind, "friend");
    assert!(network
        .has_edge_to(NodeId::from_raw(0), NodeId::from_raw(1))
        .unwrap());
    assert_eq!(network.node_label(NodeId::from_raw(1)).unwrap(), "b");
    assert!(network.node_label(NodeId::from_raw(2)).is_err());
}
