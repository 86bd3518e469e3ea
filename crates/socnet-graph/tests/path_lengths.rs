use socnet_graph::{
    all_shortest_paths, average_path_length, diameter, shortest_path_length, shortest_paths_from,
    EdgeSpec, Network, NodeId, SocialNetwork,
};

fn weighted(strength: f64) -> EdgeSpec {
    EdgeSpec::default().with_strength(strength)
}

fn chain() -> (SocialNetwork, Vec<NodeId>) {
    let mut network = SocialNetwork::new();
    let nodes: Vec<NodeId> = ["A", "B", "C", "D"]
        .iter()
        .map(|label| network.add_node(*label))
        .collect();
    network.add_edge(nodes[0], nodes[1], weighted(1.0)).unwrap();
    network.add_edge(nodes[1], nodes[2], weighted(2.0)).unwrap();
    network.add_edge(nodes[0], nodes[3], weighted(5.0)).unwrap();
    (network, nodes)
}

fn cycle(len: usize) -> SocialNetwork {
    let mut network = SocialNetwork::with_nodes(len);
    let nodes: Vec<NodeId> = network.nodes().collect();
    for idx in 0..len {
        network
            .add_edge(nodes[idx], nodes[(idx + 1) % len], EdgeSpec::default())
            .unwrap();
    }
    network
}

#[test]
fn chain_distances_use_strength() {
    let (network, nodes) = chain();
    assert_eq!(shortest_path_length(&network, nodes[0], nodes[2]).unwrap(), 3.0);
    assert_eq!(shortest_path_length(&network, nodes[0], nodes[3]).unwrap(), 5.0);
    assert_eq!(
        shortest_path_length(&network, nodes[2], nodes[0]).unwrap(),
        f64::INFINITY
    );
    assert_eq!(shortest_path_length(&network, nodes[1], nodes[1]).unwrap(), 0.0);
    assert_eq!(
        shortest_paths_from(&network, nodes[0]).unwrap(),
        vec![0.0, 1.0, 3.0, 5.0]
    );
}

#[test]
fn shorter_detours_win() {
    let (mut network, nodes) = chain();
    network.add_edge(nodes[2], nodes[3], weighted(0.5)).unwrap();
    assert_eq!(shortest_path_length(&network, nodes[0], nodes[3]).unwrap(), 3.5);
}

#[test]
fn distance_matrix_is_labelled() {
    let (network, nodes) = chain();
    let paths = all_shortest_paths(&network).unwrap();
    assert_eq!(paths.size(), nodes.len());
    assert_eq!(paths.matrix_label(), "shortest-paths");
    assert_eq!(paths.label_of(3), Some("D"));
    for idx in 0..nodes.len() {
        assert_eq!(paths.get(idx, idx).unwrap(), 0.0);
    }
    assert_eq!(paths.get(0, 2).unwrap(), 3.0);
    assert_eq!(paths.get(3, 0).unwrap(), f64::INFINITY);
}

#[test]
fn diameter_and_average_of_a_cycle() {
    let network = cycle(3);
    assert_eq!(diameter(&network).unwrap(), 2.0);
    assert_eq!(average_path_length(&network).unwrap(), 1.5);
}

#[test]
fn disconnected_pairs_are_infinite() {
    let (network, _) = chain();
    assert_eq!(diameter(&network).unwrap(), f64::INFINITY);
    assert_eq!(average_path_length(&network).unwrap(), f64::INFINITY);
}

#[test]
fn tiny_networks_have_zero_average() {
    assert_eq!(average_path_length(&SocialNetwork::new()).unwrap(), 0.0);
    assert_eq!(average_path_length(&SocialNetwork::with_nodes(1)).unwrap(), 0.0);
    assert_eq!(diameter(&SocialNetwork::new()).unwrap(), 0.0);
}

#[test]
fn negative_strengths_are_rejected() {
    let (mut network, nodes) = chain();
    network.add_edge(nodes[2], nodes[3], weighted(-1.0)).unwrap();
    let err = shortest_paths_from(&network, nodes[0]).unwrap_err();
    assert_eq!(err.code(), "negative-strength");
}

#[test]
fn unknown_sources_are_rejected() {
    let (network, nodes) = chain();
    let err = shortest_path_length(&network, NodeId::from_raw(17), nodes[0]).unwrap_err();
    assert_eq!(err.code(), "unknown-node");
}
