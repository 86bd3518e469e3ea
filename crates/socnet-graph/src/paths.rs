use socnet_core::errors::{ErrorInfo, NetError};
use socnet_core::{Network, NodeId};

use crate::analysis::NodeOrder;
use crate::matrix::DoubleMatrix;

/// Returns the length of the shortest path from `from` to `to`, using edge
/// strength as distance. Unreachable targets yield `f64::INFINITY`.
pub fn shortest_path_length<G: Network + ?Sized>(
    graph: &G,
    from: NodeId,
    to: NodeId,
) -> Result<f64, NetError> {
    let order = NodeOrder::of(graph);
    let source = order.position(from)?;
    let target = order.position(to)?;
    let distances = dijkstra(graph, &order, source)?;
    Ok(distances[target])
}

/// Returns the distance from `source` to every node, in `graph.nodes()` order.
pub fn shortest_paths_from<G: Network + ?Sized>(
    graph: &G,
    source: NodeId,
) -> Result<Vec<f64>, NetError> {
    let order = NodeOrder::of(graph);
    let source = order.position(source)?;
    dijkstra(graph, &order, source)
}

/// Returns the all-pairs distance matrix, rows and columns in `graph.nodes()`
/// order and labelled with the node labels.
pub fn all_shortest_paths<G: Network + ?Sized>(graph: &G) -> Result<DoubleMatrix, NetError> {
    let order = NodeOrder::of(graph);
    let labels = order
        .nodes
        .iter()
        .map(|node| graph.node_label(*node).map(str::to_owned))
        .collect::<Result<Vec<_>, _>>()?;
    let mut matrix = DoubleMatrix::with_labels(labels).with_matrix_label("shortest-paths");
    for source in 0..order.len() {
        for (target, distance) in dijkstra(graph, &order, source)?.into_iter().enumerate() {
            matrix.put(source, target, distance);
        }
    }
    Ok(matrix)
}

/// Returns the largest shortest-path length, `f64::INFINITY` when some pair is disconnected.
pub fn diameter<G: Network + ?Sized>(graph: &G) -> Result<f64, NetError> {
    let paths = all_shortest_paths(graph)?;
    let size = paths.size();
    let mut longest = 0.0_f64;
    for row in 0..size {
        for col in 0..size {
            longest = longest.max(paths.cell(row, col));
        }
    }
    Ok(longest)
}

/// Returns the mean shortest-path length over ordered pairs of distinct nodes.
///
/// Disconnected pairs contribute infinity, so the result is not always finite.
pub fn average_path_length<G: Network + ?Sized>(graph: &G) -> Result<f64, NetError> {
    let paths = all_shortest_paths(graph)?;
    let size = paths.size();
    if size < 2 {
        return Ok(0.0);
    }
    let mut total = 0.0;
    for row in 0..size {
        for col in (0..size).filter(|col| *col != row) {
            total += paths.cell(row, col);
        }
    }
    Ok(total / (size * (size - 1)) as f64)
}

/// Single-source Dijkstra picking the closest fringe node by linear scan.
fn dijkstra<G: Network + ?Sized>(
    graph: &G,
    order: &NodeOrder,
    source: usize,
) -> Result<Vec<f64>, NetError> {
    let size = order.len();
    let mut distances = vec![f64::INFINITY; size];
    let mut settled = vec![false; size];
    let mut queued = vec![false; size];
    let mut fringe = vec![source];
    distances[source] = 0.0;
    queued[source] = true;

    while !fringe.is_empty() {
        let mut best = 0;
        for (slot, candidate) in fringe.iter().enumerate() {
            if distances[*candidate] < distances[fringe[best]] {
                best = slot;
            }
        }
        let current = fringe.swap_remove(best);
        settled[current] = true;
        for edge in graph.out_edges(order.nodes[current])? {
            let view = graph.edge(*edge)?;
            if view.strength < 0.0 || view.strength.is_nan() {
                return Err(NetError::Analysis(
                    ErrorInfo::new("negative-strength", "path lengths need non-negative strengths")
                        .with_context("edge", edge.as_raw().to_string())
                        .with_context("strength", view.strength.to_string()),
                ));
            }
            let next = order.position(view.to)?;
            if settled[next] {
                continue;
            }
            let candidate = distances[current] + view.strength;
            if candidate < distances[next] {
                distances[next] = candidate;
            }
            if !queued[next] {
                queued[next] = true;
                fringe.push(next);
            }
        }
    }
    Ok(distances)
}
