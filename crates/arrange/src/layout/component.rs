//! Weakly connected component detection.

use petgraph::visit::{VisitMap, Visitable};

use crate::structure::{LayoutGraph, NodeIndex};

/// Partitions the graph into weakly connected components.
///
/// Component `i` is the `i`-th component whose first member appears in the
/// input node list, and members are listed in input order. Edge direction is
/// ignored. The traversal uses an explicit stack, so deep chains cannot
/// exhaust the call stack.
pub fn detect_components(graph: &LayoutGraph) -> Vec<Vec<NodeIndex>> {
    let inner = graph.inner();
    let mut visited = inner.visit_map();
    let mut components = Vec::new();

    for seed in inner.node_indices() {
        if !visited.visit(seed) {
            continue;
        }

        let mut members = Vec::new();
        let mut stack = vec![seed];
        while let Some(current) = stack.pop() {
            members.push(current);
            for next in inner.neighbors_undirected(current) {
                if visited.visit(next) {
                    stack.push(next);
                }
            }
        }

        members.sort_unstable();
        components.push(members);
    }

    components
}
