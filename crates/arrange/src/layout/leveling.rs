//! Topological leveling within a component.
//!
//! A node's level is the length of the longest edge path reaching it from a
//! node with no incoming edge, so a diamond's sink lands two levels below its
//! source rather than one.

use std::collections::{HashMap, HashSet, VecDeque};

use indexmap::IndexSet;
use petgraph::{algo::tarjan_scc, graph::DiGraph, visit::EdgeRef};

use crate::structure::{LayoutGraph, NodeIndex};

/// Level of every node in one component.
pub type LevelMap = HashMap<NodeIndex, usize>;

/// Assigns a level to every member of a component.
///
/// Kahn's algorithm over a FIFO queue. Every in-component edge counts towards
/// its target's in-degree, parallel edges included, while each source
/// releases a given successor only once. A node whose in-degree never drops
/// to zero (cycle members, nodes downstream of a cycle, self-loops, targets
/// of parallel edges) is left unleveled by the queue; all such nodes then
/// share the level after the deepest leveled node.
pub fn compute_levels(graph: &LayoutGraph, members: &[NodeIndex]) -> LevelMap {
    let inner = graph.inner();
    let in_component: HashSet<NodeIndex> = members.iter().copied().collect();

    let mut in_degree: HashMap<NodeIndex, usize> = members.iter().map(|&idx| (idx, 0)).collect();
    let mut successors: HashMap<NodeIndex, IndexSet<NodeIndex>> = HashMap::new();
    for &source in members {
        for edge in inner.edges(source) {
            let target = edge.target();
            if !in_component.contains(&target) {
                continue;
            }
            if let Some(degree) = in_degree.get_mut(&target) {
                *degree += 1;
            }
            successors.entry(source).or_default().insert(target);
        }
    }

    let mut queue: VecDeque<(NodeIndex, usize)> = members
        .iter()
        .filter(|idx| in_degree.get(idx) == Some(&0))
        .map(|&idx| (idx, 0))
        .collect();

    let mut levels = LevelMap::with_capacity(members.len());
    while let Some((idx, level)) = queue.pop_front() {
        if levels.contains_key(&idx) {
            continue;
        }
        levels.insert(idx, level);

        let Some(children) = successors.get(&idx) else {
            continue;
        };
        for &child in children {
            let Some(remaining) = in_degree.get_mut(&child) else {
                continue;
            };
            if *remaining == 0 {
                continue;
            }
            *remaining -= 1;
            if *remaining == 0 {
                queue.push_back((child, level + 1));
            }
        }
    }

    if levels.len() < members.len() {
        let fallback = levels.values().copied().max().unwrap_or(0) + 1;
        for &idx in members {
            levels.entry(idx).or_insert(fallback);
        }
    }

    levels
}

/// Assigns levels after contracting strongly connected components.
///
/// Each cycle is treated as a single node placed at the longest-path depth
/// of the condensed graph, and all of its members share that level. Parallel
/// edges and self-loops have no effect on the result.
pub fn compute_condensed_levels(graph: &LayoutGraph, members: &[NodeIndex]) -> LevelMap {
    let inner = graph.inner();

    let mut local = DiGraph::<NodeIndex, ()>::with_capacity(members.len(), 0);
    let local_of: HashMap<NodeIndex, _> = members
        .iter()
        .map(|&idx| (idx, local.add_node(idx)))
        .collect();
    for &source in members {
        for edge in inner.edges(source) {
            if let Some(&target) = local_of.get(&edge.target()) {
                local.add_edge(local_of[&source], target, ());
            }
        }
    }

    // Tarjan yields components in reverse topological order.
    let sccs = tarjan_scc(&local);
    let mut scc_of = vec![0; local.node_count()];
    for (scc, nodes) in sccs.iter().enumerate() {
        for node in nodes {
            scc_of[node.index()] = scc;
        }
    }

    let mut scc_level = vec![0usize; sccs.len()];
    for scc in (0..sccs.len()).rev() {
        for &node in &sccs[scc] {
            for next in local.neighbors(node) {
                let next_scc = scc_of[next.index()];
                if next_scc != scc {
                    scc_level[next_scc] = scc_level[next_scc].max(scc_level[scc] + 1);
                }
            }
        }
    }

    local
        .node_indices()
        .map(|node| (local[node], scc_level[scc_of[node.index()]]))
        .collect()
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use arrange_core::{
        geometry::{Point, Size},
        graph::{Edge, Node},
    };

    use super::*;
    use crate::layout::detect_components;

    fn graph_strategy() -> impl Strategy<Value = LayoutGraph> {
        (1usize..24).prop_flat_map(|count| {
            proptest::collection::vec((0..count, 0..count), 0..count * 2).prop_map(
                move |pairs| {
                    let nodes = (0..count)
                        .map(|id| Node::new(id as i64, Point::default(), Size::new(10.0, 10.0)))
                        .collect();
                    let edges = pairs
                        .into_iter()
                        .map(|(s, t)| Edge::new(s as i64, t as i64))
                        .collect();
                    LayoutGraph::from_parts(nodes, edges)
                },
            )
        })
    }

    /// Acyclic graphs without parallel edges: every edge runs from a lower
    /// id to a higher one, each pair at most once.
    fn dag_strategy() -> impl Strategy<Value = LayoutGraph> {
        (1usize..24).prop_flat_map(|count| {
            proptest::collection::btree_set((0..count, 0..count), 0..count * 2).prop_map(
                move |pairs| {
                    let nodes = (0..count)
                        .map(|id| Node::new(id as i64, Point::default(), Size::new(10.0, 10.0)))
                        .collect();
                    let edges = pairs
                        .into_iter()
                        .filter(|(s, t)| s < t)
                        .map(|(s, t)| Edge::new(s as i64, t as i64))
                        .collect();
                    LayoutGraph::from_parts(nodes, edges)
                },
            )
        })
    }

    /// On a DAG every edge points to a strictly deeper level.
    fn check_edges_point_to_deeper_levels(graph: LayoutGraph) -> Result<(), TestCaseError> {
        for members in detect_components(&graph) {
            let levels = compute_levels(&graph, &members);
            prop_assert_eq!(levels.len(), members.len());

            for edge in graph.inner().edge_references() {
                let (Some(&source), Some(&target)) =
                    (levels.get(&edge.source()), levels.get(&edge.target()))
                else {
                    continue;
                };
                prop_assert!(target > source, "{source} -> {target}");
            }
        }
        Ok(())
    }

    /// On a DAG a node's level is its longest incoming path.
    fn check_levels_are_longest_paths(graph: LayoutGraph) -> Result<(), TestCaseError> {
        // Edges run from lower to higher index, so index order is topological.
        let mut longest = vec![0usize; graph.node_count()];
        for idx in graph.node_indices() {
            for edge in graph.inner().edges(idx) {
                let target = edge.target().index();
                longest[target] = longest[target].max(longest[idx.index()] + 1);
            }
        }

        for members in detect_components(&graph) {
            let levels = compute_levels(&graph, &members);
            for idx in members {
                prop_assert_eq!(levels[&idx], longest[idx.index()]);
            }
        }
        Ok(())
    }

    /// Level-0 nodes have no incoming edge from within their component.
    fn check_level_zero_has_no_incoming(graph: LayoutGraph) -> Result<(), TestCaseError> {
        for members in detect_components(&graph) {
            let levels = compute_levels(&graph, &members);
            for (&idx, &level) in &levels {
                if level == 0 {
                    let incoming = graph
                        .inner()
                        .edges_directed(idx, petgraph::Direction::Incoming)
                        .count();
                    prop_assert_eq!(incoming, 0);
                }
            }
        }
        Ok(())
    }

    /// Condensed levels respect every edge that crosses two cycles.
    fn check_condensed_edges_never_point_up(graph: LayoutGraph) -> Result<(), TestCaseError> {
        for members in detect_components(&graph) {
            let levels = compute_condensed_levels(&graph, &members);
            prop_assert_eq!(levels.len(), members.len());
            for edge in graph.inner().edge_references() {
                if let (Some(&source), Some(&target)) =
                    (levels.get(&edge.source()), levels.get(&edge.target()))
                {
                    prop_assert!(target >= source);
                }
            }
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn edges_point_to_deeper_levels(graph in dag_strategy()) {
            check_edges_point_to_deeper_levels(graph)?;
        }

        #[test]
        fn levels_are_longest_paths(graph in dag_strategy()) {
            check_levels_are_longest_paths(graph)?;
        }

        #[test]
        fn level_zero_has_no_incoming(graph in graph_strategy()) {
            check_level_zero_has_no_incoming(graph)?;
        }

        #[test]
        fn condensed_edges_never_point_up(graph in graph_strategy()) {
            check_condensed_edges_never_point_up(graph)?;
        }
    }
}
