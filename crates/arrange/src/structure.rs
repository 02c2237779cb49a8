//! Index-based snapshot of the graph being arranged.
//!
//! [`LayoutGraph`] is rebuilt from a [`GraphAdapter`] on every call. Nodes are
//! stored in adapter order, so a [`NodeIndex`] doubles as the node's position
//! in the input list. Edges whose endpoints do not resolve are dropped here,
//! which keeps every later stage free of lookups that can fail.

use std::collections::HashMap;

use log::{debug, warn};
use petgraph::graph::DiGraph;

pub use petgraph::graph::NodeIndex;

use arrange_core::{
    graph::{Edge, GraphAdapter, Node},
    identifier::NodeId,
};

/// Snapshot of a graph with dense node indices.
#[derive(Debug, Default)]
pub struct LayoutGraph {
    graph: DiGraph<Node, ()>,
    indices: HashMap<NodeId, NodeIndex>,
    dropped_edges: usize,
    duplicate_nodes: usize,
}

impl LayoutGraph {
    /// Takes a snapshot of the adapter's current nodes and edges.
    pub fn from_adapter<A: GraphAdapter + ?Sized>(adapter: &A) -> Self {
        Self::from_parts(adapter.nodes(), adapter.edges())
    }

    /// Builds a snapshot from explicit node and edge lists.
    ///
    /// The first node with a given id wins; later duplicates are skipped.
    /// Edges naming an unknown id are dropped.
    pub fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        let mut graph = DiGraph::with_capacity(nodes.len(), edges.len());
        let mut indices = HashMap::with_capacity(nodes.len());
        let mut duplicate_nodes = 0;

        for node in nodes {
            if indices.contains_key(node.id()) {
                warn!(id:% = node.id(); "Skipping node with duplicate id");
                duplicate_nodes += 1;
                continue;
            }
            let id = node.id().clone();
            let idx = graph.add_node(node);
            indices.insert(id, idx);
        }

        let mut dropped_edges = 0;
        for edge in &edges {
            match (indices.get(edge.source()), indices.get(edge.target())) {
                (Some(&source), Some(&target)) => {
                    graph.add_edge(source, target, ());
                }
                _ => {
                    debug!(source:% = edge.source(), target:% = edge.target(); "Dropping edge with unknown endpoint");
                    dropped_edges += 1;
                }
            }
        }

        Self {
            graph,
            indices,
            dropped_edges,
            duplicate_nodes,
        }
    }

    /// Returns true if the snapshot holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Returns the number of nodes in the snapshot.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges that survived endpoint resolution.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns the node stored at `idx`.
    ///
    /// # Panics
    /// Panics if `idx` does not belong to this snapshot.
    pub fn node(&self, idx: NodeIndex) -> &Node {
        &self.graph[idx]
    }

    /// Returns the index of the node with the given id.
    pub fn index_of(&self, id: &NodeId) -> Option<NodeIndex> {
        self.indices.get(id).copied()
    }

    /// Returns all node indices in input order.
    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    /// Returns how many input edges referenced an unknown node.
    pub fn dropped_edges(&self) -> usize {
        self.dropped_edges
    }

    /// Returns how many input nodes repeated an earlier id.
    pub fn duplicate_nodes(&self) -> usize {
        self.duplicate_nodes
    }

    pub(crate) fn inner(&self) -> &DiGraph<Node, ()> {
        &self.graph
    }
}
