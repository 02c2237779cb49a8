//! Graph data model and the adapter seam.
//!
//! The layout engine never owns the graph it arranges. It reads a snapshot of
//! nodes and edges through [`GraphAdapter`], computes positions, and writes
//! them back one node at a time. [`Graph`] is the in-memory implementation
//! used by tests, examples and simple embedders.

use std::collections::HashMap;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::{
    geometry::{Point, Size},
    identifier::NodeId,
};

/// A visual node as seen by the layout engine.
///
/// `position` is the top-left corner. The engine only ever replaces the
/// position; `size` is read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    id: NodeId,
    #[serde(rename = "pos")]
    position: Point,
    size: Size,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, position: Point, size: Size) -> Self {
        Self {
            id: id.into(),
            position,
            size,
        }
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }
}

/// A directed connection between two nodes.
///
/// Edges may form cycles, loop back onto their source, or duplicate one
/// another.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    source: NodeId,
    target: NodeId,
}

impl Edge {
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    pub fn source(&self) -> &NodeId {
        &self.source
    }

    pub fn target(&self) -> &NodeId {
        &self.target
    }
}

/// Access to a live graph owned by the surrounding editor.
///
/// Implementations hand out fresh snapshots on every call; the engine keeps
/// nothing between invocations.
pub trait GraphAdapter {
    /// Returns the current nodes in a stable order.
    ///
    /// The order is observable: it decides component numbering and breaks
    /// ties during placement.
    fn nodes(&self) -> Vec<Node>;

    /// Returns the current edges as `(source, target)` pairs.
    fn edges(&self) -> Vec<Edge>;

    /// Moves the node with the given id so that its top-left corner is at `position`.
    fn set_position(&mut self, id: &NodeId, position: Point);

    /// Requests a redraw once all positions have been written.
    fn mark_dirty(&mut self) {}
}

/// An in-memory graph.
///
/// # Examples
///
/// ```
/// use arrange_core::{
///     geometry::{Point, Size},
///     graph::{Graph, GraphAdapter},
/// };
///
/// let mut graph = Graph::new();
/// graph
///     .add_node(1, Point::new(0.0, 0.0), Size::new(100.0, 50.0))
///     .add_node(2, Point::new(0.0, 0.0), Size::new(100.0, 50.0))
///     .add_edge(1, 2);
///
/// graph.set_position(&2.into(), Point::new(300.0, 0.0));
/// assert_eq!(graph.node(&2.into()).unwrap().position(), Point::new(300.0, 0.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "GraphData")]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    /// First node for each id.
    #[serde(skip)]
    index: HashMap<NodeId, usize>,
    #[serde(skip)]
    dirty: bool,
}

#[derive(Deserialize)]
struct GraphData {
    #[serde(default)]
    nodes: Vec<Node>,
    #[serde(default)]
    edges: Vec<Edge>,
}

impl From<GraphData> for Graph {
    fn from(data: GraphData) -> Self {
        let mut graph = Self {
            edges: data.edges,
            ..Self::default()
        };
        for node in data.nodes {
            graph.push_node(node);
        }
        graph
    }
}

impl Graph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a node.
    pub fn add_node(&mut self, id: impl Into<NodeId>, position: Point, size: Size) -> &mut Self {
        self.push_node(Node::new(id, position, size));
        self
    }

    /// Appends a directed edge. Endpoints are not validated.
    pub fn add_edge(&mut self, source: impl Into<NodeId>, target: impl Into<NodeId>) -> &mut Self {
        self.edges.push(Edge::new(source, target));
        self
    }

    /// Returns the first node with the given id.
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    /// Returns all nodes in insertion order.
    pub fn node_list(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns all edges in insertion order.
    pub fn edge_list(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns true if a redraw was requested since the last [`Graph::take_dirty`].
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns and clears the redraw request flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn push_node(&mut self, node: Node) {
        self.index.entry(node.id.clone()).or_insert(self.nodes.len());
        self.nodes.push(node);
    }
}

impl GraphAdapter for Graph {
    fn nodes(&self) -> Vec<Node> {
        self.nodes.clone()
    }

    fn edges(&self) -> Vec<Edge> {
        self.edges.clone()
    }

    fn set_position(&mut self, id: &NodeId, position: Point) {
        match self.index.get(id) {
            Some(&i) => self.nodes[i].position = position,
            None => trace!(id:% = id; "Ignoring position for unknown node"),
        }
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
