//! Arrange - deterministic auto-layout for node-graph editors.
//!
//! Given a directed graph of visual nodes, Arrange computes non-overlapping
//! positions that reveal data flow. Two strategies are available:
//!
//! - [`LayoutMode::Align`]: connected groups stacked vertically, nodes in
//!   columns by topological level, rows by their previous vertical order.
//! - [`LayoutMode::Compact`]: connected groups stacked vertically, nodes
//!   packed into a fixed number of greedily filled columns.
//!
//! The engine reads and writes the graph through
//! [`GraphAdapter`](graph::GraphAdapter) and keeps no state between calls.

pub mod config;
pub mod layout;
pub mod structure;
pub mod workflow;

mod error;

pub use arrange_core::{geometry, graph, identifier};

pub use config::{CyclePolicy, LayoutMode};
pub use error::ArrangeError;

use log::{debug, info};

use config::AppConfig;
use graph::GraphAdapter;
use structure::LayoutGraph;

/// Summary of one arrangement, for logging and diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArrangeReport {
    nodes: usize,
    components: usize,
    depth: usize,
    dropped_edges: usize,
}

impl ArrangeReport {
    /// Number of nodes that received a new position.
    pub fn nodes(&self) -> usize {
        self.nodes
    }

    /// Number of weakly connected components.
    pub fn components(&self) -> usize {
        self.components
    }

    /// Deepest level over all components.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of edges ignored because an endpoint was unknown.
    pub fn dropped_edges(&self) -> usize {
        self.dropped_edges
    }

    /// Returns true if nothing was arranged.
    pub fn is_empty(&self) -> bool {
        self.nodes == 0
    }
}

/// Configurable entry point to the layout engine.
///
/// # Examples
///
/// ```rust
/// use arrange::{
///     Arranger, LayoutMode,
///     config::AppConfig,
///     geometry::{Point, Size},
///     graph::Graph,
/// };
///
/// let mut graph = Graph::new();
/// graph
///     .add_node("load", Point::new(0.0, 0.0), Size::new(200.0, 80.0))
///     .add_node("save", Point::new(0.0, 0.0), Size::new(200.0, 80.0))
///     .add_edge("load", "save");
///
/// let report = Arranger::new(AppConfig::default()).arrange(&mut graph, LayoutMode::Align);
/// assert_eq!(report.nodes(), 2);
///
/// let load = graph.node(&"load".into()).unwrap().position();
/// let save = graph.node(&"save".into()).unwrap().position();
/// assert!(load.x() < save.x());
/// ```
#[derive(Debug, Default)]
pub struct Arranger {
    config: AppConfig,
}

impl Arranger {
    /// Create a new arranger with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Arranges the graph with the configured default mode.
    pub fn arrange_default<A: GraphAdapter + ?Sized>(&self, adapter: &mut A) -> ArrangeReport {
        self.arrange(adapter, self.config.layout().mode())
    }

    /// Arranges the graph behind `adapter` using `mode`.
    ///
    /// Every node in the snapshot gets a new position, then the adapter is
    /// asked for one redraw. An empty graph is left alone entirely, redraw
    /// included.
    pub fn arrange<A: GraphAdapter + ?Sized>(
        &self,
        adapter: &mut A,
        mode: LayoutMode,
    ) -> ArrangeReport {
        let graph = LayoutGraph::from_adapter(adapter);
        if graph.is_empty() {
            debug!("Nothing to arrange");
            return ArrangeReport::default();
        }

        let plans = layout::plan(&graph, self.config.layout().cycle_policy());
        let engine = layout::engines::engine(mode, &self.config);
        let placement = engine.place(&graph, &plans);

        for (idx, position) in &placement {
            adapter.set_position(graph.node(*idx).id(), *position);
        }
        adapter.mark_dirty();

        let report = ArrangeReport {
            nodes: placement.len(),
            components: plans.len(),
            depth: plans.iter().map(|plan| plan.depth()).max().unwrap_or_default(),
            dropped_edges: graph.dropped_edges(),
        };
        info!(
            mode:% = mode,
            nodes = report.nodes,
            edges = graph.edge_count(),
            components = report.components,
            depth = report.depth;
            "Arranged graph"
        );

        report
    }
}

/// Arranges the graph in columns by topological level, with default spacing.
pub fn align_graph<A: GraphAdapter + ?Sized>(adapter: &mut A) {
    Arranger::default().arrange(adapter, LayoutMode::Align);
}

/// Arranges the graph into compact masonry columns, with default spacing.
pub fn align_graph_compact<A: GraphAdapter + ?Sized>(adapter: &mut A) {
    Arranger::default().arrange(adapter, LayoutMode::Compact);
}
