//! Compact engine
//!
//! A masonry layout: a fixed number of evenly spaced columns, each node
//! dropped into whichever column is currently shortest. Levels only decide
//! the order in which nodes are dropped.
//!
//! Column stride comes from the average node width, so a node much wider
//! than the average can reach into the next column.

use arrange_core::geometry::Point;

use crate::{
    config::CompactConfig,
    layout::{
        ComponentPlan,
        engines::{self, Placement},
    },
    structure::LayoutGraph,
};

/// Compact layout engine implementation
pub(crate) struct Engine {
    config: CompactConfig,
}

impl Engine {
    /// Create a new compact layout engine
    pub(crate) fn new(config: CompactConfig) -> Self {
        Self { config }
    }

    /// X coordinate of each column's left edge.
    fn column_positions(&self, graph: &LayoutGraph, plan: &ComponentPlan) -> Vec<f32> {
        let members = plan.members();
        let total_width: f32 = members
            .iter()
            .map(|&idx| graph.node(idx).size().width())
            .sum();
        let average_width = if members.is_empty() {
            0.0
        } else {
            total_width / members.len() as f32
        };
        let stride = average_width + self.config.column_spacing();

        let start_x = self.config.start().x();
        (0..self.config.columns())
            .map(|column| start_x + column as f32 * stride)
            .collect()
    }
}

impl engines::Engine for Engine {
    fn start(&self) -> Point {
        self.config.start()
    }

    fn component_spacing(&self) -> f32 {
        self.config.component_spacing()
    }

    fn place_component(
        &self,
        graph: &LayoutGraph,
        plan: &ComponentPlan,
        origin_y: f32,
        placement: &mut Placement,
    ) -> f32 {
        let column_x = self.column_positions(graph, plan);
        let mut water_level = vec![origin_y; column_x.len()];

        let mut order = plan.members().to_vec();
        order.sort_by(|&a, &b| {
            plan.level(a)
                .cmp(&plan.level(b))
                .then_with(|| graph.node(a).id().cmp(graph.node(b).id()))
        });

        for idx in order {
            // `min_by` keeps the first of equal minima: leftmost column wins.
            let Some((column, y)) = water_level
                .iter()
                .copied()
                .enumerate()
                .min_by(|(_, a), (_, b)| a.total_cmp(b))
            else {
                break;
            };

            placement.push((idx, Point::new(column_x[column], y)));
            water_level[column] = y + graph.node(idx).size().height() + self.config.node_spacing();
        }

        water_level.into_iter().fold(origin_y, f32::max)
    }
}
