//! Layered ("align") engine
//!
//! Nodes are arranged in columns by topological level, left to right. Within
//! a column, nodes keep the vertical order they had before layout, so
//! re-running the engine on its own output changes nothing.

use std::collections::BTreeMap;

use arrange_core::geometry::Point;

use crate::{
    config::LayeredConfig,
    layout::{
        ComponentPlan,
        engines::{self, Placement},
    },
    structure::{LayoutGraph, NodeIndex},
};

/// Layered layout engine implementation
pub(crate) struct Engine {
    config: LayeredConfig,
}

impl Engine {
    /// Create a new layered layout engine
    pub(crate) fn new(config: LayeredConfig) -> Self {
        Self { config }
    }

    /// Groups members by level, levels ascending, members in input order.
    fn levels(plan: &ComponentPlan) -> BTreeMap<usize, Vec<NodeIndex>> {
        let mut levels: BTreeMap<usize, Vec<NodeIndex>> = BTreeMap::new();
        for &idx in plan.members() {
            levels.entry(plan.level(idx)).or_default().push(idx);
        }
        levels
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
        let node_spacing = self.config.effective_node_spacing();
        let mut x = self.config.start().x();
        let mut end_y = origin_y;

        for (_, mut column) in Self::levels(plan) {
            // Stable: nodes at the same height keep input order.
            column.sort_by(|&a, &b| {
                let a = graph.node(a).position().y();
                let b = graph.node(b).position().y();
                a.total_cmp(&b)
            });

            let mut y = origin_y;
            let mut widest = 0.0f32;
            for idx in column {
                let size = graph.node(idx).size();
                placement.push((idx, Point::new(x, y)));

                end_y = end_y.max(y + size.height());
                widest = widest.max(size.width());
                y += size.height() + node_spacing;
            }

            x += widest + self.config.level_spacing();
        }

        end_y
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use float_cmp::assert_approx_eq;

    use arrange_core::{
        geometry::Size,
        graph::{Edge, Node},
        identifier::NodeId,
    };

    use super::*;
    use crate::{
        config::CyclePolicy,
        layout::{engines::Engine as _, plan},
    };

    fn place(graph: &LayoutGraph, config: LayeredConfig) -> HashMap<NodeId, Point> {
        let plans = plan(graph, CyclePolicy::Collapse);
        Engine::new(config)
            .place(graph, &plans)
            .into_iter()
            .map(|(idx, point)| (graph.node(idx).id().clone(), point))
            .collect()
    }

    fn at(positions: &HashMap<NodeId, Point>, id: impl Into<NodeId>) -> Point {
        let id: NodeId = id.into();
        positions[&id]
    }

    fn small_config() -> LayeredConfig {
        LayeredConfig::default()
            .with_start(Point::new(0.0, 0.0))
            .with_level_spacing(10.0)
            .with_node_spacing(5.0, 0.0)
            .with_component_spacing(100.0)
    }

    #[test]
    fn test_chain_advances_by_widest_node() {
        let graph = LayoutGraph::from_parts(
            vec![
                Node::new("a", Point::default(), Size::new(40.0, 20.0)),
                Node::new("b", Point::default(), Size::new(60.0, 20.0)),
                Node::new("c", Point::default(), Size::new(10.0, 20.0)),
            ],
            vec![Edge::new("a", "b"), Edge::new("b", "c")],
        );

        let positions = place(&graph, small_config());

        assert_approx_eq!(f32, at(&positions, "a").x(), 0.0);
        assert_approx_eq!(f32, at(&positions, "b").x(), 50.0);
        assert_approx_eq!(f32, at(&positions, "c").x(), 120.0);
        for id in ["a", "b", "c"] {
            assert_approx_eq!(f32, at(&positions, id).y(), 0.0);
        }
    }

    #[test]
    fn test_siblings_keep_previous_vertical_order() {
        // "low" sat above "high" before layout and must stay above it.
        let graph = LayoutGraph::from_parts(
            vec![
                Node::new("root", Point::new(0.0, 0.0), Size::new(10.0, 10.0)),
                Node::new("high", Point::new(0.0, 500.0), Size::new(10.0, 30.0)),
                Node::new("low", Point::new(0.0, 100.0), Size::new(10.0, 20.0)),
            ],
            vec![Edge::new("root", "high"), Edge::new("root", "low")],
        );

        let positions = place(&graph, small_config());

        assert_approx_eq!(f32, at(&positions, "low").y(), 0.0);
        assert_approx_eq!(f32, at(&positions, "high").y(), 25.0);
    }

    #[test]
    fn test_min_node_spacing_floor() {
        let graph = LayoutGraph::from_parts(
            vec![
                Node::new(0, Point::new(0.0, 0.0), Size::new(10.0, 10.0)),
                Node::new(1, Point::new(0.0, 0.0), Size::new(10.0, 10.0)),
                Node::new(2, Point::new(0.0, 1.0), Size::new(10.0, 10.0)),
            ],
            vec![Edge::new(0, 1), Edge::new(0, 2)],
        );
        let config = small_config().with_node_spacing(120.0, 150.0);

        let positions = place(&graph, config);

        assert_approx_eq!(f32, at(&positions, 1).y(), 0.0);
        assert_approx_eq!(f32, at(&positions, 2).y(), 160.0);
    }

    #[test]
    fn test_components_stack_with_spacing() {
        let graph = LayoutGraph::from_parts(
            vec![
                Node::new("solo", Point::default(), Size::new(10.0, 40.0)),
                Node::new("x", Point::default(), Size::new(10.0, 30.0)),
                Node::new("y", Point::default(), Size::new(10.0, 30.0)),
            ],
            vec![Edge::new("x", "y")],
        );

        let positions = place(&graph, small_config());

        // The two-node component is larger and goes first.
        assert_approx_eq!(f32, at(&positions, "x").y(), 0.0);
        assert_approx_eq!(f32, at(&positions, "solo").y(), 130.0);
        assert_approx_eq!(f32, at(&positions, "solo").x(), 0.0);
    }

    #[test]
    fn test_component_height_uses_tallest_level() {
        let graph = LayoutGraph::from_parts(
            vec![
                Node::new("root", Point::default(), Size::new(10.0, 10.0)),
                Node::new("left", Point::new(0.0, 0.0), Size::new(10.0, 50.0)),
                Node::new("right", Point::new(0.0, 1.0), Size::new(10.0, 50.0)),
                Node::new("other", Point::default(), Size::new(10.0, 10.0)),
            ],
            vec![Edge::new("root", "left"), Edge::new("root", "right")],
        );

        let positions = place(&graph, small_config());

        // Level 1 stacks 50 + 5 + 50.
        assert_approx_eq!(f32, at(&positions, "other").y(), 205.0);
    }
}
