//! Placement engines.
//!
//! Each [`LayoutMode`] has one engine. Engines share the outer loop, stacking
//! components top to bottom in plan order, and differ in how a single
//! component is laid out below its vertical origin.

mod compact;
mod layered;

use log::debug;

use arrange_core::geometry::Point;

use crate::{
    config::{AppConfig, LayoutMode},
    layout::ComponentPlan,
    structure::{LayoutGraph, NodeIndex},
};

/// New top-left positions in placement order.
pub(crate) type Placement = Vec<(NodeIndex, Point)>;

/// Interface shared by the placement engines.
pub(crate) trait Engine {
    /// Top-left corner of the first component.
    fn start(&self) -> Point;

    /// Vertical gap between one component's end and the next one's origin.
    fn component_spacing(&self) -> f32;

    /// Places one component with its top at `origin_y`.
    ///
    /// Returns the y coordinate at which the component ends.
    fn place_component(
        &self,
        graph: &LayoutGraph,
        plan: &ComponentPlan,
        origin_y: f32,
        placement: &mut Placement,
    ) -> f32;

    /// Places every component, stacking them vertically in plan order.
    fn place(&self, graph: &LayoutGraph, plans: &[ComponentPlan]) -> Placement {
        let mut placement = Placement::with_capacity(graph.node_count());
        let mut cursor_y = self.start().y();

        for plan in plans {
            let end_y = self.place_component(graph, plan, cursor_y, &mut placement);
            debug!(
                component = plan.index(),
                origin_y = cursor_y,
                end_y = end_y;
                "Placed component"
            );
            cursor_y = end_y + self.component_spacing();
        }

        placement
    }
}

/// Returns the engine for `mode`, configured from `config`.
pub(crate) fn engine(mode: LayoutMode, config: &AppConfig) -> Box<dyn Engine> {
    match mode {
        LayoutMode::Align => Box::new(layered::Engine::new(config.layered().clone())),
        LayoutMode::Compact => Box::new(compact::Engine::new(config.compact().clone())),
    }
}
