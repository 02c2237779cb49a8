//! Layout pipeline.
//!
//! A call flows through three stages:
//!
//! 1. [`detect_components`] splits the snapshot into weakly connected components.
//! 2. [`compute_levels`] (or [`compute_condensed_levels`]) assigns each node a
//!    topological level within its component.
//! 3. A placement engine turns the leveled components into positions.
//!
//! `plan` bundles the first two stages and fixes the order in which
//! components are drawn.

mod component;
pub(crate) mod engines;
mod leveling;

pub use component::detect_components;
pub use leveling::{LevelMap, compute_condensed_levels, compute_levels};

use log::trace;

use crate::{
    config::CyclePolicy,
    structure::{LayoutGraph, NodeIndex},
};

/// A leveled component, ready for placement.
#[derive(Debug)]
pub(crate) struct ComponentPlan {
    /// Position of the component's seed node among all seeds.
    index: usize,
    /// Members in input order.
    members: Vec<NodeIndex>,
    levels: LevelMap,
}

impl ComponentPlan {
    pub(crate) fn index(&self) -> usize {
        self.index
    }

    pub(crate) fn members(&self) -> &[NodeIndex] {
        &self.members
    }

    /// Level of a member; nodes outside the component report level 0.
    pub(crate) fn level(&self, idx: NodeIndex) -> usize {
        self.levels.get(&idx).copied().unwrap_or_default()
    }

    /// Deepest level in the component.
    pub(crate) fn depth(&self) -> usize {
        self.levels.values().copied().max().unwrap_or_default()
    }
}

/// Detects and levels components, largest first.
///
/// Components with more members come first; equal sizes keep detection order.
pub(crate) fn plan(graph: &LayoutGraph, cycle_policy: CyclePolicy) -> Vec<ComponentPlan> {
    let mut plans: Vec<ComponentPlan> = detect_components(graph)
        .into_iter()
        .enumerate()
        .map(|(index, members)| {
            let levels = match cycle_policy {
                CyclePolicy::Collapse => compute_levels(graph, &members),
                CyclePolicy::Condense => compute_condensed_levels(graph, &members),
            };
            ComponentPlan {
                index,
                members,
                levels,
            }
        })
        .collect();

    plans.sort_by(|a, b| {
        b.members
            .len()
            .cmp(&a.members.len())
            .then_with(|| a.index.cmp(&b.index))
    });

    for plan in &plans {
        trace!(
            component = plan.index,
            members = plan.members.len(),
            depth = plan.depth();
            "Planned component"
        );
    }

    plans
}
