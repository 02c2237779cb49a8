//! Configuration types for graph arrangement.
//!
//! This module provides configuration structures that control which layout
//! strategy runs and how far apart it places things. All types implement
//! [`serde::Deserialize`] with every field defaulted, so a partial TOML file
//! only overrides what it names.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`LayoutConfig`] - Default [`LayoutMode`] and the [`CyclePolicy`].
//! - [`LayeredConfig`] - Spacing for the layered ("align") strategy.
//! - [`CompactConfig`] - Spacing and column count for the compact strategy.
//!
//! # Example
//!
//! ```
//! # use arrange::config::{AppConfig, LayoutMode};
//! let config = AppConfig::default();
//! assert_eq!(config.layout().mode(), LayoutMode::Align);
//! assert_eq!(config.compact().columns(), 6);
//! ```

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use arrange_core::geometry::Point;

/// The layout strategy to apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Columns by topological level, rows by previous vertical order (default)
    #[default]
    Align,
    /// Fixed number of greedily filled columns
    Compact,
}

impl FromStr for LayoutMode {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "align" => Ok(Self::Align),
            "compact" => Ok(Self::Compact),
            _ => Err("Unsupported layout mode"),
        }
    }
}

impl From<LayoutMode> for &'static str {
    fn from(val: LayoutMode) -> Self {
        match val {
            LayoutMode::Align => "align",
            LayoutMode::Compact => "compact",
        }
    }
}

impl Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// How nodes that cannot be leveled topologically are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CyclePolicy {
    /// Every node left over after topological leveling shares one level,
    /// one past the deepest leveled node (default)
    #[default]
    Collapse,
    /// Strongly connected components are contracted first, so each cycle
    /// keeps its depth relative to the rest of the graph
    Condense,
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Mode and leveling section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Layered strategy section.
    #[serde(default)]
    layered: LayeredConfig,

    /// Compact strategy section.
    #[serde(default)]
    compact: CompactConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(layout: LayoutConfig, layered: LayeredConfig, compact: CompactConfig) -> Self {
        Self {
            layout,
            layered,
            compact,
        }
    }

    /// Returns the layout section.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the layered strategy section.
    pub fn layered(&self) -> &LayeredConfig {
        &self.layered
    }

    /// Returns the compact strategy section.
    pub fn compact(&self) -> &CompactConfig {
        &self.compact
    }
}

/// Mode selection and leveling behavior.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct LayoutConfig {
    /// Mode used when the caller does not choose one.
    #[serde(default)]
    mode: LayoutMode,

    /// Handling of cyclic nodes during leveling.
    #[serde(default)]
    cycle_policy: CyclePolicy,
}

impl LayoutConfig {
    /// Creates a new [`LayoutConfig`].
    pub fn new(mode: LayoutMode, cycle_policy: CyclePolicy) -> Self {
        Self { mode, cycle_policy }
    }

    /// Returns the default [`LayoutMode`].
    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    /// Returns the [`CyclePolicy`].
    pub fn cycle_policy(&self) -> CyclePolicy {
        self.cycle_policy
    }
}

/// Spacing for the layered strategy.
///
/// Defaults: levels 250 apart, siblings 120 apart with a 150 floor,
/// components 400 apart, origin at (100, 100).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayeredConfig {
    start: Point,
    level_spacing: f32,
    node_spacing: f32,
    min_node_spacing: f32,
    component_spacing: f32,
}

impl Default for LayeredConfig {
    fn default() -> Self {
        Self {
            start: Point::new(100.0, 100.0),
            level_spacing: 250.0,
            node_spacing: 120.0,
            min_node_spacing: 150.0,
            component_spacing: 400.0,
        }
    }
}

impl LayeredConfig {
    /// Top-left corner of the first component.
    pub fn start(&self) -> Point {
        self.start
    }

    /// Horizontal gap between the widest node of a level and the next level.
    pub fn level_spacing(&self) -> f32 {
        self.level_spacing
    }

    /// Vertical gap between siblings in a level, after the floor is applied.
    pub fn effective_node_spacing(&self) -> f32 {
        self.node_spacing.max(self.min_node_spacing)
    }

    /// Vertical gap between stacked components.
    pub fn component_spacing(&self) -> f32 {
        self.component_spacing
    }

    pub fn with_start(mut self, start: Point) -> Self {
        self.start = start;
        self
    }

    pub fn with_level_spacing(mut self, spacing: f32) -> Self {
        self.level_spacing = spacing;
        self
    }

    /// Sets the requested sibling gap and its floor.
    pub fn with_node_spacing(mut self, spacing: f32, min_spacing: f32) -> Self {
        self.node_spacing = spacing;
        self.min_node_spacing = min_spacing;
        self
    }

    pub fn with_component_spacing(mut self, spacing: f32) -> Self {
        self.component_spacing = spacing;
        self
    }
}

/// Spacing and column count for the compact strategy.
///
/// Defaults: 6 columns 50 apart, siblings 30 apart, components 50 apart,
/// origin at (100, 100).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CompactConfig {
    start: Point,
    columns: usize,
    column_spacing: f32,
    node_spacing: f32,
    component_spacing: f32,
}

impl Default for CompactConfig {
    fn default() -> Self {
        Self {
            start: Point::new(100.0, 100.0),
            columns: 6,
            column_spacing: 50.0,
            node_spacing: 30.0,
            component_spacing: 50.0,
        }
    }
}

impl CompactConfig {
    /// Top-left corner of the first component.
    pub fn start(&self) -> Point {
        self.start
    }

    /// Number of columns; never less than one.
    pub fn columns(&self) -> usize {
        self.columns.max(1)
    }

    /// Gap added to the average node width to get the column stride.
    pub fn column_spacing(&self) -> f32 {
        self.column_spacing
    }

    /// Vertical gap between nodes stacked in one column.
    pub fn node_spacing(&self) -> f32 {
        self.node_spacing
    }

    /// Vertical gap between stacked components.
    pub fn component_spacing(&self) -> f32 {
        self.component_spacing
    }

    pub fn with_start(mut self, start: Point) -> Self {
        self.start = start;
        self
    }

    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_column_spacing(mut self, spacing: f32) -> Self {
        self.column_spacing = spacing;
        self
    }

    pub fn with_node_spacing(mut self, spacing: f32) -> Self {
        self.node_spacing = spacing;
        self
    }

    pub fn with_component_spacing(mut self, spacing: f32) -> Self {
        self.component_spacing = spacing;
        self
    }
}
