//! Serialized editor documents.
//!
//! Node editors persist graphs as JSON documents carrying far more than the
//! layout engine cares about: widget values, colors, groups, editor state.
//! [`Workflow`] exposes such a document through [`GraphAdapter`] and writes
//! new positions straight into it, so everything else survives untouched.
//!
//! # Document shape
//!
//! ```json
//! {
//!   "nodes": [
//!     { "id": 3, "pos": [100, 200], "size": [315, 262], "type": "KSampler" }
//!   ],
//!   "links": [
//!     [1, 4, 0, 3, 0, "MODEL"]
//!   ]
//! }
//! ```
//!
//! Links use the array form `[link_id, origin_id, origin_slot, target_id,
//! target_slot, type]` or the object form `{ "origin_id": .., "target_id": .. }`.
//! `pos` and `size` may also be objects keyed `"0"` and `"1"`.
//!
//! Nodes are matched strictly by id. A node entry without a usable id,
//! position or size is left out of the layout and keeps its old position.

use std::{collections::HashMap, str::FromStr};

use log::{debug, trace, warn};
use serde_json::{Map, Value};

use arrange_core::{
    geometry::{Point, Size},
    graph::{Edge, GraphAdapter, Node},
    identifier::NodeId,
};

use crate::error::ArrangeError;

/// A serialized editor document.
///
/// # Examples
///
/// ```
/// use arrange::{LayoutMode, workflow::Workflow, Arranger};
///
/// let mut workflow: Workflow = r#"{
///     "nodes": [
///         { "id": 1, "pos": [0, 0], "size": [100, 50], "title": "Load" },
///         { "id": 2, "pos": [0, 0], "size": [100, 50] }
///     ],
///     "links": [[1, 1, 0, 2, 0, "IMAGE"]]
/// }"#
/// .parse()
/// .unwrap();
///
/// Arranger::default().arrange(&mut workflow, LayoutMode::Align);
///
/// let json = workflow.to_string_pretty().unwrap();
/// assert!(json.contains("\"title\": \"Load\""));
/// ```
#[derive(Debug, Clone)]
pub struct Workflow {
    document: Value,
    /// Entry index of the first usable node for each id.
    entries: HashMap<NodeId, usize>,
    dirty: bool,
}

impl Workflow {
    /// Wraps a parsed document.
    ///
    /// # Errors
    ///
    /// Returns [`ArrangeError::Workflow`] if the document is not an object
    /// with a `nodes` array, or if `links` is present but not an array.
    pub fn from_value(document: Value) -> Result<Self, ArrangeError> {
        let Some(object) = document.as_object() else {
            return Err(ArrangeError::Workflow(
                "document must be a JSON object".to_string(),
            ));
        };
        if !object.get("nodes").is_some_and(Value::is_array) {
            return Err(ArrangeError::Workflow(
                "document has no `nodes` array".to_string(),
            ));
        }
        if object
            .get("links")
            .is_some_and(|links| !links.is_array() && !links.is_null())
        {
            return Err(ArrangeError::Workflow(
                "`links` must be an array".to_string(),
            ));
        }

        let entries = object
            .get("nodes")
            .and_then(Value::as_array)
            .map(|nodes| index_entries(nodes))
            .unwrap_or_default();

        Ok(Self {
            document,
            entries,
            dirty: false,
        })
    }

    /// Returns the underlying document.
    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Returns true if a redraw was requested since the document was loaded.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Serializes the document with two-space indentation.
    pub fn to_string_pretty(&self) -> Result<String, ArrangeError> {
        Ok(serde_json::to_string_pretty(&self.document)?)
    }

    fn node_entries(&self) -> &[Value] {
        self.document
            .get("nodes")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn link_entries(&self) -> &[Value] {
        self.document
            .get("links")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

impl FromStr for Workflow {
    type Err = ArrangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let document =
            serde_json::from_str(s).map_err(|err| ArrangeError::new_parse_error(err, s))?;
        Self::from_value(document)
    }
}

impl GraphAdapter for Workflow {
    fn nodes(&self) -> Vec<Node> {
        self.node_entries()
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                let node = parse_node(entry);
                if node.is_none() {
                    warn!(index; "Skipping node entry without usable id, pos or size");
                }
                node
            })
            .collect()
    }

    fn edges(&self) -> Vec<Edge> {
        self.link_entries()
            .iter()
            .filter(|entry| !entry.is_null())
            .filter_map(|entry| {
                let edge = parse_link(entry);
                if edge.is_none() {
                    debug!(link:% = entry; "Skipping malformed link");
                }
                edge
            })
            .collect()
    }

    fn set_position(&mut self, id: &NodeId, position: Point) {
        let Some(&index) = self.entries.get(id) else {
            trace!(id:% = id; "Ignoring position for unknown node");
            return;
        };
        let Some(object) = self
            .document
            .get_mut("nodes")
            .and_then(Value::as_array_mut)
            .and_then(|nodes| nodes.get_mut(index))
            .and_then(Value::as_object_mut)
        else {
            return;
        };

        let x = f64::from(position.x());
        let y = f64::from(position.y());
        match object.get_mut("pos") {
            Some(Value::Object(pos)) => {
                pos.insert("0".to_string(), Value::from(x));
                pos.insert("1".to_string(), Value::from(y));
            }
            _ => {
                object.insert("pos".to_string(), Value::from(vec![x, y]));
            }
        }
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

/// Maps each id to its first entry that [`parse_node`] accepts, matching the
/// first-wins rule applied to the node snapshot.
fn index_entries(nodes: &[Value]) -> HashMap<NodeId, usize> {
    let mut entries = HashMap::with_capacity(nodes.len());
    for (index, entry) in nodes.iter().enumerate() {
        if let Some(node) = parse_node(entry) {
            entries.entry(node.id().clone()).or_insert(index);
        }
    }
    entries
}

fn parse_id(value: &Value) -> Option<NodeId> {
    match value {
        Value::Number(number) => number.as_i64().map(NodeId::from),
        Value::String(name) => Some(NodeId::new(name)),
        _ => None,
    }
}

/// Reads `[a, b]` or `{ "0": a, "1": b }`.
fn parse_pair(value: &Value) -> Option<[f32; 2]> {
    let (first, second) = match value {
        Value::Array(items) if items.len() >= 2 => (&items[0], &items[1]),
        Value::Object(map) => (map.get("0")?, map.get("1")?),
        _ => return None,
    };
    let first = first.as_f64()? as f32;
    let second = second.as_f64()? as f32;
    (first.is_finite() && second.is_finite()).then_some([first, second])
}

fn parse_node(entry: &Value) -> Option<Node> {
    let object = entry.as_object()?;
    let id = parse_id(object.get("id")?)?;
    let position = Point::from(parse_pair(object.get("pos")?)?);
    let size = Size::from(parse_pair(object.get("size")?)?);
    Some(Node::new(id, position, size))
}

fn parse_link(entry: &Value) -> Option<Edge> {
    match entry {
        Value::Array(items) if items.len() >= 4 => {
            Some(Edge::new(parse_id(&items[1])?, parse_id(&items[3])?))
        }
        Value::Object(map) => parse_object_link(map),
        _ => None,
    }
}

fn parse_object_link(map: &Map<String, Value>) -> Option<Edge> {
    Some(Edge::new(
        parse_id(map.get("origin_id")?)?,
        parse_id(map.get("target_id")?)?,
    ))
}
