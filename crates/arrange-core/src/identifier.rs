//! Node identifiers.
//!
//! This module provides the [`NodeId`] type. Node editors identify nodes
//! either by an integer (the common case) or by a string, so both forms are
//! accepted and ordered deterministically.

use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};

/// Stable identifier of a node within one graph snapshot.
///
/// Ordering is total and deterministic: numeric identifiers ascend
/// numerically and sort before named identifiers, which ascend
/// lexicographically.
///
/// # Examples
///
/// ```
/// use arrange_core::identifier::NodeId;
///
/// let mut ids = vec![NodeId::from("b"), NodeId::from(10), NodeId::from(2), NodeId::from("a")];
/// ids.sort();
/// assert_eq!(ids, vec![NodeId::from(2), NodeId::from(10), NodeId::from("a"), NodeId::from("b")]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeId {
    /// Integer identifier, as assigned by most node editors
    Number(i64),
    /// Free-form identifier
    Name(Arc<str>),
}

impl NodeId {
    /// Creates a named identifier.
    pub fn new(name: &str) -> Self {
        Self::Name(Arc::from(name))
    }
}

impl From<i64> for NodeId {
    fn from(id: i64) -> Self {
        Self::Number(id)
    }
}

impl From<i32> for NodeId {
    fn from(id: i32) -> Self {
        Self::Number(i64::from(id))
    }
}

impl From<&str> for NodeId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(id) => write!(f, "{id}"),
            Self::Name(name) => write!(f, "{name}"),
        }
    }
}
