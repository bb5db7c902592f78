// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node identity.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier of a node within its parent graph scope.
///
/// Graphs key nodes either by name or by number, so both forms are accepted
/// and compare unequal to each other (`Text("1") != Number(1)`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeId {
    /// Numeric id
    Number(i64),
    /// Textual id
    Text(String),
}

impl NodeId {
    /// Create a new random textual id
    pub fn generate() -> Self {
        Self::Text(Uuid::new_v4().to_string())
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for NodeId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for NodeId {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}
