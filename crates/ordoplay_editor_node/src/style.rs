// SPDX-License-Identifier: MIT OR Apache-2.0
//! Render description of a node: root tag, inline style, handle and port slot.

use crate::context::NodeContext;
use egui::Pos2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default root element tag
pub const DEFAULT_TAG: &str = "div";

/// Tag name of the node's root element
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementTag(String);

impl ElementTag {
    /// Tag name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ElementTag {
    fn default() -> Self {
        Self(DEFAULT_TAG.to_owned())
    }
}

impl From<&str> for ElementTag {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for ElementTag {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for ElementTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Inline style of the root element.
///
/// Positioning and cursor are fixed; offsets and z-index follow the node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeStyle {
    /// Left offset in pixels
    pub left: f32,
    /// Top offset in pixels
    pub top: f32,
    /// Display z-index
    pub z_index: i32,
}

impl NodeStyle {
    /// CSS `position` value
    pub const POSITION: &'static str = "absolute";
    /// CSS `cursor` value
    pub const CURSOR: &'static str = "grab";

    /// Style for a node at `pos` with the given display z-index
    pub fn new(pos: Pos2, z_index: i32) -> Self {
        Self {
            left: pos.x,
            top: pos.y,
            z_index,
        }
    }

    /// Inline CSS declaration list
    pub fn to_css(&self) -> String {
        format!(
            "position: {}; cursor: {}; left: {}px; top: {}px; z-index: {}",
            Self::POSITION,
            Self::CURSOR,
            self.left,
            self.top,
            self.z_index
        )
    }
}

/// Parameters handed to the port slot
#[derive(Debug, Clone)]
pub struct PortSlot {
    /// Z-index ports should render at
    pub z_index: i32,
    /// Live context of the owning node
    pub context: NodeContext,
}

/// Rendered node tree.
///
/// `C` is the primary content wrapped by the handle, `P` the port content.
#[derive(Debug, Clone)]
pub struct NodeView<C, P> {
    /// Root element tag
    pub tag: ElementTag,
    /// Root element inline style
    pub style: NodeStyle,
    /// Tab index of the focusable handle
    pub handle_tabindex: i32,
    /// Content inside the handle
    pub content: C,
    /// Port slot output, if a port slot was rendered
    pub ports: Option<P>,
}

impl<C: fmt::Display, P: fmt::Display> NodeView<C, P> {
    /// Serialize the tree as markup
    pub fn to_html(&self) -> String {
        let ports = self
            .ports
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        format!(
            "<{tag} style=\"{style}\"><div tabindex=\"{tabindex}\">{content}</div>{ports}</{tag}>",
            tag = self.tag,
            style = self.style.to_css(),
            tabindex = self.handle_tabindex,
            content = self.content,
        )
    }
}
