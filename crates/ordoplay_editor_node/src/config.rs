// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node props and drag options.
//!
//! Props can be built in code or loaded from RON text, e.g.
//!
//! ```ron
//! (
//!     id: "multiply",
//!     x: 120.0,
//!     y: 40.0,
//!     z_index: 2,
//!     drag: (axis: X),
//! )
//! ```
//!
//! Every field except `id` has a default.

use crate::error::{NodeError, Result};
use crate::event::{PointerButton, PointerKind};
use crate::id::NodeId;
use crate::style::ElementTag;
use egui::Pos2;
use serde::{Deserialize, Serialize};

/// Which coordinates a drag may change
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragAxis {
    /// Free movement
    #[default]
    Both,
    /// Horizontal only
    X,
    /// Vertical only
    Y,
}

/// How a container boundary constrains a dragged node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Containment {
    /// Keep the node's top-left reference point inside the container
    #[default]
    Point,
    /// Keep the node's whole measured box inside the container
    Bounds,
}

/// Drag behavior options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragOptions {
    /// Axis constraint
    pub axis: DragAxis,
    /// Devices allowed to start a drag
    pub pointer_kinds: Vec<PointerKind>,
    /// Buttons allowed to start a drag
    pub buttons: Vec<PointerButton>,
    /// Container clamping mode
    pub containment: Containment,
}

impl Default for DragOptions {
    fn default() -> Self {
        Self {
            axis: DragAxis::Both,
            pointer_kinds: vec![PointerKind::Mouse, PointerKind::Touch, PointerKind::Pen],
            buttons: vec![PointerButton::Primary],
            containment: Containment::Point,
        }
    }
}

impl DragOptions {
    /// Restrict movement to one axis
    pub fn with_axis(mut self, axis: DragAxis) -> Self {
        self.axis = axis;
        self
    }

    /// Set the container clamping mode
    pub fn with_containment(mut self, containment: Containment) -> Self {
        self.containment = containment;
        self
    }

    /// Set which devices may start a drag
    pub fn with_pointer_kinds(mut self, kinds: impl IntoIterator<Item = PointerKind>) -> Self {
        self.pointer_kinds = kinds.into_iter().collect();
        self
    }

    /// Set which buttons may start a drag
    pub fn with_buttons(mut self, buttons: impl IntoIterator<Item = PointerButton>) -> Self {
        self.buttons = buttons.into_iter().collect();
        self
    }
}

fn default_draggable() -> bool {
    true
}

/// Props a node is created with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeProps {
    /// Identity within the parent graph scope
    pub id: NodeId,
    /// Enclosing node, for nested graphs
    #[serde(default)]
    pub parent: Option<NodeId>,
    /// Root element tag
    #[serde(default, rename = "as")]
    pub tag: ElementTag,
    /// Initial x position
    #[serde(default)]
    pub x: f32,
    /// Initial y position
    #[serde(default)]
    pub y: f32,
    /// Base layering priority
    #[serde(default)]
    pub z_index: i32,
    /// Whether the node can be dragged
    #[serde(default = "default_draggable")]
    pub draggable: bool,
    /// Initial selection state
    #[serde(default)]
    pub is_selected: bool,
    /// Drag behavior
    #[serde(default)]
    pub drag: DragOptions,
}

impl NodeProps {
    /// Props with every optional field at its default
    pub fn new(id: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            parent: None,
            tag: ElementTag::default(),
            x: 0.0,
            y: 0.0,
            z_index: 0,
            draggable: true,
            is_selected: false,
            drag: DragOptions::default(),
        }
    }

    /// Load props from RON text
    pub fn from_ron(text: &str) -> Result<Self> {
        let props: Self = ron::from_str(text)?;
        props.validate()?;
        Ok(props)
    }

    /// Check the props describe a usable node
    pub fn validate(&self) -> Result<()> {
        check_finite(self.position())?;
        if self.tag.as_str().is_empty() {
            return Err(NodeError::EmptyTag);
        }
        Ok(())
    }

    /// Initial position
    pub fn position(&self) -> Pos2 {
        Pos2::new(self.x, self.y)
    }

    /// Set the initial position
    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Set the enclosing node
    pub fn with_parent(mut self, parent: impl Into<NodeId>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Set the root element tag
    pub fn with_tag(mut self, tag: impl Into<ElementTag>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Set the base layering priority
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Enable or disable dragging
    pub fn draggable(mut self, draggable: bool) -> Self {
        self.draggable = draggable;
        self
    }

    /// Set the initial selection state
    pub fn selected(mut self, is_selected: bool) -> Self {
        self.is_selected = is_selected;
        self
    }

    /// Set the drag options
    pub fn with_drag(mut self, drag: DragOptions) -> Self {
        self.drag = drag;
        self
    }
}

pub(crate) fn check_finite(pos: Pos2) -> Result<()> {
    if pos.x.is_finite() && pos.y.is_finite() {
        Ok(())
    } else {
        Err(NodeError::NonFinitePosition { x: pos.x, y: pos.y })
    }
}
