// SPDX-License-Identifier: MIT OR Apache-2.0
//! Inputs a node accepts from its host and notifications it sends its owner.

use crate::bounding::{BoundingRect, LayoutCause};
use egui::Pos2;
use serde::{Deserialize, Serialize};

/// Identifies one pointer (mouse, or one finger of a touch)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PointerId(pub u64);

/// Pointer device kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerKind {
    /// Mouse or trackpad
    Mouse,
    /// Touch screen contact
    Touch,
    /// Stylus
    Pen,
}

/// Pointer button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerButton {
    /// Left mouse button, touch contact, pen tip
    Primary,
    /// Right mouse button
    Secondary,
    /// Middle mouse button
    Middle,
}

/// A pointer press, in graph coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPress {
    /// Pointer that pressed
    pub pointer: PointerId,
    /// Press location
    pub pos: Pos2,
    /// Device kind
    pub kind: PointerKind,
    /// Button pressed
    pub button: PointerButton,
}

impl PointerPress {
    /// Primary mouse press at `pos`
    pub fn mouse(pos: Pos2) -> Self {
        Self {
            pointer: PointerId::default(),
            pos,
            kind: PointerKind::Mouse,
            button: PointerButton::Primary,
        }
    }
}

/// Raw input dispatched to a node by its host, in arrival order
#[derive(Debug, Clone, PartialEq)]
pub enum NodeInput {
    /// Pointer pressed somewhere over the node
    PointerDown(PointerPress),
    /// Pointer moved
    PointerMove {
        /// Pointer that moved
        pointer: PointerId,
        /// New location
        pos: Pos2,
    },
    /// Pointer released
    PointerUp {
        /// Pointer that was released
        pointer: PointerId,
    },
    /// Pointer entered the node's region
    PointerEnter,
    /// Pointer left the node's region
    PointerLeave,
    /// Latest pointer location (or none if it left the surface); hover is
    /// derived from the node's measured box
    PointerHover(Option<Pos2>),
    /// Focus moved into the handle subtree
    FocusIn,
    /// Focus left the handle subtree
    FocusOut,
    /// Host re-measured the handle region, in graph coordinates. `None`
    /// means the handle is not mounted and dragging is inert.
    HandleLayout(Option<BoundingRect>),
    /// Host re-measured the root element
    Layout {
        /// What triggered the measurement
        cause: LayoutCause,
        /// New box
        rect: BoundingRect,
    },
}

/// Notification for the node's owner
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeEvent {
    /// Position changed; the owner should store it as the node's position
    PositionChanged(Pos2),
    /// Selection changed
    SelectionChanged(bool),
    /// Focus entered the handle
    Focus,
    /// Focus left the handle
    Blur,
    /// Pointer entered the node
    MouseEnter,
    /// Pointer left the node
    MouseLeave,
    /// A drag session started at this position
    DragStarted(Pos2),
    /// The drag session ended at this position
    DragEnded(Pos2),
}
