// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph-level data a node receives from the surface that contains it.

use egui::Rect;

/// What the containing graph exposes to its nodes
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GraphScope {
    /// Boundary dragged nodes are clamped to, in graph coordinates.
    /// `None` leaves dragging unconstrained.
    pub container: Option<Rect>,
}

impl GraphScope {
    /// Scope with no container boundary
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Scope that clamps dragging to `container`
    pub fn bounded(container: Rect) -> Self {
        Self {
            container: Some(container),
        }
    }
}
