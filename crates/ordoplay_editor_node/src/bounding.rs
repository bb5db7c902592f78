// SPDX-License-Identifier: MIT OR Apache-2.0
//! Rendered-box measurement for a node.
//!
//! The host layout system pushes measurements in; nothing here polls.

use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Snapshot of a rendered box
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingRect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl BoundingRect {
    /// Create a bounding rect
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Top-left corner
    pub fn origin(&self) -> Pos2 {
        Pos2::new(self.x, self.y)
    }

    /// Width and height
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Convert to an egui rect
    pub fn to_rect(&self) -> Rect {
        Rect::from_min_size(self.origin(), self.size())
    }

    /// Whether a point lies inside the box (edges inclusive)
    pub fn contains(&self, pos: Pos2) -> bool {
        self.to_rect().contains(pos)
    }
}

impl From<Rect> for BoundingRect {
    fn from(rect: Rect) -> Self {
        Self::new(rect.min.x, rect.min.y, rect.width(), rect.height())
    }
}

/// Why the host re-measured the element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutCause {
    /// First measurement after mount
    Mount,
    /// Element or ancestor resized
    Resize,
    /// Ancestor scrolled
    Scroll,
    /// Content changed
    Mutation,
}

/// Tracks the last reported box of the node's root element
#[derive(Debug, Clone, Default)]
pub struct BoundingTracker {
    rect: BoundingRect,
    measured: bool,
}

impl BoundingTracker {
    /// Create a tracker with no measurement yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new measurement. Returns `true` if the box changed.
    pub fn observe(&mut self, cause: LayoutCause, rect: impl Into<BoundingRect>) -> bool {
        let rect = rect.into();
        let changed = !self.measured || rect != self.rect;
        self.measured = true;
        if changed {
            tracing::trace!(?cause, ?rect, "node box measured");
            self.rect = rect;
        }
        changed
    }

    /// Last measured box, zero until the first measurement
    pub fn rect(&self) -> BoundingRect {
        self.rect
    }

    /// Last measured size, zero until the first measurement
    pub fn size(&self) -> Vec2 {
        self.rect.size()
    }

    /// Whether a measurement has been recorded
    pub fn is_measured(&self) -> bool {
        self.measured
    }
}
