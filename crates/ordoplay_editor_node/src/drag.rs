// SPDX-License-Identifier: MIT OR Apache-2.0
//! Pointer-drag engine.
//!
//! Turns a press-move-release sequence into absolute node positions. A
//! session starts only on a press inside the handle region and always takes
//! its origin from the node's current position, so separate drags never
//! accumulate drift. Every accepted move yields a position; release yields
//! nothing new.

use crate::config::{Containment, DragAxis, DragOptions};
use crate::event::{PointerId, PointerPress};
use egui::{Pos2, Rect, Vec2};

/// State of one press-to-release interaction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Pointer that owns the session
    pub pointer: PointerId,
    /// Where the press landed
    pub press: Pos2,
    /// Node position when the press landed
    pub origin: Pos2,
    /// Last accepted position
    pub current: Pos2,
}

/// Drag engine for one node
#[derive(Debug, Clone, Default)]
pub struct DragEngine {
    options: DragOptions,
    /// Handle region relative to the node's top-left corner
    handle: Option<Rect>,
    container: Option<Rect>,
    session: Option<DragSession>,
}

impl DragEngine {
    /// Create an engine with no handle and no container
    pub fn new(options: DragOptions) -> Self {
        Self {
            options,
            handle: None,
            container: None,
            session: None,
        }
    }

    /// Drag options
    pub fn options(&self) -> &DragOptions {
        &self.options
    }

    /// Set the handle region, relative to the node's top-left corner.
    /// Without a handle no drag can start.
    pub fn set_handle(&mut self, handle: Option<Rect>) {
        self.handle = handle;
    }

    /// Handle region, relative to the node's top-left corner
    pub fn handle(&self) -> Option<Rect> {
        self.handle
    }

    /// Set the container boundary. Without one positions are not clamped.
    pub fn set_container(&mut self, container: Option<Rect>) {
        self.container = container;
    }

    /// Container boundary
    pub fn container(&self) -> Option<Rect> {
        self.container
    }

    /// Active session, if any
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Whether a session is active
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Try to start a session for a press while the node sits at `position`.
    /// Returns `true` if a session started.
    pub fn press(&mut self, press: &PointerPress, position: Pos2) -> bool {
        if self.session.is_some() {
            return false;
        }
        if !self.options.pointer_kinds.contains(&press.kind)
            || !self.options.buttons.contains(&press.button)
        {
            return false;
        }
        let Some(handle) = self.handle else {
            tracing::trace!("press ignored: node has no drag handle");
            return false;
        };
        if !handle.translate(position.to_vec2()).contains(press.pos) {
            return false;
        }

        self.session = Some(DragSession {
            pointer: press.pointer,
            press: press.pos,
            origin: position,
            current: position,
        });
        true
    }

    /// Move the session's pointer to `pos`. `size` is the node's measured
    /// size, used for [`Containment::Bounds`]. Returns the new position if
    /// the move belongs to the active session.
    pub fn drag_to(&mut self, pointer: PointerId, pos: Pos2, size: Vec2) -> Option<Pos2> {
        let options = &self.options;
        let container = self.container;
        let session = self.session.as_mut().filter(|s| s.pointer == pointer)?;

        let mut delta = pos - session.press;
        match options.axis {
            DragAxis::Both => {}
            DragAxis::X => delta.y = 0.0,
            DragAxis::Y => delta.x = 0.0,
        }

        let mut target = session.origin + delta;
        if let Some(container) = container {
            target = clamp_to(target, container, size, options.containment);
        }

        session.current = target;
        Some(target)
    }

    /// Release the session's pointer. Returns the final position if the
    /// release ended a session.
    pub fn release(&mut self, pointer: PointerId) -> Option<Pos2> {
        if self.session.is_some_and(|s| s.pointer == pointer) {
            self.end()
        } else {
            None
        }
    }

    /// End any active session. Returns its final position.
    pub fn end(&mut self) -> Option<Pos2> {
        self.session.take().map(|s| s.current)
    }
}

fn clamp_to(pos: Pos2, container: Rect, size: Vec2, containment: Containment) -> Pos2 {
    let max = match containment {
        Containment::Point => container.max,
        Containment::Bounds => container.max - size,
    };
    Pos2::new(
        clamp_axis(pos.x, container.min.x, max.x),
        clamp_axis(pos.y, container.min.y, max.y),
    )
}

/// Clamp that tolerates `hi < lo` (node larger than its container) by
/// pinning to `lo`.
fn clamp_axis(value: f32, lo: f32, hi: f32) -> f32 {
    value.min(hi).max(lo)
}
