// SPDX-License-Identifier: MIT OR Apache-2.0
//! Hover, focus and selection state.
//!
//! Hover and focus are independent flags. Selection follows focus
//! transitions but can also be set by the owner; whichever write comes last
//! wins.

use crate::event::NodeEvent;

/// Interaction flags of a node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InteractionState {
    hovered: bool,
    focus_within: bool,
    selected: bool,
}

impl InteractionState {
    /// Create state with the given initial selection
    pub fn new(selected: bool) -> Self {
        Self {
            selected,
            ..Self::default()
        }
    }

    /// Whether the pointer is over the node
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Whether focus is inside the handle
    pub fn focus_within(&self) -> bool {
        self.focus_within
    }

    /// Whether the node is selected
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Update hover. Emits `MouseEnter`/`MouseLeave` on transitions only.
    pub fn set_hovered(&mut self, hovered: bool, events: &mut Vec<NodeEvent>) {
        if self.hovered == hovered {
            return;
        }
        self.hovered = hovered;
        events.push(if hovered {
            NodeEvent::MouseEnter
        } else {
            NodeEvent::MouseLeave
        });
    }

    /// Update focus-within. On a transition the selection follows focus and
    /// `Focus`/`Blur` is emitted.
    pub fn set_focus_within(&mut self, focused: bool, events: &mut Vec<NodeEvent>) {
        if self.focus_within == focused {
            return;
        }
        self.focus_within = focused;
        tracing::debug!(focused, "node focus changed");
        self.set_selected(focused, events);
        events.push(if focused { NodeEvent::Focus } else { NodeEvent::Blur });
    }

    /// Set the selection. Emits `SelectionChanged` if the value changed.
    pub fn set_selected(&mut self, selected: bool, events: &mut Vec<NodeEvent>) {
        if self.selected == selected {
            return;
        }
        self.selected = selected;
        events.push(NodeEvent::SelectionChanged(selected));
    }
}
