// SPDX-License-Identifier: MIT OR Apache-2.0
//! The draggable node component.
//!
//! A [`Node`] owns its position and selection. The host feeds it raw
//! [`NodeInput`]s in arrival order; each call returns the [`NodeEvent`]s the
//! owner must observe, so the owner's copy of position and selection never
//! diverges from the node's. Owner-side writes go through
//! [`Node::set_position`] and [`Node::set_selected`] and do not echo back.

use crate::bounding::{BoundingRect, BoundingTracker};
use crate::config::{check_finite, NodeProps};
use crate::context::{ElementRef, NodeContext, NodeContextProvider};
use crate::drag::DragEngine;
use crate::error::Result;
use crate::event::{NodeEvent, NodeInput};
use crate::id::NodeId;
use crate::interaction::InteractionState;
use crate::layering;
use crate::scope::GraphScope;
use crate::style::{ElementTag, NodeStyle, NodeView, PortSlot};
use egui::{Pos2, Rect};

/// Tab index given to the handle so it is keyboard focusable
pub const HANDLE_TABINDEX: i32 = 0;

/// A positioned, draggable graph node
pub struct Node {
    id: NodeId,
    parent: Option<NodeId>,
    tag: ElementTag,
    position: Pos2,
    z_index: i32,
    draggable: bool,
    drag: DragEngine,
    interaction: InteractionState,
    bounding: BoundingTracker,
    provider: NodeContextProvider,
}

impl Node {
    /// Create a node inside the given graph scope
    pub fn new(props: NodeProps, scope: &GraphScope) -> Result<Self> {
        props.validate()?;
        let position = props.position();

        let provider = NodeContextProvider::new(
            ElementRef {
                node: props.id.clone(),
                parent: props.parent.clone(),
            },
            BoundingRect::new(position.x, position.y, 0.0, 0.0),
        );

        let mut drag = DragEngine::new(props.drag);
        drag.set_container(scope.container);

        tracing::debug!(id = %props.id, x = position.x, y = position.y, "node created");

        Ok(Self {
            id: props.id,
            parent: props.parent,
            tag: props.tag,
            position,
            z_index: props.z_index,
            draggable: props.draggable,
            drag,
            interaction: InteractionState::new(props.is_selected),
            bounding: BoundingTracker::new(),
            provider,
        })
    }

    /// Node identity
    pub fn id(&self) -> &NodeId {
        &self.id
    }

    /// Enclosing node
    pub fn parent(&self) -> Option<&NodeId> {
        self.parent.as_ref()
    }

    /// Root element tag
    pub fn tag(&self) -> &ElementTag {
        &self.tag
    }

    /// Current position in graph coordinates
    pub fn position(&self) -> Pos2 {
        self.position
    }

    /// Base layering priority
    pub fn z_index(&self) -> i32 {
        self.z_index
    }

    /// Z-index the node renders at
    pub fn display_z(&self) -> i32 {
        layering::display_z(self.z_index)
    }

    /// Z-index ports inside the node render at
    pub fn port_z(&self) -> i32 {
        layering::port_z(self.z_index)
    }

    /// Whether dragging is enabled
    pub fn is_draggable(&self) -> bool {
        self.draggable
    }

    /// Whether a drag session is active
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Whether the node is selected
    pub fn is_selected(&self) -> bool {
        self.interaction.is_selected()
    }

    /// Whether the pointer is over the node
    pub fn is_hovered(&self) -> bool {
        self.interaction.is_hovered()
    }

    /// Whether focus is inside the handle
    pub fn focus_within(&self) -> bool {
        self.interaction.focus_within()
    }

    /// Last measured root box
    pub fn measured(&self) -> BoundingRect {
        self.bounding.rect()
    }

    /// Whether the host has reported a layout yet
    pub fn is_measured(&self) -> bool {
        self.bounding.is_measured()
    }

    /// Node box in graph coordinates: current position, measured size
    pub fn bounds(&self) -> Rect {
        Rect::from_min_size(self.position, self.bounding.size())
    }

    /// Drag engine state
    pub fn drag(&self) -> &DragEngine {
        &self.drag
    }

    /// Read-only context handle for descendants
    pub fn context(&self) -> NodeContext {
        self.provider.context()
    }

    /// Parameters for the port slot
    pub fn port_slot(&self) -> PortSlot {
        PortSlot {
            z_index: self.port_z(),
            context: self.context(),
        }
    }

    /// Handle one input and return the resulting notifications
    pub fn handle(&mut self, input: NodeInput) -> Vec<NodeEvent> {
        let mut events = Vec::new();
        match input {
            NodeInput::PointerDown(press) => {
                if self.draggable && self.drag.press(&press, self.position) {
                    tracing::debug!(id = %self.id, x = self.position.x, y = self.position.y, "drag started");
                    events.push(NodeEvent::DragStarted(self.position));
                }
            }
            NodeInput::PointerMove { pointer, pos } => {
                if let Some(next) = self.drag.drag_to(pointer, pos, self.bounding.size()) {
                    tracing::trace!(id = %self.id, x = next.x, y = next.y, "drag move");
                    self.move_to(next);
                    events.push(NodeEvent::PositionChanged(next));
                }
            }
            NodeInput::PointerUp { pointer } => {
                if let Some(end) = self.drag.release(pointer) {
                    tracing::debug!(id = %self.id, x = end.x, y = end.y, "drag ended");
                    events.push(NodeEvent::DragEnded(end));
                }
            }
            NodeInput::PointerEnter => self.interaction.set_hovered(true, &mut events),
            NodeInput::PointerLeave => self.interaction.set_hovered(false, &mut events),
            NodeInput::PointerHover(pos) => {
                let bounds = self.bounds();
                let hovered = pos.is_some_and(|p| bounds.contains(p));
                self.interaction.set_hovered(hovered, &mut events);
            }
            NodeInput::FocusIn => self.interaction.set_focus_within(true, &mut events),
            NodeInput::FocusOut => self.interaction.set_focus_within(false, &mut events),
            NodeInput::HandleLayout(rect) => {
                let local = rect.map(|r| r.to_rect().translate(-self.position.to_vec2()));
                self.drag.set_handle(local);
            }
            NodeInput::Layout { cause, rect } => {
                if self.bounding.observe(cause, rect) {
                    self.publish();
                }
            }
        }
        events
    }

    /// Handle a batch of inputs in order
    pub fn handle_all(&mut self, inputs: impl IntoIterator<Item = NodeInput>) -> Vec<NodeEvent> {
        inputs
            .into_iter()
            .flat_map(|input| self.handle(input))
            .collect()
    }

    /// Owner-side position write
    pub fn set_position(&mut self, pos: Pos2) -> Result<()> {
        check_finite(pos)?;
        self.move_to(pos);
        Ok(())
    }

    /// Owner-side selection write
    pub fn set_selected(&mut self, selected: bool) {
        // The owner made this change; nothing to report back
        let mut echo = Vec::new();
        self.interaction.set_selected(selected, &mut echo);
    }

    /// Change the base layering priority
    pub fn set_z_index(&mut self, z_index: i32) {
        self.z_index = z_index;
    }

    /// Enable or disable dragging. Disabling ends an active session.
    pub fn set_draggable(&mut self, draggable: bool) -> Vec<NodeEvent> {
        self.draggable = draggable;
        if draggable {
            return Vec::new();
        }
        self.drag.end().map(NodeEvent::DragEnded).into_iter().collect()
    }

    /// Pick up a new graph scope (e.g. the container was resized)
    pub fn set_scope(&mut self, scope: &GraphScope) {
        self.drag.set_container(scope.container);
    }

    /// Tear the node down, ending any active session
    pub fn unmount(mut self) -> Vec<NodeEvent> {
        tracing::debug!(id = %self.id, "node unmounted");
        self.drag.end().map(NodeEvent::DragEnded).into_iter().collect()
    }

    /// Inline style for the root element
    pub fn style(&self) -> NodeStyle {
        NodeStyle::new(self.position, self.display_z())
    }

    /// Render with primary content and a port slot
    pub fn render<C, P>(&self, content: C, ports: impl FnOnce(PortSlot) -> P) -> NodeView<C, P> {
        NodeView {
            tag: self.tag.clone(),
            style: self.style(),
            handle_tabindex: HANDLE_TABINDEX,
            content,
            ports: Some(ports(self.port_slot())),
        }
    }

    /// Render with primary content only
    pub fn render_content<C>(&self, content: C) -> NodeView<C, String> {
        NodeView {
            tag: self.tag.clone(),
            style: self.style(),
            handle_tabindex: HANDLE_TABINDEX,
            content,
            ports: None,
        }
    }

    fn move_to(&mut self, pos: Pos2) {
        self.position = pos;
        self.publish();
    }

    fn publish(&self) {
        let size = self.bounding.size();
        self.provider.publish(BoundingRect::new(
            self.position.x,
            self.position.y,
            size.x,
            size.y,
        ));
    }
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("position", &self.position)
            .field("z_index", &self.z_index)
            .field("draggable", &self.draggable)
            .field("interaction", &self.interaction)
            .field("dragging", &self.drag.is_dragging())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounding::LayoutCause;
    use crate::event::{PointerId, PointerPress};
    use egui::Vec2;

    fn node_at(x: f32, y: f32) -> Node {
        let mut node = Node::new(NodeProps::new("n").with_position(x, y), &GraphScope::unbounded()).unwrap();
        node.handle(NodeInput::Layout {
            cause: LayoutCause::Mount,
            rect: BoundingRect::new(x, y, 100.0, 60.0),
        });
        node.handle(NodeInput::HandleLayout(Some(BoundingRect::new(x, y, 100.0, 20.0))));
        node
    }

    fn drag(node: &mut Node, from: Pos2, to: Pos2) -> Vec<NodeEvent> {
        node.handle_all([
            NodeInput::PointerDown(PointerPress::mouse(from)),
            NodeInput::PointerMove { pointer: PointerId::default(), pos: to },
            NodeInput::PointerUp { pointer: PointerId::default() },
        ])
    }

    #[test]
    fn test_drag_emits_live_positions() {
        let mut node = node_at(0.0, 0.0);
        let events = node.handle_all([
            NodeInput::PointerDown(PointerPress::mouse(Pos2::new(10.0, 10.0))),
            NodeInput::PointerMove { pointer: PointerId::default(), pos: Pos2::new(12.0, 11.0) },
            NodeInput::PointerMove { pointer: PointerId::default(), pos: Pos2::new(25.0, 5.0) },
        ]);
        assert_eq!(
            events,
            vec![
                NodeEvent::DragStarted(Pos2::ZERO),
                NodeEvent::PositionChanged(Pos2::new(2.0, 1.0)),
                NodeEvent::PositionChanged(Pos2::new(15.0, -5.0)),
            ]
        );
        assert_eq!(node.position(), Pos2::new(15.0, -5.0));

        let events = node.handle(NodeInput::PointerUp { pointer: PointerId::default() });
        assert_eq!(events, vec![NodeEvent::DragEnded(Pos2::new(15.0, -5.0))]);
        assert_eq!(node.position(), Pos2::new(15.0, -5.0));
    }

    #[test]
    fn test_handle_follows_node() {
        let mut node = node_at(0.0, 0.0);
        drag(&mut node, Pos2::new(10.0, 10.0), Pos2::new(210.0, 10.0));
        assert_eq!(node.position(), Pos2::new(200.0, 0.0));

        // Old handle area no longer starts a drag
        assert!(node.handle(NodeInput::PointerDown(PointerPress::mouse(Pos2::new(10.0, 10.0)))).is_empty());
        // The handle moved with the node
        assert!(!node.handle(NodeInput::PointerDown(PointerPress::mouse(Pos2::new(210.0, 10.0)))).is_empty());
    }

    #[test]
    fn test_press_outside_handle_is_ignored() {
        let mut node = node_at(0.0, 0.0);
        // Inside the node body but below the handle strip
        let events = drag(&mut node, Pos2::new(10.0, 40.0), Pos2::new(50.0, 80.0));
        assert!(events.is_empty());
        assert_eq!(node.position(), Pos2::ZERO);
    }

    #[test]
    fn test_not_draggable() {
        let mut node = node_at(0.0, 0.0);
        node.set_draggable(false);
        assert!(drag(&mut node, Pos2::new(10.0, 10.0), Pos2::new(50.0, 50.0)).is_empty());
        assert_eq!(node.position(), Pos2::ZERO);
    }

    #[test]
    fn test_disable_mid_drag_ends_session() {
        let mut node = node_at(0.0, 0.0);
        node.handle_all([
            NodeInput::PointerDown(PointerPress::mouse(Pos2::new(10.0, 10.0))),
            NodeInput::PointerMove { pointer: PointerId::default(), pos: Pos2::new(15.0, 10.0) },
        ]);
        assert_eq!(node.set_draggable(false), vec![NodeEvent::DragEnded(Pos2::new(5.0, 0.0))]);
        assert!(!node.is_dragging());
        let events = node.handle(NodeInput::PointerMove { pointer: PointerId::default(), pos: Pos2::new(90.0, 10.0) });
        assert!(events.is_empty());
    }

    #[test]
    fn test_unmount_ends_session() {
        let mut node = node_at(0.0, 0.0);
        node.handle(NodeInput::PointerDown(PointerPress::mouse(Pos2::new(10.0, 10.0))));
        assert_eq!(node.unmount(), vec![NodeEvent::DragEnded(Pos2::ZERO)]);
    }

    #[test]
    fn test_missing_handle_is_inert() {
        let mut node = node_at(0.0, 0.0);
        node.handle(NodeInput::HandleLayout(None));
        assert!(drag(&mut node, Pos2::new(10.0, 10.0), Pos2::new(50.0, 50.0)).is_empty());
    }

    #[test]
    fn test_owner_position_starts_next_drag() {
        let mut node = node_at(0.0, 0.0);
        node.set_position(Pos2::new(100.0, 100.0)).unwrap();
        node.handle(NodeInput::HandleLayout(Some(BoundingRect::new(100.0, 100.0, 100.0, 20.0))));

        drag(&mut node, Pos2::new(110.0, 110.0), Pos2::new(120.0, 110.0));
        assert_eq!(node.position(), Pos2::new(110.0, 100.0));
    }

    #[test]
    fn test_owner_position_rejects_nan() {
        let mut node = node_at(0.0, 0.0);
        assert!(node.set_position(Pos2::new(f32::INFINITY, 0.0)).is_err());
        assert_eq!(node.position(), Pos2::ZERO);
    }

    #[test]
    fn test_hover_from_pointer() {
        let mut node = node_at(0.0, 0.0);
        let events = node.handle_all([
            NodeInput::PointerHover(Some(Pos2::new(50.0, 30.0))),
            NodeInput::PointerHover(Some(Pos2::new(60.0, 30.0))),
            NodeInput::PointerHover(Some(Pos2::new(500.0, 30.0))),
            NodeInput::PointerHover(None),
        ]);
        assert_eq!(events, vec![NodeEvent::MouseEnter, NodeEvent::MouseLeave]);
    }

    #[test]
    fn test_owner_selection_does_not_echo() {
        let mut node = node_at(0.0, 0.0);
        node.set_selected(true);
        assert!(node.is_selected());
        assert_eq!(node.handle(NodeInput::FocusIn), vec![NodeEvent::Focus]);
        assert_eq!(
            node.handle(NodeInput::FocusOut),
            vec![NodeEvent::SelectionChanged(false), NodeEvent::Blur]
        );
    }

    #[test]
    fn test_context_tracks_position_and_size() {
        let mut node = node_at(5.0, 5.0);
        let ctx = node.context();
        assert_eq!(ctx.bounding(), BoundingRect::new(5.0, 5.0, 100.0, 60.0));

        drag(&mut node, Pos2::new(10.0, 10.0), Pos2::new(20.0, 30.0));
        assert_eq!(ctx.bounding(), BoundingRect::new(15.0, 25.0, 100.0, 60.0));

        node.handle(NodeInput::Layout {
            cause: LayoutCause::Resize,
            rect: BoundingRect::new(15.0, 25.0, 120.0, 80.0),
        });
        assert_eq!(ctx.bounding().size(), Vec2::new(120.0, 80.0));
        assert!(ctx.same_handle(&node.context()));
        assert_eq!(ctx.element().node, NodeId::from("n"));
    }

    #[test]
    fn test_zero_sized_layout_counts_as_measured() {
        let mut node = Node::new(NodeProps::new("n"), &GraphScope::unbounded()).unwrap();
        assert!(!node.is_measured());

        node.handle(NodeInput::Layout {
            cause: LayoutCause::Mount,
            rect: BoundingRect::default(),
        });
        assert!(node.is_measured());
        assert_eq!(node.measured(), BoundingRect::default());
    }

    #[test]
    fn test_render() {
        let node = Node::new(
            NodeProps::new(1).with_position(15.0, -5.0).with_z_index(2).with_tag("section"),
            &GraphScope::unbounded(),
        )
        .unwrap();

        let view = node.render("Multiply", |slot| format!("<i data-z=\"{}\"></i>", slot.z_index));
        assert_eq!(
            view.to_html(),
            "<section style=\"position: absolute; cursor: grab; left: 15px; top: -5px; z-index: 30\">\
             <div tabindex=\"0\">Multiply</div><i data-z=\"31\"></i></section>"
        );

        let view = node.render_content("Multiply");
        assert!(view.ports.is_none());
        assert!(view.to_html().ends_with("<div tabindex=\"0\">Multiply</div></section>"));
    }
}
