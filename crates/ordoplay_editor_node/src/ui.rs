// SPDX-License-Identifier: MIT OR Apache-2.0
//! egui host for nodes.
//!
//! Lays a [`Node`] out inside a canvas `Ui`, turns egui hover, drag and
//! focus responses into [`NodeInput`]s, and paints the node body. Graph
//! coordinates are relative to the canvas' top-left corner.

use crate::bounding::LayoutCause;
use crate::event::{NodeEvent, NodeInput, PointerButton, PointerId, PointerKind, PointerPress};
use crate::node::Node;
use crate::style::PortSlot;
use egui::{Color32, Pos2, Rect, Stroke, Vec2};

/// Height of the drag handle strip at the top of a node
const HANDLE_HEIGHT: f32 = 24.0;
const NODE_ROUNDING: f32 = 6.0;
const NODE_SHADOW_OFFSET: f32 = 3.0;

/// Result of showing a node for one frame
pub struct NodeResponse {
    /// Response of the handle widget
    pub response: egui::Response,
    /// Notifications produced this frame, in order
    pub events: Vec<NodeEvent>,
}

/// Indices of `nodes` in paint order: lowest display z-index first, ties in
/// slice order.
pub fn paint_order(nodes: &[Node]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..nodes.len()).collect();
    order.sort_by_key(|&i| nodes[i].display_z());
    order
}

/// Show a node of the given size.
///
/// `add_contents` fills the handle strip; `add_ports` is called with the
/// port slot and a child `Ui` covering the whole node.
///
/// egui reports a single interaction pointer, so every press, move and
/// release from here uses `PointerId::default()`. Hosts tracking several
/// touches at once should feed [`Node::handle`] directly with their own
/// pointer ids.
pub fn show_node(
    ui: &mut egui::Ui,
    node: &mut Node,
    size: Vec2,
    add_contents: impl FnOnce(&mut egui::Ui),
    add_ports: impl FnOnce(&mut egui::Ui, PortSlot),
) -> NodeResponse {
    let origin = ui.max_rect().min.to_vec2();
    let to_graph = |p: Pos2| p - origin;
    let mut events = Vec::new();

    // Layout first so hover and handle hit-tests use this frame's box
    let graph_rect = Rect::from_min_size(node.position(), size);
    let cause = if node.is_measured() {
        LayoutCause::Resize
    } else {
        LayoutCause::Mount
    };
    events.extend(node.handle(NodeInput::Layout {
        cause,
        rect: graph_rect.into(),
    }));
    let handle_rect = Rect::from_min_size(graph_rect.min, Vec2::new(size.x, HANDLE_HEIGHT.min(size.y)));
    events.extend(node.handle(NodeInput::HandleLayout(Some(handle_rect.into()))));

    let id = ui.id().with(("ordoplay_node", node.id().clone()));
    let response = ui.interact(
        handle_rect.translate(origin),
        id.with("handle"),
        egui::Sense::click_and_drag(),
    );

    let hover = ui.input(|i| i.pointer.hover_pos()).map(to_graph);
    events.extend(node.handle(NodeInput::PointerHover(hover)));

    if response.clicked() || response.drag_started() {
        response.request_focus();
    }

    if response.drag_started() {
        let (press_pos, touch) = ui.input(|i| (i.pointer.press_origin(), i.any_touches()));
        if let (Some(pos), Some(button)) = (press_pos, pressed_button(&response)) {
            let press = PointerPress {
                pointer: PointerId::default(),
                pos: to_graph(pos),
                kind: if touch { PointerKind::Touch } else { PointerKind::Mouse },
                button,
            };
            events.extend(node.handle(NodeInput::PointerDown(press)));
        }
    }
    if response.dragged() {
        if let Some(pos) = ui.input(|i| i.pointer.interact_pos()) {
            events.extend(node.handle(NodeInput::PointerMove {
                pointer: PointerId::default(),
                pos: to_graph(pos),
            }));
        }
    }
    if response.drag_stopped() {
        events.extend(node.handle(NodeInput::PointerUp {
            pointer: PointerId::default(),
        }));
    }

    events.extend(node.handle(if response.has_focus() {
        NodeInput::FocusIn
    } else {
        NodeInput::FocusOut
    }));

    // Paint at the position after this frame's drag
    let screen_rect = Rect::from_min_size(node.position() + origin, size);
    draw_body(ui.painter(), node, screen_rect);

    let header = Rect::from_min_size(screen_rect.min, Vec2::new(size.x, HANDLE_HEIGHT.min(size.y)));
    let mut content_ui = ui.new_child(egui::UiBuilder::new().max_rect(header.shrink(4.0)));
    add_contents(&mut content_ui);

    let mut ports_ui = ui.new_child(egui::UiBuilder::new().max_rect(screen_rect));
    add_ports(&mut ports_ui, node.port_slot());

    NodeResponse { response, events }
}

fn pressed_button(response: &egui::Response) -> Option<PointerButton> {
    if response.drag_started_by(egui::PointerButton::Primary) {
        Some(PointerButton::Primary)
    } else if response.drag_started_by(egui::PointerButton::Secondary) {
        Some(PointerButton::Secondary)
    } else if response.drag_started_by(egui::PointerButton::Middle) {
        Some(PointerButton::Middle)
    } else {
        None
    }
}

fn draw_body(painter: &egui::Painter, node: &Node, rect: Rect) {
    painter.rect_filled(
        rect.translate(Vec2::splat(NODE_SHADOW_OFFSET)),
        NODE_ROUNDING,
        Color32::from_rgba_unmultiplied(0, 0, 0, 60),
    );

    let bg_color = if node.is_selected() {
        Color32::from_rgb(60, 70, 90)
    } else {
        Color32::from_rgb(45, 45, 48)
    };
    painter.rect_filled(rect, NODE_ROUNDING, bg_color);

    let header = Rect::from_min_size(rect.min, Vec2::new(rect.width(), HANDLE_HEIGHT.min(rect.height())));
    let header_color = if node.is_hovered() {
        Color32::from_rgb(85, 120, 155)
    } else {
        Color32::from_rgb(70, 100, 130)
    };
    painter.rect_filled(
        header,
        egui::Rounding {
            nw: NODE_ROUNDING,
            ne: NODE_ROUNDING,
            sw: 0.0,
            se: 0.0,
        },
        header_color,
    );

    if node.is_selected() {
        painter.rect_stroke(rect, NODE_ROUNDING, Stroke::new(2.0, Color32::from_rgb(100, 150, 255)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounding::BoundingRect;
    use crate::config::NodeProps;
    use crate::scope::GraphScope;

    fn run_frame(node: &mut Node) -> Vec<NodeEvent> {
        let ctx = egui::Context::default();
        let mut events = Vec::new();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                let shown = show_node(ui, node, Vec2::new(180.0, 90.0), |ui| {
                    ui.label("Multiply");
                }, |_, _| {});
                events.extend(shown.events);
            });
        });
        events
    }

    #[test]
    fn test_show_measures_node() {
        let mut node = Node::new(NodeProps::new("n").with_position(40.0, 30.0), &GraphScope::unbounded()).unwrap();
        let ctx = node.context();

        let events = run_frame(&mut node);
        assert!(events.is_empty());
        assert_eq!(node.measured(), BoundingRect::new(40.0, 30.0, 180.0, 90.0));
        assert_eq!(ctx.bounding(), BoundingRect::new(40.0, 30.0, 180.0, 90.0));
        assert_eq!(
            node.drag().handle(),
            Some(Rect::from_min_size(Pos2::ZERO, Vec2::new(180.0, HANDLE_HEIGHT)))
        );
    }

    fn pointer_frame(ctx: &egui::Context, frame: u32, event: egui::Event, node: &mut Node) -> Vec<NodeEvent> {
        let input = egui::RawInput {
            screen_rect: Some(Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0))),
            time: Some(f64::from(frame) * 0.1),
            events: vec![event],
            ..Default::default()
        };
        let mut events = Vec::new();
        let _ = ctx.run(input, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                events.extend(show_node(ui, node, Vec2::new(180.0, 90.0), |_| {}, |_, _| {}).events);
            });
        });
        events
    }

    fn button(pos: Pos2, pressed: bool) -> egui::Event {
        egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed,
            modifiers: egui::Modifiers::default(),
        }
    }

    #[test]
    fn test_drag_and_focus_through_egui() {
        let mut node = Node::new(NodeProps::new("n").with_position(40.0, 30.0), &GraphScope::unbounded()).unwrap();
        let ctx = egui::Context::default();
        let press = Pos2::new(70.0, 45.0);

        let mut frames = vec![egui::Event::PointerMoved(press), button(press, true)];
        for k in 1..=5 {
            frames.push(egui::Event::PointerMoved(press + Vec2::new(10.0, 5.0) * k as f32));
        }
        frames.push(button(press + Vec2::new(50.0, 25.0), false));

        let mut events = Vec::new();
        for (frame, event) in (0..).zip(frames) {
            events.extend(pointer_frame(&ctx, frame, event, &mut node));
        }

        assert_eq!(
            events[..5],
            [
                NodeEvent::MouseEnter,
                NodeEvent::DragStarted(Pos2::new(40.0, 30.0)),
                NodeEvent::PositionChanged(Pos2::new(50.0, 35.0)),
                NodeEvent::SelectionChanged(true),
                NodeEvent::Focus,
            ]
        );
        assert_eq!(events.last(), Some(&NodeEvent::DragEnded(Pos2::new(90.0, 55.0))));
        assert_eq!(events.iter().filter(|e| **e == NodeEvent::Focus).count(), 1);
        assert!(!events.contains(&NodeEvent::Blur));

        let mut positions: Vec<Pos2> = events
            .iter()
            .filter_map(|e| match e {
                NodeEvent::PositionChanged(p) => Some(*p),
                _ => None,
            })
            .collect();
        positions.dedup();
        assert_eq!(
            positions,
            (1..=5).map(|k| Pos2::new(40.0 + 10.0 * k as f32, 30.0 + 5.0 * k as f32)).collect::<Vec<_>>()
        );
        assert_eq!(positions.last().copied(), Some(node.position()));
        assert_eq!(node.position(), Pos2::new(90.0, 55.0));
        assert!(!node.is_dragging());
        assert!(node.is_selected());
    }

    #[test]
    fn test_zero_size_node_is_measured() {
        let mut node = Node::new(NodeProps::new("n"), &GraphScope::unbounded()).unwrap();
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                show_node(ui, &mut node, Vec2::ZERO, |_| {}, |_, _| {});
            });
        });
        assert!(node.is_measured());
        assert_eq!(node.measured(), BoundingRect::default());
    }

    #[test]
    fn test_port_slot_receives_port_z() {
        let mut node = Node::new(NodeProps::new("n").with_z_index(4), &GraphScope::unbounded()).unwrap();
        let ctx = egui::Context::default();
        let mut slot_z = None;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                show_node(ui, &mut node, Vec2::new(100.0, 50.0), |_| {}, |_, slot| {
                    slot_z = Some(slot.z_index);
                });
            });
        });
        assert_eq!(slot_z, Some(51));
    }

    #[test]
    fn test_paint_order() {
        let scope = GraphScope::unbounded();
        let nodes = vec![
            Node::new(NodeProps::new("top").with_z_index(3), &scope).unwrap(),
            Node::new(NodeProps::new("low"), &scope).unwrap(),
            Node::new(NodeProps::new("mid").with_z_index(1), &scope).unwrap(),
            Node::new(NodeProps::new("low2"), &scope).unwrap(),
        ];
        assert_eq!(paint_order(&nodes), vec![1, 3, 2, 0]);
    }
}
