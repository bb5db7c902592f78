// SPDX-License-Identifier: MIT OR Apache-2.0
//! Port anchors resolved against a node's live context.
//!
//! Ports never hold a copy of the node position. They keep the node's
//! [`NodeContext`] and resolve their anchor on read, so an edge drawn from a
//! port always starts where the node is now.

use crate::bounding::BoundingRect;
use crate::context::{ContextSubscription, NodeContext};
use crate::style::PortSlot;
use egui::Pos2;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Height of the node header above the first port row
pub const NODE_HEADER_HEIGHT: f32 = 24.0;
/// Height of one port row
pub const PORT_HEIGHT: f32 = 22.0;

/// Port direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortDirection {
    /// Input port, anchored on the left edge
    Input,
    /// Output port, anchored on the right edge
    Output,
}

/// Where a port sits on its node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortAnchor {
    /// Which edge the port sits on
    pub direction: PortDirection,
    /// Distance from the node's top edge
    pub offset: f32,
}

impl PortAnchor {
    /// Anchor point for a node occupying `bounding`
    pub fn resolve(&self, bounding: &BoundingRect) -> Pos2 {
        let x = match self.direction {
            PortDirection::Input => bounding.x,
            PortDirection::Output => bounding.x + bounding.width,
        };
        Pos2::new(x, bounding.y + self.offset)
    }
}

/// Ports of one node, in declaration order
#[derive(Debug, Clone)]
pub struct PortLayout {
    context: NodeContext,
    z_index: i32,
    ports: IndexMap<String, PortAnchor>,
}

impl PortLayout {
    /// Start an empty layout from the node's port slot
    pub fn new(slot: PortSlot) -> Self {
        Self {
            context: slot.context,
            z_index: slot.z_index,
            ports: IndexMap::new(),
        }
    }

    /// Add a port in the next row on its edge.
    ///
    /// Re-adding a port on the same edge keeps its row.
    pub fn add(&mut self, name: impl Into<String>, direction: PortDirection) -> &mut Self {
        let name = name.into();
        if let Some(existing) = self.ports.get(&name).filter(|p| p.direction == direction) {
            let anchor = *existing;
            return self.insert(name, anchor);
        }
        let row = self
            .ports
            .iter()
            .filter(|(other, p)| **other != name && p.direction == direction)
            .count();
        let offset = NODE_HEADER_HEIGHT + row as f32 * PORT_HEIGHT + PORT_HEIGHT / 2.0;
        self.insert(name, PortAnchor { direction, offset })
    }

    /// Add or replace a port at an explicit anchor
    pub fn insert(&mut self, name: impl Into<String>, anchor: PortAnchor) -> &mut Self {
        self.ports.insert(name.into(), anchor);
        self
    }

    /// Z-index ports render at
    pub fn z_index(&self) -> i32 {
        self.z_index
    }

    /// Owning node's context
    pub fn context(&self) -> &NodeContext {
        &self.context
    }

    /// Number of ports
    pub fn len(&self) -> usize {
        self.ports.len()
    }

    /// Whether there are no ports
    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }

    /// Current anchor point of a port
    pub fn anchor(&self, name: &str) -> Option<Pos2> {
        let bounding = self.context.bounding();
        self.ports.get(name).map(|p| p.resolve(&bounding))
    }

    /// Current anchor points of all ports, in declaration order
    pub fn anchors(&self) -> Vec<(&str, Pos2)> {
        let bounding = self.context.bounding();
        self.ports
            .iter()
            .map(|(name, p)| (name.as_str(), p.resolve(&bounding)))
            .collect()
    }

    /// Run `observer` with every port's new anchor whenever the node moves
    /// or resizes. Ports added afterwards are not included.
    pub fn watch(&self, observer: impl Fn(&str, Pos2) + 'static) -> ContextSubscription {
        let ports = self.ports.clone();
        self.context.subscribe(move |bounding| {
            for (name, port) in &ports {
                observer(name, port.resolve(bounding));
            }
        })
    }
}
