// SPDX-License-Identifier: MIT OR Apache-2.0
//! Draggable node primitive for `OrdoPlay` Editor graphs.
//!
//! This crate provides the interaction and layout engine behind a single
//! graph node:
//! - Pointer dragging scoped to a handle region, clamped to the graph
//! - Hover, focus and focus-driven selection
//! - Deterministic stacking order for nodes and their ports
//! - A live context that ports read to anchor connector endpoints
//!
//! ## Architecture
//!
//! A [`Node`] owns its position and selection state. The host (the graph
//! surface, or the [`ui`] module for egui) dispatches [`NodeInput`]s in
//! arrival order and forwards the returned [`NodeEvent`]s to the graph that
//! owns the node. Ports receive a [`PortSlot`] carrying the port z-index and
//! a [`NodeContext`] handle; they read the node's box on demand or subscribe
//! to changes.

pub mod bounding;
pub mod config;
pub mod context;
pub mod drag;
pub mod error;
pub mod event;
pub mod id;
pub mod interaction;
pub mod layering;
pub mod node;
pub mod port;
pub mod scope;
pub mod style;
pub mod ui;

pub use bounding::{BoundingRect, BoundingTracker, LayoutCause};
pub use config::{Containment, DragAxis, DragOptions, NodeProps};
pub use context::{ContextSubscription, ElementRef, NodeContext};
pub use error::{NodeError, Result};
pub use event::{NodeEvent, NodeInput, PointerButton, PointerId, PointerKind, PointerPress};
pub use id::NodeId;
pub use node::Node;
pub use port::{PortAnchor, PortDirection, PortLayout};
pub use scope::GraphScope;
pub use style::{ElementTag, NodeStyle, NodeView, PortSlot};
