// SPDX-License-Identifier: MIT OR Apache-2.0
//! Live node data shared with descendant ports.
//!
//! A node owns the only [`NodeContextProvider`] for its context and hands
//! read-only [`NodeContext`] clones down the render tree. All clones point at
//! the same shared state, so a port always reads the latest published box.
//! Ports that need to react to changes register an observer instead.

use crate::bounding::BoundingRect;
use crate::id::NodeId;
use egui::Pos2;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Callback run after the published box changes
pub type ContextObserver = Rc<dyn Fn(&BoundingRect)>;

type ObserverList = Rc<RefCell<Vec<ContextObserver>>>;

/// Reference to the node's root element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementRef {
    /// Node that owns the element
    pub node: NodeId,
    /// Enclosing node, for nested graphs
    pub parent: Option<NodeId>,
}

struct Shared {
    element: ElementRef,
    bounding: Cell<BoundingRect>,
    observers: ObserverList,
}

/// Read-only handle to a node's live element and bounding data
#[derive(Clone)]
pub struct NodeContext {
    shared: Rc<Shared>,
}

impl NodeContext {
    /// The node's root element
    pub fn element(&self) -> &ElementRef {
        &self.shared.element
    }

    /// Latest published box: graph position plus measured size
    pub fn bounding(&self) -> BoundingRect {
        self.shared.bounding.get()
    }

    /// Latest published graph position
    pub fn position(&self) -> Pos2 {
        self.bounding().origin()
    }

    /// Run `observer` after every change. Dropping the returned subscription
    /// unregisters it.
    pub fn subscribe(&self, observer: impl Fn(&BoundingRect) + 'static) -> ContextSubscription {
        let observer: ContextObserver = Rc::new(observer);
        self.shared.observers.borrow_mut().push(Rc::clone(&observer));
        ContextSubscription {
            observer,
            observers: Rc::clone(&self.shared.observers),
        }
    }

    /// Whether both handles belong to the same node
    pub fn same_handle(&self, other: &NodeContext) -> bool {
        Rc::ptr_eq(&self.shared, &other.shared)
    }

    /// Number of registered observers
    pub fn observer_count(&self) -> usize {
        self.shared.observers.borrow().len()
    }
}

impl fmt::Debug for NodeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeContext")
            .field("element", &self.shared.element)
            .field("bounding", &self.bounding())
            .field("observers", &self.observer_count())
            .finish()
    }
}

/// Keeps a context observer registered
pub struct ContextSubscription {
    observer: ContextObserver,
    observers: ObserverList,
}

impl Drop for ContextSubscription {
    fn drop(&mut self) {
        self.observers
            .borrow_mut()
            .retain(|item| !Rc::ptr_eq(item, &self.observer));
    }
}

/// Write side of a node context. Only the owning node holds one.
pub struct NodeContextProvider {
    shared: Rc<Shared>,
}

impl NodeContextProvider {
    /// Create a provider for the given element
    pub fn new(element: ElementRef, bounding: BoundingRect) -> Self {
        Self {
            shared: Rc::new(Shared {
                element,
                bounding: Cell::new(bounding),
                observers: Rc::new(RefCell::new(Vec::new())),
            }),
        }
    }

    /// Read handle for descendants
    pub fn context(&self) -> NodeContext {
        NodeContext {
            shared: Rc::clone(&self.shared),
        }
    }

    /// Publish a new box. Observers run only if it differs from the last one.
    pub fn publish(&self, bounding: BoundingRect) {
        if self.shared.bounding.get() == bounding {
            return;
        }
        self.shared.bounding.set(bounding);

        // Observers may subscribe or unsubscribe while being notified
        let observers = self.shared.observers.borrow().clone();
        for observer in observers {
            observer(&bounding);
        }
    }
}
