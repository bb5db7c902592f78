// SPDX-License-Identifier: MIT OR Apache-2.0
//! Stacking order for nodes and the ports they render.
//!
//! Node priorities are spaced by a factor of ten so the graph can slot its own
//! layers (edges, overlays) between sibling nodes without colliding.

/// Spacing between consecutive node priorities
pub const LAYER_SPACING: i32 = 10;

/// Highest display z-index a node gets, leaving one slot for its ports
pub const MAX_DISPLAY_Z: i32 = i32::MAX - 1;

/// Display z-index of a node with the given base priority
pub fn display_z(z_index: i32) -> i32 {
    z_index
        .saturating_add(1)
        .saturating_mul(LAYER_SPACING)
        .min(MAX_DISPLAY_Z)
}

/// Display z-index of ports rendered inside a node with the given base priority
pub fn port_z(z_index: i32) -> i32 {
    display_z(z_index).saturating_add(1)
}
