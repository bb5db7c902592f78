// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error type for node configuration and owner updates.

use thiserror::Error;

/// Node errors
#[derive(Debug, Error)]
pub enum NodeError {
    /// Props text could not be parsed
    #[error("Invalid node config: {0}")]
    Config(#[from] ron::error::SpannedError),

    /// Coordinate was NaN or infinite
    #[error("Non-finite node position: ({x}, {y})")]
    NonFinitePosition {
        /// Rejected x coordinate
        x: f32,
        /// Rejected y coordinate
        y: f32,
    },

    /// Root element tag was empty
    #[error("Element tag must not be empty")]
    EmptyTag,
}

/// Result type for node operations
pub type Result<T> = std::result::Result<T, NodeError>;
