//! Error types for Settle operations.
//!
//! [`LayoutError`] is the soft failure reported by
//! [`LayoutEngine::start`](crate::LayoutEngine::start); it never aborts the
//! host, the engine simply does not start. [`SettleError`] is the umbrella
//! type for callers that build graphs, load configuration and run layouts in
//! one pipeline.

use std::io;

use thiserror::Error;

use settle_core::graph::GraphError;

use crate::config::ConfigError;

/// Reasons a layout run was not started.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("no nodes passed in")]
    EmptyGraph,

    #[error("world radius {0} must be positive and finite")]
    InvalidRadius(f32),
}

/// The main error type for Settle operations.
#[derive(Debug, Error)]
pub enum SettleError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
