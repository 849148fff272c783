//! Settle - A Fruchterman–Reingold force-directed graph layout engine.
//!
//! Given a [`Graph`](graph::Graph) of nodes and weighted edges, the
//! [`LayoutEngine`] iteratively moves nodes so unconnected nodes spread apart
//! and connected nodes draw together, until the system settles or an
//! iteration cap is reached. The engine never decides topology and never
//! renders; callers build the graph and read positions back through
//! [`Snapshot`]s.

pub mod config;
pub mod drive;

mod error;
mod layout;
mod snapshot;

pub use settle_core::{geometry, graph, identifier};

pub use drive::PositionSink;
pub use error::{LayoutError, SettleError};
pub use layout::{Completion, LayoutEngine, LayoutState, RunSummary};
pub use snapshot::Snapshot;
