//! Node identity.
//!
//! A [`NodeId`] is the index of a node in its [`Graph`](crate::graph::Graph)
//! arena. Ids are assigned by the graph in insertion order, so they are small,
//! dense, stable for the lifetime of the graph, and totally ordered. The
//! ordering is what the attractive pass uses to visit each reciprocal edge
//! pair once.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identity of a node within a graph
///
/// # Examples
///
/// ```
/// use settle_core::identifier::NodeId;
///
/// let a = NodeId::new(0);
/// let b = NodeId::new(3);
/// assert!(a < b);
/// assert_eq!(b.index(), 3);
/// assert_eq!(b.to_string(), "3");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    /// Creates an id from a raw arena index.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the arena index this id refers to.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for NodeId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}
