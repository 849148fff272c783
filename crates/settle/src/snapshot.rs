//! Read-only copies of node positions for presentation.

use serde::Serialize;

use settle_core::{geometry::Point, graph::Graph, identifier::NodeId};

/// Positions of every node after a given iteration, indexed by [`NodeId`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    iteration: usize,
    positions: Vec<Point>,
}

impl Snapshot {
    pub(crate) fn capture(graph: &Graph, iteration: usize) -> Self {
        Self {
            iteration,
            positions: graph.nodes().iter().map(|node| node.position()).collect(),
        }
    }

    /// Returns the number of iterations completed when the snapshot was taken
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Returns all positions in id order
    pub fn positions(&self) -> &[Point] {
        &self.positions
    }

    /// Returns the position of one node
    pub fn position(&self, id: NodeId) -> Option<Point> {
        self.positions.get(id.index()).copied()
    }

    /// Iterates over `(id, position)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, Point)> + '_ {
        self.positions
            .iter()
            .enumerate()
            .map(|(index, position)| (NodeId::new(index), *position))
    }
}
