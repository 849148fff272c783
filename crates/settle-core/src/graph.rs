//! Graph arena consumed by the layout engine.
//!
//! The graph is a flat `Vec` of [`Node`]s. Every node owns its outgoing
//! [`Edge`]s, and edges refer to their endpoints by [`NodeId`], which is the
//! endpoint's index in the arena. This keeps neighbour lookups O(1) without
//! nodes holding references to each other.
//!
//! # Architecture
//!
//! - [`Graph`]: the arena; the only way to create nodes and edges
//! - [`Node`]: identity, position, transient velocity, outgoing edges
//! - [`Edge`]: directed endpoint pair plus relationship metadata
//! - [`EdgeKind`]: relationship category, inert to the force model
//! - [`NodeState`]: security state of a node, inert to the force model
//!
//! Symmetric relationships are stored as reciprocal edge pairs (see
//! [`Graph::connect`]). Consumers that want each relationship once filter on
//! `source < target`, as [`Graph::undirected_edges`] does.

use std::f32::consts::TAU;

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{geometry::Point, identifier::NodeId};

/// Errors raised while building a [`Graph`]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    #[error("node {0} does not exist in the graph")]
    UnknownNode(NodeId),

    #[error("node {0} cannot be connected to itself")]
    SelfLoop(NodeId),

    #[error("relationship strength {0} is outside [0, 1]")]
    InvalidStrength(f32),
}

/// Category of a relationship between two nodes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    #[default]
    Colleague,
    DirectReport,
    Manager,
    FrequentContact,
}

/// Security state of a node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeState {
    #[default]
    Clean,
    Infected,
    Aware,
    Quarantined,
}

/// A directed edge from `source` to `target`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    source: NodeId,
    target: NodeId,
    /// Trust between the endpoints, in `[0, 1]`. Not used by the layout.
    strength: f32,
    kind: EdgeKind,
}

impl Edge {
    /// Returns the id of the node that owns this edge
    pub fn source(&self) -> NodeId {
        self.source
    }

    /// Returns the id of the node this edge points at
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Returns the relationship strength
    pub fn strength(&self) -> f32 {
        self.strength
    }

    /// Returns the relationship category
    pub fn kind(&self) -> EdgeKind {
        self.kind
    }
}

/// A node in the arena
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: NodeId,
    position: Point,
    /// Accumulated force, carried across layout iterations.
    velocity: Point,
    state: NodeState,
    /// How likely the node is to spot a phishing attempt, in `[0, 1]`.
    awareness: f32,
    edges: Vec<Edge>,
}

impl Node {
    /// Awareness of a freshly added node.
    pub const DEFAULT_AWARENESS: f32 = 0.5;

    fn new(id: NodeId, position: Point) -> Self {
        Self {
            id,
            position,
            velocity: Point::ZERO,
            state: NodeState::Clean,
            awareness: Self::DEFAULT_AWARENESS,
            edges: Vec::new(),
        }
    }

    /// Returns the node's identity
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the current position
    pub fn position(&self) -> Point {
        self.position
    }

    /// Moves the node to `position`
    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    /// Returns the current velocity
    pub fn velocity(&self) -> Point {
        self.velocity
    }

    /// Overwrites the current velocity
    pub fn set_velocity(&mut self, velocity: Point) {
        self.velocity = velocity;
    }

    /// Returns the security state
    pub fn state(&self) -> NodeState {
        self.state
    }

    pub fn set_state(&mut self, state: NodeState) {
        self.state = state;
    }

    /// Returns the awareness level
    pub fn awareness(&self) -> f32 {
        self.awareness
    }

    /// Sets the awareness level, clamped to `[0, 1]`
    pub fn set_awareness(&mut self, awareness: f32) {
        self.awareness = awareness.clamp(0.0, 1.0);
    }

    /// Returns the outgoing edges of this node
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
}

/// Flat node arena with per-node edge lists
///
/// # Examples
///
/// ```
/// use settle_core::{
///     geometry::Point,
///     graph::{EdgeKind, Graph},
/// };
///
/// let mut graph = Graph::new();
/// let alice = graph.add_node(Point::new(0.0, 0.0));
/// let bob = graph.add_node(Point::new(4.0, 0.0));
/// graph.connect(alice, bob, 0.8, EdgeKind::Manager).unwrap();
///
/// assert_eq!(graph.len(), 2);
/// assert_eq!(graph.edge_count(), 1);
/// assert_eq!(graph.undirected_edges().count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    nodes: Vec<Node>,
}

impl Graph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty graph with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Adds a node at `position` and returns its id.
    pub fn add_node(&mut self, position: Point) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node::new(id, position));
        id
    }

    /// Connects `a` and `b` with a reciprocal edge pair.
    ///
    /// Both endpoints receive an edge pointing at the other, sharing the same
    /// strength and kind.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError`] if either node is unknown, if `a == b`, or if
    /// `strength` is not a finite value in `[0, 1]`.
    pub fn connect(
        &mut self,
        a: NodeId,
        b: NodeId,
        strength: f32,
        kind: EdgeKind,
    ) -> Result<(), GraphError> {
        self.validate_edge(a, b, strength)?;
        self.push_edge(a, b, strength, kind);
        self.push_edge(b, a, strength, kind);
        Ok(())
    }

    /// Adds a single directed edge from `source` to `target`.
    ///
    /// The attractive pass only visits edges whose source id is lower than
    /// the target id, so a lone edge with `source > target` exerts no pull.
    /// Prefer [`Graph::connect`] for symmetric relationships.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Graph::connect`].
    pub fn add_edge(
        &mut self,
        source: NodeId,
        target: NodeId,
        strength: f32,
        kind: EdgeKind,
    ) -> Result<(), GraphError> {
        self.validate_edge(source, target, strength)?;
        if source > target {
            debug!(
                source = source.index(),
                target = target.index();
                "Directed edge points to a lower id and will not attract"
            );
        }
        self.push_edge(source, target, strength, kind);
        Ok(())
    }

    /// Returns the node with the given id, if it exists.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Returns the node with the given id mutably, if it exists.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Returns all nodes in id order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns all nodes mutably in id order.
    pub fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    /// Returns the number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of relationships, counting each reciprocal pair once.
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|node| node.edges.len()).sum::<usize>() / 2
    }

    /// Iterates over edges with `source < target`, yielding every reciprocal
    /// relationship exactly once.
    pub fn undirected_edges(&self) -> impl Iterator<Item = &Edge> {
        self.nodes
            .iter()
            .flat_map(|node| node.edges.iter())
            .filter(|edge| edge.source < edge.target)
    }

    /// Places the nodes evenly on a circle of `radius` around the origin,
    /// node `i` of `n` at angle `2πi / n`.
    pub fn arrange_on_circle(&mut self, radius: f32) {
        let count = self.nodes.len() as f32;
        for (i, node) in self.nodes.iter_mut().enumerate() {
            let angle = i as f32 / count * TAU;
            node.position = Point::from_polar(angle, radius);
        }
    }

    fn validate_edge(
        &self,
        source: NodeId,
        target: NodeId,
        strength: f32,
    ) -> Result<(), GraphError> {
        for id in [source, target] {
            if id.index() >= self.nodes.len() {
                return Err(GraphError::UnknownNode(id));
            }
        }
        if source == target {
            return Err(GraphError::SelfLoop(source));
        }
        if !(0.0..=1.0).contains(&strength) {
            return Err(GraphError::InvalidStrength(strength));
        }
        Ok(())
    }

    fn push_edge(&mut self, source: NodeId, target: NodeId, strength: f32, kind: EdgeKind) {
        self.nodes[source.index()].edges.push(Edge {
            source,
            target,
            strength,
            kind,
        });
    }
}
