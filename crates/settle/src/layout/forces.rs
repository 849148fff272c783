//! The three phases of a Fruchterman–Reingold iteration.
//!
//! Both force passes only write velocities; positions change only in
//! [`integrate`]. Every pair therefore sees the positions as they stood at the
//! start of the iteration, whatever order pairs are visited in.

use settle_core::{geometry::Point, graph::Node};

use super::jitter::Jitter;
use crate::config::LayoutConfig;

/// Squared distance under which two positions count as coincident.
pub(crate) const MIN_DISTANCE_SQUARED: f32 = 1e-4;

/// Per-run constants of the force model.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ForceModel {
    /// Optimal distance `k`.
    k: f32,
    k_squared: f32,
    attraction_strength: f32,
    repulsion_strength: f32,
    cutoff_squared: f32,
    /// Longest step a node may take in one integration.
    max_displacement: f32,
}

impl ForceModel {
    pub(crate) fn new(config: &LayoutConfig, k: f32) -> Self {
        let cutoff = config.repulsion_cutoff() * k;
        Self {
            k,
            k_squared: k * k,
            attraction_strength: config.attraction_strength(),
            repulsion_strength: config.repulsion_strength(),
            cutoff_squared: cutoff * cutoff,
            max_displacement: config.max_displacement() * k,
        }
    }
}

/// Pushes every pair of nodes apart with magnitude `repulsion · k² / d`.
///
/// Pairs beyond the cutoff are skipped before any square root is taken.
/// Coincident pairs are separated along a jittered direction instead of
/// dividing by a vanishing distance.
pub(crate) fn apply_repulsion(nodes: &mut [Node], model: &ForceModel, jitter: &mut Jitter) {
    for i in 0..nodes.len() {
        for j in (i + 1)..nodes.len() {
            let mut delta = nodes[i].position().sub_point(nodes[j].position());
            let mut distance_squared = delta.length_squared();

            if distance_squared > model.cutoff_squared {
                continue;
            }
            if distance_squared < MIN_DISTANCE_SQUARED {
                delta = jitter.displacement();
                distance_squared = delta.length_squared();
            }

            let distance = distance_squared.sqrt();
            let magnitude = model.repulsion_strength * model.k_squared / distance;
            let force = delta.scale(magnitude / distance);

            add_velocity(&mut nodes[i], force);
            add_velocity(&mut nodes[j], -force);
        }
    }
}

/// Pulls connected nodes together with magnitude `attraction · d² / k`.
///
/// Only edges with `source < target` are visited, so a reciprocal pair is
/// counted once.
pub(crate) fn apply_attraction(nodes: &mut [Node], model: &ForceModel) {
    for owner in 0..nodes.len() {
        for slot in 0..nodes[owner].edges().len() {
            let edge = nodes[owner].edges()[slot];
            let (source, target) = (edge.source().index(), edge.target().index());
            if source >= target {
                continue;
            }

            let delta = nodes[target].position().sub_point(nodes[source].position());
            let distance_squared = delta.length_squared();
            if distance_squared < MIN_DISTANCE_SQUARED {
                continue;
            }

            let distance = distance_squared.sqrt();
            let magnitude = model.attraction_strength * distance_squared / model.k;
            let force = delta.scale(magnitude / distance);

            add_velocity(&mut nodes[source], force);
            add_velocity(&mut nodes[target], -force);
        }
    }
}

/// Moves every node by `velocity · time_step`, then damps its velocity.
///
/// A step longer than the model's displacement cap is shortened to the cap,
/// keeping its direction. The velocity itself is not clamped.
///
/// Returns the largest speed seen before damping, or infinity if any speed
/// is not finite.
pub(crate) fn integrate(
    nodes: &mut [Node],
    model: &ForceModel,
    time_step: f32,
    damping: f32,
) -> f32 {
    let mut max_velocity = 0.0f32;
    for node in nodes {
        let velocity = node.velocity();
        let speed = velocity.hypot();
        max_velocity = if speed.is_finite() {
            max_velocity.max(speed)
        } else {
            f32::INFINITY
        };

        let mut step = velocity.scale(time_step);
        let length = step.hypot();
        if length > model.max_displacement {
            step = step.scale(model.max_displacement / length);
        }
        node.set_position(node.position().add_point(step));
        node.set_velocity(velocity.scale(damping));
    }
    max_velocity
}

fn add_velocity(node: &mut Node, force: Point) {
    node.set_velocity(node.velocity().add_point(force));
}

#[cfg(test)]
mod tests {
    use std::f32::consts::PI;

    use float_cmp::assert_approx_eq;

    use settle_core::{
        graph::{EdgeKind, Graph},
        identifier::NodeId,
    };

    use super::*;

    const RADIUS: f32 = 5.0;

    /// `count` nodes stacked at the origin.
    fn graph_at_origin(count: usize) -> Graph {
        let mut graph = Graph::new();
        for _ in 0..count {
            graph.add_node(Point::ZERO);
        }
        graph
    }

    fn place(graph: &mut Graph, positions: &[(f32, f32)]) {
        for (node, &(x, y)) in graph.nodes_mut().iter_mut().zip(positions) {
            node.set_position(Point::new(x, y));
        }
    }

    fn connect(graph: &mut Graph, a: usize, b: usize) {
        graph
            .connect(NodeId::new(a), NodeId::new(b), 1.0, EdgeKind::Colleague)
            .unwrap();
    }

    /// Force model as a default run over `graph` with the given radius would derive it.
    fn model_for(graph: &Graph, radius: f32) -> ForceModel {
        let config = LayoutConfig::default();
        let area = PI * radius * radius;
        let k = config.base_optimal_distance() * (area / graph.len() as f32).sqrt();
        ForceModel::new(&config, k)
    }

    fn jitter() -> Jitter {
        Jitter::new(0, LayoutConfig::default().jitter_distance())
    }

    fn velocity(graph: &Graph, index: usize) -> Point {
        graph.nodes()[index].velocity()
    }

    #[test]
    fn test_repulsion_two_nodes_equal_and_opposite() {
        let mut graph = graph_at_origin(2);
        place(&mut graph, &[(0.0, 0.0), (1.0, 0.0)]);
        let model = model_for(&graph, RADIUS);

        apply_repulsion(graph.nodes_mut(), &model, &mut jitter());

        let (v0, v1) = (velocity(&graph, 0), velocity(&graph, 1));
        assert!(!v0.is_zero());
        assert!(!v1.is_zero());
        assert_eq!(v0, -v1);
        // Node 0 sits left of node 1 and is pushed further left
        assert!(v0.x() < 0.0);
        assert_eq!(v0.y(), 0.0);
    }

    #[test]
    fn test_repulsion_magnitude_is_inverse_linear() {
        let mut graph = graph_at_origin(2);
        place(&mut graph, &[(0.0, 0.0), (2.0, 0.0)]);
        let model = model_for(&graph, RADIUS);

        apply_repulsion(graph.nodes_mut(), &model, &mut jitter());

        let expected = 10.0 * model.k_squared / 2.0;
        assert_approx_eq!(f32, velocity(&graph, 1).x(), expected, ulps = 4);
    }

    #[test]
    fn test_repulsion_ignores_pairs_beyond_cutoff() {
        let mut graph = graph_at_origin(2);
        place(&mut graph, &[(0.0, 0.0), (1000.0, 0.0)]);
        let model = model_for(&graph, RADIUS);

        apply_repulsion(graph.nodes_mut(), &model, &mut jitter());

        assert_eq!(velocity(&graph, 0), Point::ZERO);
        assert_eq!(velocity(&graph, 1), Point::ZERO);
    }

    #[test]
    fn test_repulsion_separates_coincident_nodes() {
        let mut graph = graph_at_origin(2);
        let model = model_for(&graph, RADIUS);

        apply_repulsion(graph.nodes_mut(), &model, &mut jitter());

        let (v0, v1) = (velocity(&graph, 0), velocity(&graph, 1));
        assert!(!v0.is_zero());
        assert!(!v1.is_zero());
        assert!(v0.is_finite());
        assert!(v1.is_finite());
        assert_eq!(v0, -v1);
    }

    #[test]
    fn test_repulsion_treats_near_coincident_as_coincident() {
        let mut graph = graph_at_origin(2);
        place(&mut graph, &[(0.0, 0.0), (0.001, 0.0)]);
        let model = model_for(&graph, RADIUS);

        apply_repulsion(graph.nodes_mut(), &model, &mut jitter());

        // The jittered displacement is 0.1 long, far gentler than 1 / 0.001
        let expected = 10.0 * model.k_squared / 0.1;
        assert_approx_eq!(f32, velocity(&graph, 0).hypot(), expected, epsilon = 1.0);
    }

    #[test]
    fn test_repulsion_closer_neighbours_push_harder() {
        let mut graph = graph_at_origin(3);
        place(&mut graph, &[(0.0, 0.0), (0.7, 0.0), (1.0, 0.0)]);
        let model = model_for(&graph, RADIUS);

        apply_repulsion(graph.nodes_mut(), &model, &mut jitter());

        for i in 0..3 {
            assert!(!velocity(&graph, i).is_zero(), "node {i} should move");
        }
        // The end node's neighbour is closer than the start node's
        assert!(velocity(&graph, 2).hypot() > velocity(&graph, 0).hypot());
    }

    #[test]
    fn test_attraction_pulls_connected_nodes_together() {
        let mut graph = graph_at_origin(2);
        place(&mut graph, &[(0.0, 0.0), (10.0, 0.0)]);
        connect(&mut graph, 0, 1);
        let model = model_for(&graph, RADIUS);

        apply_attraction(graph.nodes_mut(), &model);

        let (v0, v1) = (velocity(&graph, 0), velocity(&graph, 1));
        assert!(!v0.is_zero());
        assert!(!v1.is_zero());
        assert_eq!(v0, -v1);
        assert!(v0.x() > 0.0, "source should move towards target");

        // Reciprocal edges are counted once: |F| = d² / k
        assert_approx_eq!(f32, v0.x(), 100.0 / model.k, ulps = 4);
    }

    #[test]
    fn test_attraction_without_edges_changes_nothing() {
        let mut graph = graph_at_origin(2);
        place(&mut graph, &[(0.0, 0.0), (1.0, 0.0)]);
        let model = model_for(&graph, RADIUS);

        apply_attraction(graph.nodes_mut(), &model);

        assert_eq!(velocity(&graph, 0), Point::ZERO);
        assert_eq!(velocity(&graph, 1), Point::ZERO);
    }

    #[test]
    fn test_attraction_skips_coincident_endpoints() {
        let mut graph = graph_at_origin(2);
        connect(&mut graph, 0, 1);
        let model = model_for(&graph, RADIUS);

        apply_attraction(graph.nodes_mut(), &model);

        assert_eq!(velocity(&graph, 0), Point::ZERO);
        assert_eq!(velocity(&graph, 1), Point::ZERO);
    }

    #[test]
    fn test_attraction_star_moves_every_node() {
        let mut graph = graph_at_origin(5);
        place(
            &mut graph,
            &[(0.0, 0.0), (3.0, 0.0), (0.0, 2.0), (-1.0, 0.0), (0.0, -4.0)],
        );
        for leaf in 1..5 {
            connect(&mut graph, 0, leaf);
        }
        let model = model_for(&graph, 10.0);

        apply_attraction(graph.nodes_mut(), &model);

        assert!(!velocity(&graph, 0).is_zero(), "centre should feel a net pull");
        for leaf in 1..5 {
            assert!(!velocity(&graph, leaf).is_zero(), "leaf {leaf} should move");
        }
    }

    #[test]
    fn test_attraction_ignores_lone_edge_pointing_down() {
        let mut graph = graph_at_origin(2);
        place(&mut graph, &[(0.0, 0.0), (10.0, 0.0)]);
        graph
            .add_edge(NodeId::new(1), NodeId::new(0), 1.0, EdgeKind::Manager)
            .unwrap();
        let model = model_for(&graph, RADIUS);

        apply_attraction(graph.nodes_mut(), &model);

        assert_eq!(velocity(&graph, 0), Point::ZERO);
        assert_eq!(velocity(&graph, 1), Point::ZERO);
    }

    #[test]
    fn test_attraction_leaves_disconnected_repulsion_untouched() {
        let mut graph = graph_at_origin(3);
        place(&mut graph, &[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]);
        let model = model_for(&graph, RADIUS);

        apply_repulsion(graph.nodes_mut(), &model, &mut jitter());
        let after_repulsion: Vec<_> = graph.nodes().iter().map(Node::velocity).collect();
        assert!(!after_repulsion[0].is_zero());

        apply_attraction(graph.nodes_mut(), &model);
        let after_attraction: Vec<_> = graph.nodes().iter().map(Node::velocity).collect();
        assert_eq!(after_repulsion, after_attraction);
    }

    #[test]
    fn test_single_node_feels_no_force() {
        let mut graph = graph_at_origin(1);
        place(&mut graph, &[(5.0, 5.0)]);
        let model = model_for(&graph, RADIUS);

        apply_repulsion(graph.nodes_mut(), &model, &mut jitter());
        apply_attraction(graph.nodes_mut(), &model);

        assert_eq!(velocity(&graph, 0), Point::ZERO);
    }

    #[test]
    fn test_force_passes_do_not_move_nodes() {
        let mut graph = graph_at_origin(3);
        place(&mut graph, &[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]);
        connect(&mut graph, 0, 2);
        let before: Vec<_> = graph.nodes().iter().map(Node::position).collect();
        let model = model_for(&graph, RADIUS);

        apply_repulsion(graph.nodes_mut(), &model, &mut jitter());
        apply_attraction(graph.nodes_mut(), &model);

        let after: Vec<_> = graph.nodes().iter().map(Node::position).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_integrate_moves_along_velocity() {
        let mut graph = graph_at_origin(1);
        graph.nodes_mut()[0].set_velocity(Point::new(10.0, 5.0));
        let model = model_for(&graph, RADIUS);

        let max_velocity = integrate(graph.nodes_mut(), &model, 0.01, 0.85);

        let position = graph.nodes()[0].position();
        assert!(position.x() > 0.0);
        assert!(position.y() > 0.0);
        assert_approx_eq!(f32, position.x(), 0.1);
        assert_approx_eq!(f32, position.y(), 0.05);
        assert_approx_eq!(f32, max_velocity, Point::new(10.0, 5.0).hypot());
    }

    #[test]
    fn test_integrate_damps_monotonically() {
        let mut graph = graph_at_origin(1);
        graph.nodes_mut()[0].set_velocity(Point::new(100.0, 0.0));
        let model = model_for(&graph, RADIUS);

        let mut speed = 100.0;
        let mut x = 0.0;
        for _ in 0..20 {
            integrate(graph.nodes_mut(), &model, 0.01, 0.85);
            let node = &graph.nodes()[0];
            assert!(node.velocity().hypot() < speed, "speed should keep decreasing");
            assert!(node.position().x() > x, "node should keep moving forward");
            speed = node.velocity().hypot();
            x = node.position().x();
        }
    }

    #[test]
    fn test_integrate_zero_velocity_stays_put() {
        let mut graph = graph_at_origin(1);
        place(&mut graph, &[(5.0, 5.0)]);
        let model = model_for(&graph, RADIUS);

        let max_velocity = integrate(graph.nodes_mut(), &model, 0.01, 0.85);

        assert_eq!(graph.nodes()[0].position(), Point::new(5.0, 5.0));
        assert_eq!(max_velocity, 0.0);
    }

    #[test]
    fn test_integrate_caps_displacement_at_k() {
        let mut graph = graph_at_origin(1);
        graph.nodes_mut()[0].set_velocity(Point::new(0.0, -1.0e7));
        let model = model_for(&graph, RADIUS);

        let max_velocity = integrate(graph.nodes_mut(), &model, 0.01, 0.85);

        let node = &graph.nodes()[0];
        assert_approx_eq!(f32, node.position().x(), 0.0);
        assert_approx_eq!(f32, node.position().y(), -model.k, ulps = 4);
        // Speed is reported and damped as usual
        assert_approx_eq!(f32, max_velocity, 1.0e7);
        assert_approx_eq!(f32, node.velocity().y(), -0.85e7, ulps = 4);
    }

    #[test]
    fn test_integrate_reports_non_finite_speed_as_infinite() {
        let mut graph = graph_at_origin(3);
        graph.nodes_mut()[0].set_velocity(Point::new(1.0, 0.0));
        graph.nodes_mut()[1].set_velocity(Point::new(f32::NAN, 0.0));
        graph.nodes_mut()[2].set_velocity(Point::new(2.0, 0.0));
        let model = model_for(&graph, RADIUS);

        let max_velocity = integrate(graph.nodes_mut(), &model, 0.01, 0.85);

        assert_eq!(max_velocity, f32::INFINITY);
    }
}
