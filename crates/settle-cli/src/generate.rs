//! Random demo graph generation.

use log::info;
use rand::{Rng, SeedableRng, rngs::StdRng};

use settle::{
    geometry::Point,
    graph::{EdgeKind, Graph, GraphError},
    identifier::NodeId,
};

use crate::config::GeneratorConfig;

/// Builds a graph of `node_count` nodes evenly spaced on a circle.
///
/// Every unordered pair is linked by a reciprocal [`EdgeKind::Colleague`]
/// edge with probability `connection_probability`, with a strength drawn
/// from `[0.3, 1)`. The same seed always yields the same graph.
pub fn generate(config: &GeneratorConfig) -> Result<Graph, GraphError> {
    let count = config.node_count();
    let mut rng = StdRng::seed_from_u64(config.seed());

    let mut graph = Graph::with_capacity(count);
    for _ in 0..count {
        graph.add_node(Point::ZERO);
    }
    graph.arrange_on_circle(config.world_radius());

    for i in 0..count {
        for j in (i + 1)..count {
            if rng.random::<f32>() < config.connection_probability() {
                let strength = rng.random_range(0.3..1.0);
                graph.connect(NodeId::new(i), NodeId::new(j), strength, EdgeKind::Colleague)?;
            }
        }
    }

    info!(
        node_count = graph.len(),
        edge_count = graph.edge_count();
        "Generated graph"
    );
    Ok(graph)
}
