//! CLI logic for the Settle layout tool.
//!
//! Generates a random demo graph, lays it out with [`LayoutEngine`] in the
//! configured drive mode and writes the final positions as TOML.

pub mod error_adapter;

mod args;
mod config;
mod generate;

pub use args::{Args, Mode};
pub use error_adapter::ErrorAdapter;

use std::{
    fs,
    io::{self, Write},
};

use log::{debug, info};
use serde::Serialize;

use settle::{
    LayoutEngine, RunSummary, SettleError, Snapshot, config::DriveMode, graph::Edge,
    identifier::NodeId,
};

use config::AppConfig;

/// Final position of one node
#[derive(Debug, Serialize)]
struct NodeReport {
    id: NodeId,
    x: f32,
    y: f32,
}

/// Everything written to the output file
#[derive(Debug, Serialize)]
struct LayoutReport {
    mode: DriveMode,
    publications: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<RunSummary>,
    nodes: Vec<NodeReport>,
    edges: Vec<Edge>,
}

/// Run the Settle CLI application
///
/// This function generates the graph, runs the layout to completion and
/// writes the result to the output file, or stdout when none is given.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `SettleError` for:
/// - File I/O errors
/// - Configuration loading or validation errors
/// - Graph construction errors
/// - Layout start errors (empty graph, invalid radius)
pub fn run(args: &Args) -> Result<(), SettleError> {
    let mut app_config = config::load_config(args.config.as_ref())?;
    apply_overrides(args, &mut app_config);
    app_config.validate()?;

    let generator = app_config.generator();
    info!(
        node_count = generator.node_count(),
        connection_probability = generator.connection_probability(),
        mode:? = app_config.layout().drive_mode();
        "Laying out graph"
    );

    let mut graph = generate::generate(generator)?;
    let edges: Vec<Edge> = graph.undirected_edges().copied().collect();

    let mut publications = 0usize;
    let mut latest: Option<Snapshot> = None;
    let summary = {
        let mut engine = LayoutEngine::new(app_config.layout().clone())?;
        engine.start(&mut graph, generator.world_radius())?;
        engine.drive(&mut |snapshot: &Snapshot| {
            publications += 1;
            debug!(iteration = snapshot.iteration(); "Positions published");
            latest = Some(snapshot.clone());
        });
        engine.summary()
    };

    let nodes: Vec<NodeReport> = latest
        .as_ref()
        .map(|snapshot| {
            snapshot
                .iter()
                .map(|(id, position)| NodeReport {
                    id,
                    x: position.x(),
                    y: position.y(),
                })
                .collect()
        })
        .unwrap_or_default();

    let report = LayoutReport {
        mode: app_config.layout().drive_mode(),
        publications,
        summary,
        nodes,
        edges,
    };
    let content = toml::to_string(&report).map_err(io::Error::other)?;

    match &args.output {
        Some(path) => {
            fs::write(path, content)?;
            info!(output_file = path; "Layout exported successfully");
        }
        None => io::stdout().write_all(content.as_bytes())?,
    }

    Ok(())
}

fn apply_overrides(args: &Args, config: &mut AppConfig) {
    let generator = config.generator_mut();
    if let Some(count) = args.nodes {
        generator.set_node_count(count);
    }
    if let Some(probability) = args.probability {
        generator.set_connection_probability(probability);
    }
    if let Some(radius) = args.radius {
        generator.set_world_radius(radius);
    }
    if let Some(seed) = args.seed {
        generator.set_seed(seed);
    }
    if let Some(mode) = args.mode {
        config.layout_mut().set_drive_mode(mode.into());
    }
}
