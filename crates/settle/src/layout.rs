//! Fruchterman–Reingold layout engine.
//!
//! [`LayoutEngine`] runs the force simulation over a borrowed [`Graph`]. A run
//! is created by [`LayoutEngine::start`] and advanced one iteration at a time
//! with [`LayoutEngine::step`] (or through the drivers in
//! [`drive`](crate::drive)). Each iteration accumulates repulsive and
//! attractive forces into node velocities, then integrates positions and damps
//! velocities. The run ends when the fastest node drops below the convergence
//! threshold or the iteration cap is hit.
//!
//! ```text
//!            start()              step() ... step()
//!   Idle ────────────► Running ─────────────────────► Complete(Converged)
//!                        ▲  │                      └► Complete(MaxIterationsReached)
//!                        └──┘ start() restarts
//! ```

mod forces;
mod jitter;

use std::f32::consts::PI;

use log::{debug, info, trace, warn};
use serde::Serialize;

use settle_core::graph::Graph;

use crate::{
    config::{ConfigError, LayoutConfig},
    error::LayoutError,
    snapshot::Snapshot,
};
use forces::ForceModel;
use jitter::Jitter;

/// Why a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Completion {
    /// The fastest node moved slower than the convergence threshold.
    Converged,
    /// The iteration cap was reached first.
    MaxIterationsReached,
}

/// Lifecycle of the engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LayoutState {
    /// No run has been started.
    #[default]
    Idle,
    /// A run is in progress.
    Running,
    /// The run has finished; further steps are no-ops.
    Complete(Completion),
}

impl LayoutState {
    /// Returns `true` for [`LayoutState::Running`]
    pub fn is_running(self) -> bool {
        self == Self::Running
    }

    /// Returns `true` for either completion variant
    pub fn is_complete(self) -> bool {
        matches!(self, Self::Complete(_))
    }

    /// Returns the completion reason, if complete
    pub fn completion(self) -> Option<Completion> {
        match self {
            Self::Complete(completion) => Some(completion),
            _ => None,
        }
    }
}

/// Outcome of a finished run
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RunSummary {
    completion: Completion,
    iterations: usize,
    max_velocity: f32,
    optimal_distance: f32,
}

impl RunSummary {
    /// Returns why the run stopped
    pub fn completion(&self) -> Completion {
        self.completion
    }

    /// Returns the number of iterations performed
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Returns the fastest node speed seen in the final iteration
    pub fn max_velocity(&self) -> f32 {
        self.max_velocity
    }

    /// Returns the optimal distance `k` used by the run
    pub fn optimal_distance(&self) -> f32 {
        self.optimal_distance
    }
}

/// State of a single run over a borrowed graph
#[derive(Debug)]
struct LayoutRun<'g> {
    graph: &'g mut Graph,
    model: ForceModel,
    optimal_distance: f32,
    iteration: usize,
    max_velocity: f32,
    jitter: Jitter,
}

impl LayoutRun<'_> {
    /// Performs one repulse, attract, integrate pass.
    fn iterate(&mut self, config: &LayoutConfig) -> Option<Completion> {
        let nodes = self.graph.nodes_mut();
        forces::apply_repulsion(nodes, &self.model, &mut self.jitter);
        forces::apply_attraction(nodes, &self.model);
        self.max_velocity =
            forces::integrate(nodes, &self.model, config.time_step(), config.damping());
        self.iteration += 1;

        trace!(
            iteration = self.iteration,
            max_velocity = self.max_velocity;
            "Layout iteration"
        );

        // A non-finite speed compares false here and never counts as converged
        if self.max_velocity < config.convergence_threshold() {
            Some(Completion::Converged)
        } else if self.iteration >= config.max_iterations() {
            Some(Completion::MaxIterationsReached)
        } else {
            None
        }
    }

    fn summary(&self, completion: Completion) -> RunSummary {
        RunSummary {
            completion,
            iterations: self.iteration,
            max_velocity: self.max_velocity,
            optimal_distance: self.optimal_distance,
        }
    }
}

/// Force-directed layout engine
///
/// The engine is an ordinary value owned by the caller. It holds the mutable
/// borrow of the graph for as long as a run may still touch it, so nothing
/// else can observe half-accumulated velocities.
///
/// # Examples
///
/// ```
/// use settle::{
///     LayoutEngine, LayoutState,
///     config::LayoutConfig,
///     geometry::Point,
///     graph::{EdgeKind, Graph},
/// };
///
/// let mut graph = Graph::new();
/// let a = graph.add_node(Point::ZERO);
/// let b = graph.add_node(Point::ZERO);
/// let c = graph.add_node(Point::ZERO);
/// graph.connect(a, b, 0.9, EdgeKind::Colleague).unwrap();
/// graph.arrange_on_circle(5.0);
///
/// let mut engine = LayoutEngine::new(LayoutConfig::default()).unwrap();
/// engine.start(&mut graph, 5.0).unwrap();
/// while engine.is_running() {
///     engine.step();
/// }
/// assert!(engine.is_complete());
/// assert!(engine.iteration() <= 300);
/// # let _ = c;
/// ```
#[derive(Debug)]
pub struct LayoutEngine<'g> {
    config: LayoutConfig,
    state: LayoutState,
    run: Option<LayoutRun<'g>>,
}

impl Default for LayoutEngine<'_> {
    fn default() -> Self {
        Self {
            config: LayoutConfig::default(),
            state: LayoutState::Idle,
            run: None,
        }
    }
}

impl<'g> LayoutEngine<'g> {
    /// Create a new idle engine with the given configuration
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration fails
    /// [`LayoutConfig::validate`].
    pub fn new(config: LayoutConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            state: LayoutState::Idle,
            run: None,
        })
    }

    /// Returns the engine configuration
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Starts a run over `graph`, replacing any run in progress.
    ///
    /// `world_radius` is the extent of the initial placement. With auto-scale
    /// on, the optimal distance is
    /// `k = base_optimal_distance * sqrt(π * world_radius² / node_count)`,
    /// otherwise `k = base_optimal_distance`. Node positions and velocities
    /// are not touched.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::EmptyGraph`] if the graph has no nodes and
    /// [`LayoutError::InvalidRadius`] if the radius is not positive and
    /// finite. Both are logged as warnings; the engine keeps its previous
    /// state and no computation happens.
    pub fn start(&mut self, graph: &'g mut Graph, world_radius: f32) -> Result<(), LayoutError> {
        if graph.is_empty() {
            let err = LayoutError::EmptyGraph;
            warn!("Layout not started: {err}");
            return Err(err);
        }
        if !(world_radius.is_finite() && world_radius > 0.0) {
            let err = LayoutError::InvalidRadius(world_radius);
            warn!("Layout not started: {err}");
            return Err(err);
        }

        let node_count = graph.len();
        let optimal_distance = self.optimal_distance_for(node_count, world_radius);
        debug!(
            node_count,
            edge_count = graph.edge_count(),
            world_radius,
            optimal_distance;
            "Starting layout run"
        );

        if self.state.is_running() {
            info!("Restarting layout run in progress");
        }

        self.run = Some(LayoutRun {
            graph,
            model: ForceModel::new(&self.config, optimal_distance),
            optimal_distance,
            iteration: 0,
            max_velocity: 0.0,
            jitter: Jitter::new(self.config.jitter_seed(), self.config.jitter_distance()),
        });
        self.state = LayoutState::Running;
        Ok(())
    }

    /// Performs one iteration and returns the resulting state.
    ///
    /// Does nothing unless the engine is [`LayoutState::Running`].
    pub fn step(&mut self) -> LayoutState {
        if !self.state.is_running() {
            return self.state;
        }
        let Some(run) = self.run.as_mut() else {
            return self.state;
        };

        if let Some(completion) = run.iterate(&self.config) {
            match completion {
                Completion::Converged => info!(
                    iterations = run.iteration,
                    max_velocity = run.max_velocity;
                    "Layout converged"
                ),
                Completion::MaxIterationsReached => info!(
                    iterations = run.iteration,
                    max_velocity = run.max_velocity;
                    "Layout stopped at iteration cap"
                ),
            }
            self.state = LayoutState::Complete(completion);
        }
        self.state
    }

    /// Returns the current state
    pub fn state(&self) -> LayoutState {
        self.state
    }

    /// Returns `true` while a run is in progress
    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Returns `true` once the current run has finished
    pub fn is_complete(&self) -> bool {
        self.state.is_complete()
    }

    /// Returns the number of iterations performed by the current run
    pub fn iteration(&self) -> usize {
        self.run.as_ref().map_or(0, |run| run.iteration)
    }

    /// Returns the optimal distance `k` of the current run
    pub fn optimal_distance(&self) -> Option<f32> {
        self.run.as_ref().map(|run| run.optimal_distance)
    }

    /// Returns the fastest node speed seen in the latest iteration
    pub fn max_velocity(&self) -> Option<f32> {
        self.run.as_ref().map(|run| run.max_velocity)
    }

    /// Returns the summary of the finished run
    pub fn summary(&self) -> Option<RunSummary> {
        let completion = self.state.completion()?;
        self.run.as_ref().map(|run| run.summary(completion))
    }

    /// Returns a copy of every node position of the current run
    pub fn snapshot(&self) -> Option<Snapshot> {
        self.run
            .as_ref()
            .map(|run| Snapshot::capture(&*run.graph, run.iteration))
    }

    fn optimal_distance_for(&self, node_count: usize, world_radius: f32) -> f32 {
        let base = self.config.base_optimal_distance();
        if !self.config.auto_scale() {
            return base;
        }
        let area = PI * world_radius * world_radius;
        base * (area / node_count as f32).sqrt()
    }
}
