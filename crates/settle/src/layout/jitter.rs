//! Deterministic displacement for coincident nodes.

use std::f32::consts::TAU;

use rand::{Rng, SeedableRng, rngs::StdRng};

use settle_core::geometry::Point;

/// Source of small random displacements used when two nodes overlap.
///
/// Seeded once per run, so identical inputs always separate the same way.
#[derive(Debug, Clone)]
pub(crate) struct Jitter {
    rng: StdRng,
    distance: f32,
}

impl Jitter {
    pub(crate) fn new(seed: u64, distance: f32) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            distance,
        }
    }

    /// Returns a vector of length `distance` in a random direction.
    pub(crate) fn displacement(&mut self) -> Point {
        let angle = self.rng.random_range(0.0..TAU);
        Point::from_polar(angle, self.distance)
    }
}
