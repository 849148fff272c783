//! Drive modes: how iterations are scheduled and when positions are published.
//!
//! [`DriveMode::Animated`](crate::config::DriveMode::Animated) runs a few
//! iterations per external tick ([`LayoutEngine::tick`]) and publishes after
//! each one, so a presentation layer can show nodes moving.
//! [`DriveMode::Batch`](crate::config::DriveMode::Batch) runs to completion
//! ([`LayoutEngine::run_to_completion`]) and publishes once. The schedule
//! never changes the math, so both modes end in identical positions.

use log::debug;

use crate::{LayoutEngine, LayoutState, config::DriveMode, snapshot::Snapshot};

/// Receiver of position updates, typically a renderer syncing its sprites
pub trait PositionSink {
    /// Called with the latest node positions.
    fn publish(&mut self, snapshot: &Snapshot);
}

impl<F> PositionSink for F
where
    F: FnMut(&Snapshot),
{
    fn publish(&mut self, snapshot: &Snapshot) {
        self(snapshot)
    }
}

impl LayoutEngine<'_> {
    /// Performs up to `iterations_per_tick` iterations, then publishes.
    ///
    /// Stops early if the run completes mid-tick. Does nothing and publishes
    /// nothing unless a run is in progress.
    pub fn tick(&mut self, sink: &mut impl PositionSink) -> LayoutState {
        if !self.is_running() {
            return self.state();
        }
        for _ in 0..self.config().iterations_per_tick() {
            if !self.step().is_running() {
                break;
            }
        }
        self.publish(sink);
        self.state()
    }

    /// Iterates until the run completes, then publishes once.
    ///
    /// Does nothing and publishes nothing unless a run is in progress.
    pub fn run_to_completion(&mut self, sink: &mut impl PositionSink) -> LayoutState {
        if !self.is_running() {
            return self.state();
        }
        while self.step().is_running() {}
        self.publish(sink);
        self.state()
    }

    /// Runs the current layout to completion in the configured
    /// [`DriveMode`], publishing as that mode dictates.
    pub fn drive(&mut self, sink: &mut impl PositionSink) -> LayoutState {
        match self.config().drive_mode() {
            DriveMode::Animated => {
                let mut ticks = 0usize;
                while self.tick(sink).is_running() {
                    ticks += 1;
                }
                debug!(ticks; "Animated layout finished");
                self.state()
            }
            DriveMode::Batch => self.run_to_completion(sink),
        }
    }

    fn publish(&self, sink: &mut impl PositionSink) {
        if let Some(snapshot) = self.snapshot() {
            sink.publish(&snapshot);
        }
    }
}
