//! Per-run collision tally and frame timing

use std::collections::BTreeMap;

use arcade_core::prelude::*;
use log::info;

/// Unordered pair of layers; the smaller layer comes first
pub type LayerPair = (CollisionLayer, CollisionLayer);

fn layer_pair(a: CollisionLayer, b: CollisionLayer) -> LayerPair {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Accumulates what the collision pass reported over a run
#[derive(Debug, Clone, Default)]
pub struct FieldReport {
    frames: u32,
    total_frame_ms: f64,
    worst_frame_ms: f64,
    collisions: usize,
    peak_collisions: usize,
    by_layers: BTreeMap<LayerPair, usize>,
    budget_overruns: u64,
}

impl FieldReport {
    /// Empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold in the events and timing of the frame `system` just ran
    pub fn record(&mut self, system: &CollisionSystem) {
        let frame_ms = system.last_frame_time_ms();
        self.frames += 1;
        self.total_frame_ms += frame_ms;
        self.worst_frame_ms = self.worst_frame_ms.max(frame_ms);

        let events = system.collisions();
        self.collisions += events.len();
        self.peak_collisions = self.peak_collisions.max(events.len());
        for event in events {
            *self
                .by_layers
                .entry(layer_pair(event.layer_a, event.layer_b))
                .or_insert(0) += 1;
        }
        self.budget_overruns = system.budget_overruns();
    }

    /// Frames recorded
    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Collision events over the whole run
    pub fn total_collisions(&self) -> usize {
        self.collisions
    }

    /// Most collision events in a single frame
    pub fn peak_collisions(&self) -> usize {
        self.peak_collisions
    }

    /// Events for one layer pair, in either order
    pub fn collisions_between(&self, a: CollisionLayer, b: CollisionLayer) -> usize {
        self.by_layers.get(&layer_pair(a, b)).copied().unwrap_or(0)
    }

    /// Event counts per layer pair
    pub fn by_layers(&self) -> &BTreeMap<LayerPair, usize> {
        &self.by_layers
    }

    /// Mean collision pass time in milliseconds
    pub fn average_frame_ms(&self) -> f64 {
        if self.frames == 0 {
            0.0
        } else {
            self.total_frame_ms / f64::from(self.frames)
        }
    }

    /// Slowest collision pass in milliseconds
    pub fn worst_frame_ms(&self) -> f64 {
        self.worst_frame_ms
    }

    /// Frames whose collision pass went over budget
    pub fn budget_overruns(&self) -> u64 {
        self.budget_overruns
    }

    /// Write the summary to the log
    pub fn log_summary(&self) {
        info!(
            "{} frames: {} collisions (peak {} per frame)",
            self.frames, self.collisions, self.peak_collisions
        );
        for ((a, b), count) in self.by_layers() {
            info!("  {a:?} <-> {b:?}: {count}");
        }
        info!(
            "Collision pass: avg {:.3} ms, max {:.3} ms, {} over budget",
            self.average_frame_ms(),
            self.worst_frame_ms,
            self.budget_overruns
        );
    }
}
