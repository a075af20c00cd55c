//! Frame timing utilities

use std::time::{Duration, Instant};

/// Stopwatch for measuring how long a piece of per-frame work takes
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    started: Instant,
}

impl Stopwatch {
    /// Start measuring now
    pub fn start() -> Self {
        Self { started: Instant::now() }
    }

    /// Time elapsed since the stopwatch was started
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Time elapsed since the stopwatch was started, in milliseconds
    pub fn elapsed_millis(&self) -> f64 {
        self.elapsed().as_secs_f64() * 1000.0
    }
}

/// Soft per-frame time budget
///
/// Overruns are counted and logged, never treated as errors: a slow frame
/// still runs to completion.
#[derive(Debug, Clone)]
pub struct FrameBudget {
    label: &'static str,
    budget_ms: f64,
    overruns: u64,
}

impl FrameBudget {
    /// Create a budget of `budget_ms` milliseconds for the named pass
    pub fn new(label: &'static str, budget_ms: f64) -> Self {
        Self {
            label,
            budget_ms,
            overruns: 0,
        }
    }

    /// Record a frame's duration; returns `true` when it was over budget
    pub fn record(&mut self, elapsed_ms: f64) -> bool {
        if elapsed_ms > self.budget_ms {
            self.overruns += 1;
            log::warn!(
                "{} took {:.3} ms, over the {:.1} ms budget ({} overruns so far)",
                self.label,
                elapsed_ms,
                self.budget_ms,
                self.overruns
            );
            true
        } else {
            false
        }
    }

    /// Budget in milliseconds
    pub fn budget_ms(&self) -> f64 {
        self.budget_ms
    }

    /// Number of frames that exceeded the budget
    pub fn overruns(&self) -> u64 {
        self.overruns
    }
}
