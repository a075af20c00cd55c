//! Asteroid field
//!
//! Headless run of the arcade core: spawns a seeded asteroid field, moves it
//! with a fixed time step and runs the collision pass every frame, then logs
//! what collided and how long the passes took.
//!
//! ```text
//! asteroid_field [config.toml | config.ron]
//! ```
//!
//! Set `RUST_LOG=debug` for per-frame output.

use arcade_core::config::{Config, ConfigError};
use arcade_core::foundation::logging;
use arcade_core::prelude::*;
use log::info;
use thiserror::Error;

mod components;
mod config;
mod field;
mod movement;
mod report;

use config::FieldConfig;
use field::FieldSpawner;
use movement::MovementSystem;
use report::FieldReport;

/// Errors that end a run
#[derive(Debug, Error)]
pub enum FieldError {
    /// Configuration could not be loaded or is invalid
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Spawning touched an entity that was not alive
    #[error("world error: {0}")]
    Ecs(#[from] EcsError),
}

fn main() -> Result<(), FieldError> {
    logging::init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!("Loading field config from {path}");
            FieldConfig::load_from_file(&path)?
        }
        None => FieldConfig::default(),
    };

    let report = run(&config)?;
    report.log_summary();
    Ok(())
}

/// Simulate `config.frames` frames and return the collected report
pub fn run(config: &FieldConfig) -> Result<FieldReport, FieldError> {
    config.validate()?;

    let mut world = World::new();
    let population = FieldSpawner::new(config).populate(&mut world)?;
    info!(
        "Field of {} entities, {}x{} grid cells of {}",
        population.len(),
        config.collision.width,
        config.collision.height,
        config.collision.cell_size
    );

    let mut movement = MovementSystem::new();
    let mut collision = CollisionSystem::new(config.collision.clone());
    let mut report = FieldReport::new();

    for _ in 0..config.frames {
        movement.run(&mut world, config.timestep);
        collision.run(&mut world, config.timestep);
        report.record(&collision);
    }

    Ok(report)
}
