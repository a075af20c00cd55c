//! Collision detection settings

use serde::{Deserialize, Serialize};

use super::{Config, ConfigError};
use crate::spatial::BoundaryMode;

/// Settings for the collision pass and its broad-phase grid
///
/// Missing fields fall back to the defaults, so a config file only needs to
/// name what it changes:
///
/// ```toml
/// cell_size = 80.0
/// boundary = "wrap"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Edge length of one grid cell, in world units
    pub cell_size: f32,

    /// Width of the play field covered by the grid
    pub width: f32,

    /// Height of the play field covered by the grid
    pub height: f32,

    /// How positions outside the play field map onto grid cells
    pub boundary: BoundaryMode,

    /// Radius used for colliders that do not set one
    pub default_radius: f32,

    /// Soft time budget for one collision pass, in milliseconds
    pub frame_budget_ms: f64,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            cell_size: 100.0,
            width: 2000.0,
            height: 2000.0,
            boundary: BoundaryMode::Clamp,
            default_radius: 20.0,
            frame_budget_ms: 5.0,
        }
    }
}

impl Config for CollisionConfig {}

impl CollisionConfig {
    /// Check that every value is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("cell_size", self.cell_size),
            ("width", self.width),
            ("height", self.height),
            ("default_radius", self.default_radius),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }

        if !self.frame_budget_ms.is_finite() || self.frame_budget_ms <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "frame_budget_ms must be a positive number, got {}",
                self.frame_budget_ms
            )));
        }

        Ok(())
    }
}
