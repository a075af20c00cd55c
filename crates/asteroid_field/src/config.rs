//! Field configuration

use arcade_core::config::{CollisionConfig, Config, ConfigError};
use serde::{Deserialize, Serialize};

/// Settings for one headless field run
///
/// Every field has a default, so a config file can be as small as
///
/// ```toml
/// asteroid_count = 200
///
/// [collision]
/// cell_size = 64.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Seed for field generation; the same seed spawns the same field
    pub seed: u64,

    /// Number of frames to simulate
    pub frames: u32,

    /// Fixed time step in seconds
    pub timestep: f32,

    /// Asteroids to spawn
    pub asteroid_count: u32,

    /// Player projectiles to spawn
    pub projectile_count: u32,

    /// Power-ups to spawn
    pub power_up_count: u32,

    /// Enemy ships to spawn
    pub enemy_count: u32,

    /// Smallest asteroid radius
    pub asteroid_radius_min: f32,

    /// Largest asteroid radius
    pub asteroid_radius_max: f32,

    /// Top asteroid drift speed in world units per second
    pub asteroid_speed_max: f32,

    /// Projectile speed in world units per second
    pub projectile_speed: f32,

    /// Collision pass and grid settings
    pub collision: CollisionConfig,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            frames: 600,
            timestep: 1.0 / 60.0,
            asteroid_count: 37,
            projectile_count: 8,
            power_up_count: 2,
            enemy_count: 2,
            asteroid_radius_min: 12.0,
            asteroid_radius_max: 48.0,
            asteroid_speed_max: 120.0,
            projectile_speed: 600.0,
            collision: CollisionConfig::default(),
        }
    }
}

impl Config for FieldConfig {}

impl FieldConfig {
    /// Number of entities the field will spawn, player included
    pub fn entity_count(&self) -> u32 {
        1 + self.asteroid_count + self.projectile_count + self.power_up_count + self.enemy_count
    }

    /// Check that every value is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.collision.validate()?;

        if !self.timestep.is_finite() || self.timestep <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "timestep must be a positive number, got {}",
                self.timestep
            )));
        }
        if !(self.asteroid_radius_min > 0.0 && self.asteroid_radius_min <= self.asteroid_radius_max) {
            return Err(ConfigError::Invalid(format!(
                "asteroid radius range {}..={} is empty or not positive",
                self.asteroid_radius_min, self.asteroid_radius_max
            )));
        }
        for (name, value) in [
            ("asteroid_speed_max", self.asteroid_speed_max),
            ("projectile_speed", self.projectile_speed),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be zero or positive, got {value}"
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcade_core::spatial::BoundaryMode;

    #[test]
    fn test_default_is_valid() {
        let config = FieldConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.entity_count(), 50);
    }

    #[test]
    fn test_partial_toml_with_nested_collision() {
        let config = FieldConfig::from_toml_str(
            r#"
            asteroid_count = 200
            seed = 9

            [collision]
            cell_size = 64.0
            boundary = "wrap"
            "#,
        )
        .unwrap();

        assert_eq!(config.asteroid_count, 200);
        assert_eq!(config.seed, 9);
        assert_eq!(config.frames, 600);
        assert_eq!(config.collision.cell_size, 64.0);
        assert_eq!(config.collision.boundary, BoundaryMode::Wrap);
        assert_eq!(config.collision.default_radius, 20.0);
    }

    #[test]
    fn test_ron_config() {
        let config = FieldConfig::from_ron_str("(frames: 10, collision: (width: 500.0))").unwrap();
        assert_eq!(config.frames, 10);
        assert_eq!(config.collision.width, 500.0);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let bad_timestep = FieldConfig {
            timestep: 0.0,
            ..FieldConfig::default()
        };
        assert!(matches!(bad_timestep.validate(), Err(ConfigError::Invalid(_))));

        let bad_radius = FieldConfig {
            asteroid_radius_min: 50.0,
            asteroid_radius_max: 10.0,
            ..FieldConfig::default()
        };
        assert!(matches!(bad_radius.validate(), Err(ConfigError::Invalid(_))));

        let bad_grid = FieldConfig {
            collision: CollisionConfig {
                cell_size: -1.0,
                ..CollisionConfig::default()
            },
            ..FieldConfig::default()
        };
        assert!(matches!(bad_grid.validate(), Err(ConfigError::Invalid(_))));
    }
}
