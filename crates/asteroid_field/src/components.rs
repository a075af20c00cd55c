//! Game-specific components

use arcade_core::prelude::*;

/// Velocity component for movement
#[derive(Debug, Clone, PartialEq)]
pub struct Velocity {
    /// Linear velocity in world units per second
    pub linear: Vec3,

    /// Angular velocity around z in radians per second
    pub angular: f32,
}

impl Component for Velocity {}

impl Default for Velocity {
    fn default() -> Self {
        Self {
            linear: Vec3::zeros(),
            angular: 0.0,
        }
    }
}

impl Velocity {
    /// Planar velocity with no spin
    pub fn planar(x: f32, y: f32) -> Self {
        Self {
            linear: Vec3::new(x, y, 0.0),
            angular: 0.0,
        }
    }

    /// Set the spin
    pub fn with_spin(mut self, angular: f32) -> Self {
        self.angular = angular;
        self
    }
}

/// Wrap-around component for screen wrapping
#[derive(Debug, Clone, Default)]
pub struct WrapAround {
    /// Screen bounds for wrapping
    pub bounds: ScreenBounds,
}

impl Component for WrapAround {}

/// Screen bounds for wrapping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenBounds {
    /// Minimum X coordinate
    pub min_x: f32,

    /// Maximum X coordinate
    pub max_x: f32,

    /// Minimum Y coordinate
    pub min_y: f32,

    /// Maximum Y coordinate
    pub max_y: f32,
}

impl Default for ScreenBounds {
    fn default() -> Self {
        Self::centered(1280.0, 720.0)
    }
}

impl ScreenBounds {
    /// Bounds of a `width` x `height` field centered on the origin
    pub fn centered(width: f32, height: f32) -> Self {
        Self {
            min_x: -width * 0.5,
            max_x: width * 0.5,
            min_y: -height * 0.5,
            max_y: height * 0.5,
        }
    }

    /// Field width
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    /// Field height
    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    /// Whether a point lies inside the bounds (max edges excluded)
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.min_x && x < self.max_x && y >= self.min_y && y < self.max_y
    }

    /// Move a position that left the field back in from the opposite edge
    ///
    /// z is left alone.
    pub fn wrap(&self, position: &mut Vec3) {
        if self.contains(position.x, position.y) {
            return;
        }
        position.x = wrap_axis(position.x, self.min_x, self.width());
        position.y = wrap_axis(position.y, self.min_y, self.height());
    }
}

fn wrap_axis(value: f32, min: f32, extent: f32) -> f32 {
    if extent <= 0.0 {
        return min;
    }
    let wrapped = min + (value - min).rem_euclid(extent);
    // rem_euclid can round up to exactly `extent` for tiny negative offsets
    if wrapped >= min + extent {
        min
    } else {
        wrapped
    }
}
