//! Transform component for the ECS system
//!
//! Pure data: world-space position, rotation and scale. Collision only reads
//! the x/y part of the position; rotation and scale are carried for the
//! systems that sync entities to the renderer.

use crate::ecs::Component;
use crate::foundation::math::{planar, Quat, Vec2, Vec3};

/// ECS Transform component
#[derive(Debug, Clone, PartialEq)]
pub struct TransformComponent {
    /// World space position
    pub position: Vec3,

    /// World space rotation quaternion
    pub rotation: Quat,

    /// World space scale factors
    pub scale: Vec3,
}

impl Component for TransformComponent {}

impl Default for TransformComponent {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl TransformComponent {
    /// Create identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create from position only
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create at a point on the collision plane (z = 0)
    pub fn at(x: f32, y: f32) -> Self {
        Self::from_position(Vec3::new(x, y, 0.0))
    }

    /// Builder pattern: Set position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Builder pattern: Set rotation from quaternion
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder pattern: Set rotation about the z axis (radians)
    pub fn with_heading(mut self, angle: f32) -> Self {
        self.rotation = Quat::from_euler_angles(0.0, 0.0, angle);
        self
    }

    /// Builder pattern: Set uniform scale
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::new(scale, scale, scale);
        self
    }

    /// Position projected onto the collision plane
    pub fn planar_position(&self) -> Vec2 {
        planar(&self.position)
    }

    /// Translate by a world-space offset
    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_identity_transform() {
        let transform = TransformComponent::identity();
        assert_relative_eq!(transform.position, Vec3::zeros(), epsilon = EPSILON);
        assert_relative_eq!(transform.rotation, Quat::identity(), epsilon = EPSILON);
        assert_relative_eq!(transform.scale, Vec3::new(1.0, 1.0, 1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_planar_position_drops_depth() {
        let transform = TransformComponent::from_position(Vec3::new(12.0, -3.0, 40.0));
        assert_relative_eq!(transform.planar_position(), Vec2::new(12.0, -3.0), epsilon = EPSILON);
    }

    #[test]
    fn test_heading_rotates_about_z() {
        let transform = TransformComponent::at(0.0, 0.0).with_heading(std::f32::consts::FRAC_PI_2);
        let forward = transform.rotation * Vec3::new(1.0, 0.0, 0.0);
        assert_relative_eq!(forward, Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_translate() {
        let mut transform = TransformComponent::at(1.0, 2.0).with_uniform_scale(3.0);
        transform.translate(Vec3::new(1.0, 1.0, 0.0));
        assert_relative_eq!(transform.position, Vec3::new(2.0, 3.0, 0.0), epsilon = EPSILON);
        assert_relative_eq!(transform.scale, Vec3::new(3.0, 3.0, 3.0), epsilon = EPSILON);
    }
}
