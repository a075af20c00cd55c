//! Math utilities and types
//!
//! Thin aliases over nalgebra plus the planar helpers the collision code
//! needs. Gameplay runs in 3D space but collision is resolved on the x/y
//! plane ("2.5D"), so most helpers here drop the z component.

pub use nalgebra::{Quaternion, Unit, Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Project a 3D position onto the collision plane (z is ignored)
pub fn planar(position: &Vec3) -> Vec2 {
    Vec2::new(position.x, position.y)
}
