//! Physics module for collision detection
//!
//! Discrete, per-frame circle overlap tests on the x/y plane with a grid
//! broad phase and layer/mask filtering. There is no collision response:
//! the output is a list of events for gameplay systems to act on.

pub mod collision;
pub mod collision_layers;
pub mod collision_system;

pub use collision::{BoundingCircle, CollisionEvent};
pub use collision_layers::{should_collide, CollisionLayer, LayerMask};
pub use collision_system::{CollisionStats, CollisionSystem};
