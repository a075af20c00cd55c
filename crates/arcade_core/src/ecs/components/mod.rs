//! ECS Components module
//!
//! Components the core systems read. Game crates define their own on top.

pub mod transform;
pub mod collision;

pub use transform::TransformComponent;
pub use collision::ColliderComponent;
