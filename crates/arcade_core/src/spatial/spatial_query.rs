//! Abstract spatial query interface for broad-phase collision detection
//!
//! The collision system only needs "which entities might touch this circle";
//! this trait keeps it independent of the partitioning scheme behind that
//! answer.

use crate::ecs::Entity;
use crate::foundation::math::Vec2;

/// Broad-phase index rebuilt from scratch every frame
pub trait SpatialQuery: Send + Sync {
    /// Insert an entity's bounding circle
    fn insert(&mut self, entity: Entity, position: Vec2, radius: f32);

    /// Entities whose bounds might overlap the given circle
    ///
    /// May contain false positives, never false negatives, never duplicates.
    fn query_circle(&self, center: Vec2, radius: f32) -> Vec<Entity>;

    /// Remove every entity
    fn clear(&mut self);

    /// Number of entities inserted since the last clear
    fn entity_count(&self) -> usize;
}
