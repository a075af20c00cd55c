//! Narrow-phase primitives and collision events
//!
//! The narrow phase is an exact circle/circle overlap test on the x/y plane.
//! Touching circles do not count: a pair collides only when the distance
//! between centers is strictly less than the sum of the radii.

use crate::ecs::Entity;
use crate::foundation::math::Vec2;
use super::CollisionLayer;

/// Bounding circle on the collision plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingCircle {
    /// Center on the collision plane
    pub center: Vec2,
    /// Radius of the circle
    pub radius: f32,
}

impl BoundingCircle {
    /// Creates a new bounding circle with the given center and radius
    ///
    /// Negative and NaN radii become 0, matching how the broad phase files them.
    pub fn new(center: Vec2, radius: f32) -> Self {
        let radius = if radius > 0.0 { radius } else { 0.0 };
        Self { center, radius }
    }

    /// Squared distance between the two centers
    pub fn distance_squared(&self, other: &BoundingCircle) -> f32 {
        (self.center - other.center).norm_squared()
    }

    /// Distance between the two centers
    pub fn distance(&self, other: &BoundingCircle) -> f32 {
        self.distance_squared(other).sqrt()
    }

    /// Check if this circle overlaps another (touching is not overlapping)
    pub fn intersects(&self, other: &BoundingCircle) -> bool {
        let radius_sum = self.radius + other.radius;
        self.distance_squared(other) < radius_sum * radius_sum
    }

    /// Test the pair and return the center distance when they overlap
    pub fn overlap_distance(&self, other: &BoundingCircle) -> Option<f32> {
        let distance_squared = self.distance_squared(other);
        let radius_sum = self.radius + other.radius;
        (distance_squared < radius_sum * radius_sum).then(|| distance_squared.sqrt())
    }
}

/// One colliding pair found during a frame
///
/// Only valid for the frame that produced it. The order of the two sides
/// carries no meaning; use [`CollisionEvent::between`] to pick sides by
/// layer instead of checking both orders by hand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionEvent {
    /// First entity of the pair
    pub entity_a: Entity,
    /// Second entity of the pair
    pub entity_b: Entity,
    /// Layer of `entity_a`
    pub layer_a: CollisionLayer,
    /// Layer of `entity_b`
    pub layer_b: CollisionLayer,
    /// Distance between the two centers on the collision plane
    pub distance: f32,
    /// Whether `entity_a` is a trigger volume
    pub trigger_a: bool,
    /// Whether `entity_b` is a trigger volume
    pub trigger_b: bool,
}

impl CollisionEvent {
    /// Whether either side is a trigger volume
    pub fn is_trigger(&self) -> bool {
        self.trigger_a || self.trigger_b
    }

    /// Whether `entity` is one side of this collision
    pub fn involves(&self, entity: Entity) -> bool {
        self.entity_a == entity || self.entity_b == entity
    }

    /// The entity `entity` collided with, if it is part of this event
    pub fn other(&self, entity: Entity) -> Option<Entity> {
        if self.entity_a == entity {
            Some(self.entity_b)
        } else if self.entity_b == entity {
            Some(self.entity_a)
        } else {
            None
        }
    }

    /// The layer of `entity`, if it is part of this event
    pub fn layer_of(&self, entity: Entity) -> Option<CollisionLayer> {
        if self.entity_a == entity {
            Some(self.layer_a)
        } else if self.entity_b == entity {
            Some(self.layer_b)
        } else {
            None
        }
    }

    /// Match this event against a layer pair regardless of side order
    ///
    /// Returns `(entity on first, entity on second)` when the event is
    /// between those layers:
    ///
    /// ```ignore
    /// for event in collisions.collisions() {
    ///     if let Some((bullet, rock)) = event.between(CollisionLayer::Projectile, CollisionLayer::Asteroid) {
    ///         // ...
    ///     }
    /// }
    /// ```
    pub fn between(&self, first: CollisionLayer, second: CollisionLayer) -> Option<(Entity, Entity)> {
        if self.layer_a == first && self.layer_b == second {
            Some((self.entity_a, self.entity_b))
        } else if self.layer_b == first && self.layer_a == second {
            Some((self.entity_b, self.entity_a))
        } else {
            None
        }
    }
}
