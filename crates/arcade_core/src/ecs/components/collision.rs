//! Collider component for ECS
//!
//! Marks an entity as taking part in collision detection and carries its
//! filtering setup. Pair it with a [`super::TransformComponent`]; entities
//! missing either are ignored by the collision pass.

use crate::ecs::Component;
use crate::physics::{CollisionLayer, LayerMask};

/// Circle collider on the x/y plane
///
/// ```
/// use arcade_core::ecs::components::ColliderComponent;
/// use arcade_core::physics::{CollisionLayer, LayerMask};
///
/// let ship = ColliderComponent::new(CollisionLayer::Player)
///     .with_radius(10.0)
///     .with_mask(LayerMask::ASTEROID | LayerMask::POWER_UP);
/// assert!(ship.enabled);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ColliderComponent {
    /// Bounding circle radius; `None` uses the collision system's default
    pub radius: Option<f32>,

    /// Which layer this collider is on
    pub layer: CollisionLayer,

    /// Layers this collider is willing to collide with
    pub mask: LayerMask,

    /// Disabled colliders are skipped by both collision phases
    pub enabled: bool,

    /// Trigger volumes still report collisions; consumers decide what a
    /// trigger means (pickups, zones) instead of applying damage
    pub is_trigger: bool,
}

impl Component for ColliderComponent {}

impl ColliderComponent {
    /// Create an enabled collider on `layer` that collides with every layer
    pub fn new(layer: CollisionLayer) -> Self {
        Self {
            radius: None,
            layer,
            mask: LayerMask::all(),
            enabled: true,
            is_trigger: false,
        }
    }

    /// Set the bounding radius
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = Some(radius);
        self
    }

    /// Set the collision mask
    pub fn with_mask(mut self, mask: LayerMask) -> Self {
        self.mask = mask;
        self
    }

    /// Set whether the collider starts enabled
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Mark this as a trigger volume
    pub fn as_trigger(mut self) -> Self {
        self.is_trigger = true;
        self
    }

    /// Radius to use for detection, falling back to `default_radius`
    pub fn effective_radius(&self, default_radius: f32) -> f32 {
        self.radius.unwrap_or(default_radius)
    }
}
