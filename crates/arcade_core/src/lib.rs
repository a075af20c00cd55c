//! # Arcade Core
//!
//! Simulation core for real-time arcade games: an entity-component world
//! and a two-phase collision pass fast enough to run every frame.
//!
//! ## Features
//!
//! - **ECS World**: Entities with type-tagged component storage and
//!   snapshot queries that stay valid while the world changes
//! - **Spatial Grid**: Uniform-grid broad phase with clamped or wrapping edges
//! - **Collision System**: Circle overlap narrow phase with layer/mask
//!   filtering and a per-frame event feed
//! - **Configuration**: TOML or RON settings via serde
//!
//! ## Quick Start
//!
//! ```rust
//! use arcade_core::prelude::*;
//!
//! let mut world = World::new();
//!
//! let ship = world.create_entity();
//! world.add_component(ship, TransformComponent::at(0.0, 0.0)).unwrap();
//! world
//!     .add_component(
//!         ship,
//!         ColliderComponent::new(CollisionLayer::Player)
//!             .with_radius(10.0)
//!             .with_mask(LayerMask::ASTEROID),
//!     )
//!     .unwrap();
//!
//! let rock = world.create_entity();
//! world.add_component(rock, TransformComponent::at(15.0, 0.0)).unwrap();
//! world
//!     .add_component(
//!         rock,
//!         ColliderComponent::new(CollisionLayer::Asteroid)
//!             .with_radius(6.0)
//!             .with_mask(LayerMask::PLAYER),
//!     )
//!     .unwrap();
//!
//! let mut collisions = CollisionSystem::new(CollisionConfig::default());
//! collisions.update(&world);
//!
//! assert_eq!(collisions.collision_count(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod ecs;
pub mod spatial;
pub mod physics;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{CollisionConfig, Config, ConfigError},
        ecs::{
            components::{ColliderComponent, TransformComponent},
            Component, ComponentType, EcsError, Entity, System, World,
        },
        foundation::math::{Vec2, Vec3},
        physics::{CollisionEvent, CollisionLayer, CollisionSystem, LayerMask},
        spatial::{BoundaryMode, SpatialGrid, SpatialQuery},
    };
}
