//! Entity-Component-System implementation
//!
//! Entities are plain ids, components are plain data stored per type, and
//! systems are whatever runs each frame against the [`World`].

pub mod world;
pub mod entity;
pub mod component;
pub mod storage;
pub mod system;
pub mod query;
pub mod components;

pub use world::{World, EcsError};
pub use entity::{Entity, EntityManager};
pub use component::{Component, ComponentType};
pub use storage::ComponentStorage;
pub use system::System;
pub use query::ComponentSet;
