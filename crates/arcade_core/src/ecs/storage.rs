//! Per-type component storage
//!
//! Each component type gets one [`ComponentStorage`]. The world keeps them
//! behind the object-safe [`AnyStorage`] trait so it can clean up or probe an
//! entity across every storage without knowing the concrete types, and
//! downcasts back to the typed storage for reads and writes.

use std::any::Any;
use std::collections::HashMap;

use super::{Component, Entity};

/// Components of a single type, indexed by entity
pub struct ComponentStorage<T: Component> {
    components: HashMap<Entity, T>,
}

impl<T: Component> ComponentStorage<T> {
    /// Create an empty storage
    pub fn new() -> Self {
        Self {
            components: HashMap::new(),
        }
    }

    /// Attach a component, returning the one it replaced
    pub fn insert(&mut self, entity: Entity, component: T) -> Option<T> {
        self.components.insert(entity, component)
    }

    /// Detach a component
    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        self.components.remove(&entity)
    }

    /// Borrow an entity's component
    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.components.get(&entity)
    }

    /// Mutably borrow an entity's component
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        self.components.get_mut(&entity)
    }

    /// Iterate over all stored components (unordered)
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.components.iter().map(|(&entity, component)| (entity, component))
    }
}

impl<T: Component> Default for ComponentStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Type-erased view of a [`ComponentStorage`]
pub(crate) trait AnyStorage: Send + Sync {
    /// Drop the entity's component if present
    fn remove_entity(&mut self, entity: Entity) -> bool;

    /// Whether the entity has a component in this storage
    fn contains(&self, entity: Entity) -> bool;

    /// Number of stored components
    fn len(&self) -> usize;

    /// Drop every component
    fn clear(&mut self);

    /// Downcast to Any for typed access
    fn as_any(&self) -> &dyn Any;

    /// Downcast to Any for typed mutable access
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> AnyStorage for ComponentStorage<T> {
    fn remove_entity(&mut self, entity: Entity) -> bool {
        self.components.remove(&entity).is_some()
    }

    fn contains(&self, entity: Entity) -> bool {
        self.components.contains_key(&entity)
    }

    fn len(&self) -> usize {
        self.components.len()
    }

    fn clear(&mut self) {
        self.components.clear();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
