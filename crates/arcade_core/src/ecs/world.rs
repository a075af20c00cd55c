//! ECS World implementation

use std::any::TypeId;
use std::collections::HashMap;

use super::storage::{AnyStorage, ComponentStorage};
use super::{Component, ComponentSet, ComponentType, Entity, EntityManager};

/// Errors from world mutations
///
/// None of these are fatal: the world is left untouched and the frame can
/// carry on.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EcsError {
    /// The entity was destroyed or never existed
    #[error("{0} is not alive")]
    EntityNotAlive(Entity),
}

/// ECS World containing all entities and components
///
/// The world owns every component instance. Callers only borrow them for the
/// duration of a call; queries hand back owned snapshots of entity ids, so
/// mutating the world while walking an earlier query result is always safe.
pub struct World {
    entities: EntityManager,
    storages: HashMap<TypeId, Box<dyn AnyStorage>>,
}

impl World {
    /// Create a new world
    pub fn new() -> Self {
        Self {
            entities: EntityManager::new(),
            storages: HashMap::new(),
        }
    }

    /// Create a new entity
    pub fn create_entity(&mut self) -> Entity {
        self.entities.create()
    }

    /// Destroy an entity and drop all of its components
    ///
    /// Safe to call repeatedly; returns `true` only when the entity was alive.
    pub fn destroy_entity(&mut self, entity: Entity) -> bool {
        let was_alive = self.entities.destroy(entity);
        for storage in self.storages.values_mut() {
            storage.remove_entity(entity);
        }
        was_alive
    }

    /// Whether the entity is alive
    pub fn is_entity_alive(&self, entity: Entity) -> bool {
        self.entities.is_alive(entity)
    }

    /// Attach a component to an entity, replacing any of the same type
    ///
    /// Returns the replaced component, if there was one. Dead entities are
    /// rejected with [`EcsError::EntityNotAlive`] and nothing is stored.
    pub fn add_component<T: Component>(
        &mut self,
        entity: Entity,
        component: T,
    ) -> Result<Option<T>, EcsError> {
        if !self.entities.is_alive(entity) {
            log::debug!(
                "Rejected {} for {}: entity is not alive",
                std::any::type_name::<T>(),
                entity
            );
            return Err(EcsError::EntityNotAlive(entity));
        }

        Ok(self.storage_mut::<T>().insert(entity, component))
    }

    /// Detach a component from an entity
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Option<T> {
        self.typed_storage_mut::<T>()?.remove(entity)
    }

    /// Detach a component by its runtime tag; returns whether one was removed
    pub fn remove_component_type(&mut self, entity: Entity, component_type: ComponentType) -> bool {
        self.storages
            .get_mut(&component_type.type_id())
            .is_some_and(|storage| storage.remove_entity(entity))
    }

    /// Get a component from an entity
    pub fn get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.typed_storage::<T>()?.get(entity)
    }

    /// Get a mutable component from an entity
    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.typed_storage_mut::<T>()?.get_mut(entity)
    }

    /// Whether an entity has a component of type `T`
    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        self.has_component_type(entity, ComponentType::of::<T>())
    }

    /// Whether an entity has a component with the given runtime tag
    pub fn has_component_type(&self, entity: Entity, component_type: ComponentType) -> bool {
        self.storages
            .get(&component_type.type_id())
            .is_some_and(|storage| storage.contains(entity))
    }

    /// Alive entities that have every component in `Q`, ascending by id
    ///
    /// The result is a snapshot: destroying entities afterwards does not
    /// change it. Two calls with no mutation in between return the same list.
    pub fn query<Q: ComponentSet>(&self) -> Vec<Entity> {
        self.query_types(&Q::component_types())
    }

    /// Runtime-tag form of [`World::query`]
    ///
    /// An empty tag list matches every alive entity.
    pub fn query_types(&self, component_types: &[ComponentType]) -> Vec<Entity> {
        let mut storages: Vec<&dyn AnyStorage> = Vec::with_capacity(component_types.len());
        for component_type in component_types {
            match self.storages.get(&component_type.type_id()) {
                Some(storage) => storages.push(&**storage),
                // Nobody has ever had this component
                None => return Vec::new(),
            }
        }

        self.entities
            .alive_entities()
            .filter(|&entity| storages.iter().all(|storage| storage.contains(entity)))
            .collect()
    }

    /// Number of alive entities
    pub fn entity_count(&self) -> usize {
        self.entities.count()
    }

    /// Iterate over alive entities in ascending id order
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.alive_entities()
    }

    /// Number of entities holding a component of type `T`
    pub fn component_count<T: Component>(&self) -> usize {
        self.storages
            .get(&TypeId::of::<T>())
            .map_or(0, |storage| storage.len())
    }

    /// Destroy every entity and component
    pub fn clear(&mut self) {
        self.entities.clear();
        for storage in self.storages.values_mut() {
            storage.clear();
        }
    }

    fn typed_storage<T: Component>(&self) -> Option<&ComponentStorage<T>> {
        self.storages
            .get(&TypeId::of::<T>())?
            .as_any()
            .downcast_ref::<ComponentStorage<T>>()
    }

    fn typed_storage_mut<T: Component>(&mut self) -> Option<&mut ComponentStorage<T>> {
        self.storages
            .get_mut(&TypeId::of::<T>())?
            .as_any_mut()
            .downcast_mut::<ComponentStorage<T>>()
    }

    fn storage_mut<T: Component>(&mut self) -> &mut ComponentStorage<T> {
        self.storages
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(ComponentStorage::<T>::new()))
            .as_any_mut()
            .downcast_mut::<ComponentStorage<T>>()
            .unwrap_or_else(|| unreachable!("storage registered under the wrong TypeId"))
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
