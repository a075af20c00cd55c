//! Entity identifiers and liveness tracking

use std::collections::BTreeSet;
use std::fmt;

/// Entity identifier
///
/// Ids start at 1 and only ever increase, so an id is never handed out twice
/// within a process. Entities order by id; the collision pass relies on this
/// to visit each unordered pair exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entity {
    id: u64,
}

impl Entity {
    /// Create an entity handle with the given id
    pub(crate) fn new(id: u64) -> Self {
        Self { id }
    }

    /// Get the entity ID
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.id)
    }
}

/// Allocates entity ids and is the single authority on which are alive
#[derive(Debug)]
pub struct EntityManager {
    next_id: u64,
    alive: BTreeSet<Entity>,
}

impl EntityManager {
    /// Create an empty manager; the first entity gets id 1
    pub fn new() -> Self {
        Self {
            next_id: 1,
            alive: BTreeSet::new(),
        }
    }

    /// Allocate a fresh id and mark it alive
    pub fn create(&mut self) -> Entity {
        let entity = Entity::new(self.next_id);
        self.next_id += 1;
        self.alive.insert(entity);
        entity
    }

    /// Mark an entity dead
    ///
    /// Returns `false` if it was already dead or never existed.
    pub fn destroy(&mut self, entity: Entity) -> bool {
        self.alive.remove(&entity)
    }

    /// Whether the entity is currently alive
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.alive.contains(&entity)
    }

    /// Alive entities in ascending id order
    pub fn alive_entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.alive.iter().copied()
    }

    /// Number of alive entities
    pub fn count(&self) -> usize {
        self.alive.len()
    }

    /// Kill every entity; ids keep counting up from where they were
    pub fn clear(&mut self) {
        self.alive.clear();
    }
}

impl Default for EntityManager {
    fn default() -> Self {
        Self::new()
    }
}
