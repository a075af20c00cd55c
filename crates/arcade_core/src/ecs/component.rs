//! Component trait and type tags

use std::any::TypeId;
use std::fmt;

/// Marker trait for components
///
/// Any `'static` data type can be a component once it opts in:
///
/// ```
/// use arcade_core::ecs::Component;
///
/// struct Health(u32);
/// impl Component for Health {}
/// ```
pub trait Component: 'static + Send + Sync {}

/// Stable tag identifying a component type
///
/// The world keys its storages by this tag, so runtime lookups such as
/// [`crate::ecs::World::query_types`] never need reflection.
#[derive(Clone, Copy, Eq)]
pub struct ComponentType {
    id: TypeId,
    name: &'static str,
}

impl ComponentType {
    /// Tag for component type `T`
    pub fn of<T: Component>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Underlying type id used as the storage key
    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// Rust type name, for diagnostics only
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for ComponentType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl std::hash::Hash for ComponentType {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ComponentType").field(&self.name).finish()
    }
}
