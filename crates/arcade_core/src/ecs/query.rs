//! Component sets for multi-component queries

use super::{Component, ComponentType};

/// A tuple of component types an entity must all have to match a query
///
/// Implemented for tuples of one to six components:
///
/// ```
/// use arcade_core::ecs::World;
/// use arcade_core::ecs::components::{ColliderComponent, TransformComponent};
///
/// let world = World::new();
/// let collidable = world.query::<(TransformComponent, ColliderComponent)>();
/// assert!(collidable.is_empty());
/// ```
pub trait ComponentSet {
    /// Tags of every component type in the set
    fn component_types() -> Vec<ComponentType>;
}

macro_rules! impl_component_set {
    ($($name:ident),+) => {
        impl<$($name: Component),+> ComponentSet for ($($name,)+) {
            fn component_types() -> Vec<ComponentType> {
                vec![$(ComponentType::of::<$name>()),+]
            }
        }
    };
}

impl_component_set!(A);
impl_component_set!(A, B);
impl_component_set!(A, B, C);
impl_component_set!(A, B, C, D);
impl_component_set!(A, B, C, D, E);
impl_component_set!(A, B, C, D, E, F);
