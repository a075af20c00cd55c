//! Movement integration

use arcade_core::foundation::math::Quat;
use arcade_core::prelude::*;

use crate::components::{Velocity, WrapAround};

/// Moves every entity with a transform and a velocity
///
/// Explicit Euler: `position += linear * dt`, heading advances by
/// `angular * dt`. Entities carrying [`WrapAround`] re-enter from the
/// opposite edge when they leave the field.
#[derive(Debug, Default)]
pub struct MovementSystem;

impl MovementSystem {
    /// Create the system
    pub fn new() -> Self {
        Self
    }
}

impl System for MovementSystem {
    fn name(&self) -> &'static str {
        "movement"
    }

    fn run(&mut self, world: &mut World, delta_time: f32) {
        for entity in world.query::<(TransformComponent, Velocity)>() {
            let Some(velocity) = world.get_component::<Velocity>(entity).cloned() else {
                continue;
            };
            let bounds = world.get_component::<WrapAround>(entity).map(|wrap| wrap.bounds);

            let Some(transform) = world.get_component_mut::<TransformComponent>(entity) else {
                continue;
            };
            transform.translate(velocity.linear * delta_time);
            if velocity.angular != 0.0 {
                transform.rotation =
                    Quat::from_euler_angles(0.0, 0.0, velocity.angular * delta_time) * transform.rotation;
            }
            if let Some(bounds) = bounds {
                bounds.wrap(&mut transform.position);
            }
        }
    }
}
