//! System trait

use super::World;

/// A unit of per-frame game logic
///
/// The surrounding game loop decides the order systems run in. Anything that
/// reads collision results must run after the collision system in the same
/// frame.
pub trait System {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Run the system for one frame
    fn run(&mut self, world: &mut World, delta_time: f32);
}
