//! Per-frame collision detection
//!
//! Detection runs in two phases every frame:
//!
//! 1. **Broad phase** - every enabled collider is filed into a spatial index
//!    (a [`SpatialGrid`] unless told otherwise), and each collider asks the
//!    index for the few entities that could possibly touch it.
//! 2. **Narrow phase** - those candidates get the exact circle test, after
//!    the layer/mask filter.
//!
//! Nothing carries over between frames except the event list from the last
//! run, which the next run replaces.

use std::collections::{HashMap, HashSet};

use crate::config::CollisionConfig;
use crate::ecs::components::{ColliderComponent, TransformComponent};
use crate::ecs::{Entity, System, World};
use crate::foundation::time::{FrameBudget, Stopwatch};
use crate::spatial::{SpatialGrid, SpatialQuery};
use super::collision::{BoundingCircle, CollisionEvent};
use super::collision_layers::{should_collide, CollisionLayer, LayerMask};

/// Counters from the most recent collision pass
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CollisionStats {
    /// Enabled colliders that took part this frame
    pub collidables: usize,
    /// Neighbor hits returned by the broad phase, before any filtering
    pub broad_phase_candidates: usize,
    /// Unordered pairs that reached the layer check and narrow phase
    pub pairs_tested: usize,
    /// Pairs that passed the layer filter and got the exact circle test
    pub narrow_phase_tests: usize,
    /// Collision events produced
    pub collisions: usize,
    /// Wall-clock time of the pass in milliseconds
    pub frame_time_ms: f64,
}

/// Snapshot of one collider taken at the start of the pass
#[derive(Debug, Clone, Copy)]
struct Collidable {
    entity: Entity,
    circle: BoundingCircle,
    layer: CollisionLayer,
    mask: LayerMask,
    is_trigger: bool,
}

/// Finds every colliding pair of entities once per frame
///
/// Entities need a [`TransformComponent`] and an enabled
/// [`ColliderComponent`] to take part. After [`CollisionSystem::update`],
/// systems that react to collisions read [`CollisionSystem::collisions`]
/// during the same frame. The borrow it returns ends before the next update,
/// so nobody can hold on to a stale list.
pub struct CollisionSystem {
    config: CollisionConfig,
    spatial_query: Box<dyn SpatialQuery>,
    budget: FrameBudget,

    /// Events from the last update
    events: Vec<CollisionEvent>,

    /// Frame-local scratch, kept to reuse allocations
    collidables: Vec<Collidable>,
    index_of: HashMap<Entity, usize>,
    tested_pairs: HashSet<(Entity, Entity)>,

    stats: CollisionStats,
}

impl CollisionSystem {
    /// Create a collision system using a [`SpatialGrid`] built from `config`
    pub fn new(config: CollisionConfig) -> Self {
        let grid = SpatialGrid::from_config(&config);
        Self::with_spatial_query(config, Box::new(grid))
    }

    /// Create a collision system with a custom broad-phase index
    ///
    /// The config is expected to be validated already; an invalid one is
    /// logged and used as given.
    pub fn with_spatial_query(config: CollisionConfig, spatial_query: Box<dyn SpatialQuery>) -> Self {
        if let Err(err) = config.validate() {
            log::warn!("Collision system built from an invalid config: {err}");
        }
        let budget = FrameBudget::new("Collision pass", config.frame_budget_ms);
        Self {
            config,
            spatial_query,
            budget,
            events: Vec::new(),
            collidables: Vec::new(),
            index_of: HashMap::new(),
            tested_pairs: HashSet::new(),
            stats: CollisionStats::default(),
        }
    }

    /// Run broad and narrow phase against the current world state
    ///
    /// Replaces the previous frame's events. Entities whose transform or
    /// collider disappeared since the query are skipped silently.
    pub fn update(&mut self, world: &World) {
        let stopwatch = Stopwatch::start();

        self.spatial_query.clear();
        self.events.clear();
        self.collidables.clear();
        self.index_of.clear();
        self.tested_pairs.clear();
        self.stats = CollisionStats::default();

        self.gather_collidables(world);
        self.broad_phase();
        self.narrow_phase();

        let frame_time_ms = stopwatch.elapsed_millis();
        self.stats.collisions = self.events.len();
        self.stats.frame_time_ms = frame_time_ms;
        self.budget.record(frame_time_ms);

        log::debug!(
            "Collision pass: {} collidables, {} pairs tested, {} collisions in {:.3} ms",
            self.stats.collidables,
            self.stats.pairs_tested,
            self.stats.collisions,
            frame_time_ms
        );
    }

    /// Snapshot every entity with a transform and an enabled collider
    fn gather_collidables(&mut self, world: &World) {
        let default_radius = self.config.default_radius;

        for entity in world.query::<(TransformComponent, ColliderComponent)>() {
            let (Some(transform), Some(collider)) = (
                world.get_component::<TransformComponent>(entity),
                world.get_component::<ColliderComponent>(entity),
            ) else {
                continue;
            };

            if !collider.enabled {
                continue;
            }

            self.index_of.insert(entity, self.collidables.len());
            self.collidables.push(Collidable {
                entity,
                circle: BoundingCircle::new(
                    transform.planar_position(),
                    collider.effective_radius(default_radius),
                ),
                layer: collider.layer,
                mask: collider.mask,
                is_trigger: collider.is_trigger,
            });
        }

        self.stats.collidables = self.collidables.len();
    }

    /// Refill the spatial index with this frame's colliders
    fn broad_phase(&mut self) {
        for collidable in &self.collidables {
            self.spatial_query.insert(
                collidable.entity,
                collidable.circle.center,
                collidable.circle.radius,
            );
        }
    }

    /// Exact tests on broad-phase neighbors, each unordered pair at most once
    fn narrow_phase(&mut self) {
        for a in &self.collidables {
            let neighbors = self.spatial_query.query_circle(a.circle.center, a.circle.radius);
            self.stats.broad_phase_candidates += neighbors.len();

            for neighbor in neighbors {
                // Lower id drives the pair; also drops self-pairs
                if a.entity >= neighbor {
                    continue;
                }
                if !self.tested_pairs.insert((a.entity, neighbor)) {
                    continue;
                }
                self.stats.pairs_tested += 1;

                // Only enabled colliders were indexed; anything else is stale
                let Some(&b_index) = self.index_of.get(&neighbor) else {
                    continue;
                };
                let b = &self.collidables[b_index];

                if !should_collide(a.layer, a.mask, b.layer, b.mask) {
                    continue;
                }

                self.stats.narrow_phase_tests += 1;
                if let Some(distance) = a.circle.overlap_distance(&b.circle) {
                    self.events.push(CollisionEvent {
                        entity_a: a.entity,
                        entity_b: b.entity,
                        layer_a: a.layer,
                        layer_b: b.layer,
                        distance,
                        trigger_a: a.is_trigger,
                        trigger_b: b.is_trigger,
                    });
                }
            }
        }
    }

    /// Collisions found by the last update
    pub fn collisions(&self) -> &[CollisionEvent] {
        &self.events
    }

    /// Number of collisions found by the last update
    pub fn collision_count(&self) -> usize {
        self.events.len()
    }

    /// Collisions from the last update that involve `entity`
    pub fn collisions_involving(&self, entity: Entity) -> impl Iterator<Item = &CollisionEvent> {
        self.events.iter().filter(move |event| event.involves(entity))
    }

    /// Duration of the last update in milliseconds
    pub fn last_frame_time_ms(&self) -> f64 {
        self.stats.frame_time_ms
    }

    /// Counters from the last update
    pub fn stats(&self) -> &CollisionStats {
        &self.stats
    }

    /// Number of updates that ran over the frame budget
    pub fn budget_overruns(&self) -> u64 {
        self.budget.overruns()
    }

    /// Settings this system was built with
    pub fn config(&self) -> &CollisionConfig {
        &self.config
    }

    /// The broad-phase index, as filled by the last update
    pub fn spatial_query(&self) -> &dyn SpatialQuery {
        self.spatial_query.as_ref()
    }
}

impl System for CollisionSystem {
    fn name(&self) -> &'static str {
        "collision"
    }

    fn run(&mut self, world: &mut World, _delta_time: f32) {
        self.update(world);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use approx::assert_relative_eq;

    fn spawn(
        world: &mut World,
        x: f32,
        y: f32,
        radius: f32,
        layer: CollisionLayer,
        mask: LayerMask,
    ) -> Entity {
        let entity = world.create_entity();
        world.add_component(entity, TransformComponent::at(x, y)).unwrap();
        world
            .add_component(
                entity,
                ColliderComponent::new(layer).with_radius(radius).with_mask(mask),
            )
            .unwrap();
        entity
    }

    fn system() -> CollisionSystem {
        CollisionSystem::new(CollisionConfig::default())
    }

    fn has_pair(events: &[CollisionEvent], x: Entity, y: Entity) -> bool {
        events.iter().any(|event| event.involves(x) && event.other(x) == Some(y))
    }

    #[test]
    fn test_player_hits_asteroid() {
        let mut world = World::new();
        let a = spawn(&mut world, 0.0, 0.0, 10.0, CollisionLayer::Player, LayerMask::ASTEROID);
        let b = spawn(&mut world, 15.0, 0.0, 6.0, CollisionLayer::Asteroid, LayerMask::PLAYER);

        let mut collisions = system();
        collisions.update(&world);

        assert_eq!(collisions.collision_count(), 1);
        let event = collisions.collisions()[0];
        assert!(has_pair(collisions.collisions(), a, b));
        assert_relative_eq!(event.distance, 15.0, epsilon = 1e-4);
        assert_eq!(event.layer_of(a), Some(CollisionLayer::Player));
        assert_eq!(event.layer_of(b), Some(CollisionLayer::Asteroid));
    }

    #[test]
    fn test_touching_circles_do_not_collide() {
        let mut world = World::new();
        spawn(&mut world, 0.0, 0.0, 10.0, CollisionLayer::Player, LayerMask::ASTEROID);
        spawn(&mut world, 16.0, 0.0, 6.0, CollisionLayer::Asteroid, LayerMask::PLAYER);

        let mut collisions = system();
        collisions.update(&world);

        assert_eq!(collisions.collision_count(), 0);
        assert_eq!(collisions.stats().narrow_phase_tests, 1);
    }

    #[test]
    fn test_empty_mask_vetoes_pair() {
        let mut world = World::new();
        spawn(&mut world, 0.0, 0.0, 10.0, CollisionLayer::Player, LayerMask::empty());
        spawn(&mut world, 5.0, 0.0, 6.0, CollisionLayer::Asteroid, LayerMask::PLAYER);

        let mut collisions = system();
        collisions.update(&world);

        assert_eq!(collisions.collision_count(), 0);
        assert_eq!(collisions.stats().narrow_phase_tests, 0);
    }

    #[test]
    fn test_mask_asymmetry_vetoes_pair() {
        let mut world = World::new();
        // Asteroid wants the player, player only wants power-ups
        spawn(&mut world, 0.0, 0.0, 10.0, CollisionLayer::Player, LayerMask::POWER_UP);
        spawn(&mut world, 5.0, 0.0, 6.0, CollisionLayer::Asteroid, LayerMask::PLAYER);

        let mut collisions = system();
        collisions.update(&world);

        assert_eq!(collisions.collision_count(), 0);
    }

    #[test]
    fn test_disabled_collider_never_collides() {
        let mut world = World::new();
        let disabled = spawn(&mut world, 0.0, 0.0, 10.0, CollisionLayer::Player, LayerMask::all());
        let other = spawn(&mut world, 3.0, 0.0, 10.0, CollisionLayer::Asteroid, LayerMask::all());
        let third = spawn(&mut world, -3.0, 0.0, 10.0, CollisionLayer::Asteroid, LayerMask::all());
        world
            .get_component_mut::<ColliderComponent>(disabled)
            .unwrap()
            .enabled = false;

        let mut collisions = system();
        collisions.update(&world);

        assert!(collisions.collisions().iter().all(|event| !event.involves(disabled)));
        assert_eq!(collisions.collision_count(), 1);
        assert!(has_pair(collisions.collisions(), other, third));
        assert_eq!(collisions.stats().collidables, 2);
        assert_eq!(collisions.spatial_query().entity_count(), 2);
    }

    #[test]
    fn test_three_in_one_cell_single_overlap() {
        let mut world = World::new();
        let a = spawn(&mut world, 10.0, 10.0, 5.0, CollisionLayer::Asteroid, LayerMask::all());
        let b = spawn(&mut world, 18.0, 10.0, 5.0, CollisionLayer::Asteroid, LayerMask::all());
        let c = spawn(&mut world, 40.0, 40.0, 5.0, CollisionLayer::Asteroid, LayerMask::all());

        let mut collisions = system();
        collisions.update(&world);

        assert_eq!(collisions.collision_count(), 1);
        assert!(has_pair(collisions.collisions(), a, b));
        assert!(collisions.collisions_involving(c).next().is_none());
        assert_eq!(collisions.stats().pairs_tested, 3);
    }

    #[test]
    fn test_pair_reported_once_across_many_cells() {
        let mut config = CollisionConfig::default();
        config.cell_size = 4.0;
        let mut world = World::new();
        // Both circles span dozens of small cells
        let a = spawn(&mut world, 0.0, 0.0, 30.0, CollisionLayer::Boss, LayerMask::all());
        let b = spawn(&mut world, 20.0, 5.0, 30.0, CollisionLayer::Projectile, LayerMask::all());

        let mut collisions = CollisionSystem::new(config);
        collisions.update(&world);

        assert_eq!(collisions.collision_count(), 1);
        assert!(has_pair(collisions.collisions(), a, b));
        assert_eq!(collisions.stats().pairs_tested, 1);
    }

    #[test]
    fn test_z_is_ignored() {
        let mut world = World::new();
        let a = spawn(&mut world, 0.0, 0.0, 5.0, CollisionLayer::Player, LayerMask::all());
        let b = spawn(&mut world, 3.0, 0.0, 5.0, CollisionLayer::Asteroid, LayerMask::all());
        world.get_component_mut::<TransformComponent>(a).unwrap().position = Vec3::new(0.0, 0.0, 500.0);
        world.get_component_mut::<TransformComponent>(b).unwrap().position = Vec3::new(3.0, 0.0, -500.0);

        let mut collisions = system();
        collisions.update(&world);

        assert_eq!(collisions.collision_count(), 1);
        assert_relative_eq!(collisions.collisions()[0].distance, 3.0, epsilon = 1e-5);
    }

    #[test]
    fn test_unset_radius_uses_default() {
        let mut world = World::new();
        let a = world.create_entity();
        world.add_component(a, TransformComponent::at(0.0, 0.0)).unwrap();
        world.add_component(a, ColliderComponent::new(CollisionLayer::Asteroid)).unwrap();
        // Default radius 20 each: overlap at 39, miss at 40
        spawn(&mut world, 39.0, 0.0, 20.0, CollisionLayer::Asteroid, LayerMask::all());
        spawn(&mut world, -40.0, 0.0, 20.0, CollisionLayer::Asteroid, LayerMask::all());

        let mut collisions = system();
        collisions.update(&world);

        assert_eq!(collisions.collisions_involving(a).count(), 1);
    }

    #[test]
    fn test_entity_without_collider_is_ignored() {
        let mut world = World::new();
        let bare = world.create_entity();
        world.add_component(bare, TransformComponent::at(0.0, 0.0)).unwrap();
        spawn(&mut world, 1.0, 0.0, 5.0, CollisionLayer::Asteroid, LayerMask::all());

        let mut collisions = system();
        collisions.update(&world);

        assert_eq!(collisions.collision_count(), 0);
        assert_eq!(collisions.stats().collidables, 1);
    }

    #[test]
    fn test_events_replaced_each_frame() {
        let mut world = World::new();
        let a = spawn(&mut world, 0.0, 0.0, 10.0, CollisionLayer::Player, LayerMask::all());
        spawn(&mut world, 5.0, 0.0, 10.0, CollisionLayer::Asteroid, LayerMask::all());

        let mut collisions = system();
        collisions.update(&world);
        collisions.update(&world);
        assert_eq!(collisions.collision_count(), 1);

        world.destroy_entity(a);
        collisions.update(&world);
        assert_eq!(collisions.collision_count(), 0);
    }

    #[test]
    fn test_runs_as_system() {
        let mut world = World::new();
        spawn(&mut world, 0.0, 0.0, 10.0, CollisionLayer::Player, LayerMask::all());
        spawn(&mut world, 5.0, 0.0, 10.0, CollisionLayer::Asteroid, LayerMask::all());

        let mut collisions = system();
        collisions.run(&mut world, 1.0 / 60.0);

        assert_eq!(collisions.name(), "collision");
        assert_eq!(collisions.collision_count(), 1);
        assert!(collisions.last_frame_time_ms() >= 0.0);
    }

    #[test]
    fn test_negative_radius_treated_as_zero() {
        let mut world = World::new();
        spawn(&mut world, 0.0, 0.0, -10.0, CollisionLayer::Asteroid, LayerMask::all());
        spawn(&mut world, 5.0, 0.0, 1.0, CollisionLayer::Player, LayerMask::all());
        // Far enough apart to land in different cells
        spawn(&mut world, 300.0, 0.0, f32::NAN, CollisionLayer::Asteroid, LayerMask::all());
        spawn(&mut world, 399.0, 0.0, -150.0, CollisionLayer::Player, LayerMask::all());

        let mut collisions = system();
        collisions.update(&world);

        assert_eq!(collisions.collision_count(), 0);
    }

    #[test]
    fn test_trigger_flag_carried_to_events() {
        let mut world = World::new();
        let player = spawn(&mut world, 0.0, 0.0, 10.0, CollisionLayer::Player, LayerMask::all());
        let pickup = world.create_entity();
        world.add_component(pickup, TransformComponent::at(8.0, 0.0)).unwrap();
        world
            .add_component(
                pickup,
                ColliderComponent::new(CollisionLayer::PowerUp)
                    .with_radius(5.0)
                    .with_mask(LayerMask::PLAYER)
                    .as_trigger(),
            )
            .unwrap();
        let rock = spawn(&mut world, -8.0, 0.0, 5.0, CollisionLayer::Asteroid, LayerMask::PLAYER);

        let mut collisions = system();
        collisions.update(&world);

        assert_eq!(collisions.collision_count(), 2);
        let pickup_event = collisions.collisions_involving(pickup).next().unwrap();
        assert!(pickup_event.is_trigger());
        assert_eq!(pickup_event.trigger_a, pickup_event.entity_a == pickup);
        assert_eq!(pickup_event.trigger_b, pickup_event.entity_b == pickup);
        let rock_event = collisions.collisions_involving(rock).next().unwrap();
        assert!(rock_event.involves(player));
        assert!(!rock_event.is_trigger());
    }

    #[test]
    fn test_invalid_config_still_runs() {
        let mut config = CollisionConfig::default();
        config.frame_budget_ms = f64::NAN;
        assert!(config.validate().is_err());

        let mut world = World::new();
        spawn(&mut world, 0.0, 0.0, 10.0, CollisionLayer::Player, LayerMask::all());
        spawn(&mut world, 5.0, 0.0, 10.0, CollisionLayer::Asteroid, LayerMask::all());

        let mut collisions = CollisionSystem::new(config);
        collisions.update(&world);

        assert_eq!(collisions.collision_count(), 1);
        assert!(collisions.config().frame_budget_ms.is_nan());
    }
}
