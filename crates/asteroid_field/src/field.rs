//! Field population
//!
//! Spawns a seeded arcade scene: the player in the middle, asteroids drifting
//! across the whole field, a volley of projectiles, a few power-ups and
//! enemy ships.

use std::f32::consts::TAU;

use arcade_core::prelude::*;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::components::{ScreenBounds, Velocity, WrapAround};
use crate::config::FieldConfig;

const PLAYER_RADIUS: f32 = 16.0;
const PROJECTILE_RADIUS: f32 = 3.0;
const POWER_UP_RADIUS: f32 = 12.0;
const ENEMY_RADIUS: f32 = 18.0;
const ENEMY_SPEED: f32 = 90.0;

/// Collider for the player ship
pub fn player_collider() -> ColliderComponent {
    ColliderComponent::new(CollisionLayer::Player)
        .with_radius(PLAYER_RADIUS)
        .with_mask(
            LayerMask::ASTEROID
                | LayerMask::POWER_UP
                | LayerMask::BOSS
                | LayerMask::ENEMY
                | LayerMask::ENEMY_PROJECTILE,
        )
}

/// Collider for an asteroid of the given radius
pub fn asteroid_collider(radius: f32) -> ColliderComponent {
    ColliderComponent::new(CollisionLayer::Asteroid)
        .with_radius(radius)
        .with_mask(LayerMask::PLAYER | LayerMask::PROJECTILE)
}

/// Collider for a player projectile
pub fn projectile_collider() -> ColliderComponent {
    ColliderComponent::new(CollisionLayer::Projectile)
        .with_radius(PROJECTILE_RADIUS)
        .with_mask(LayerMask::ASTEROID | LayerMask::BOSS | LayerMask::ENEMY)
}

/// Collider for a power-up pickup
pub fn power_up_collider() -> ColliderComponent {
    ColliderComponent::new(CollisionLayer::PowerUp)
        .with_radius(POWER_UP_RADIUS)
        .with_mask(LayerMask::PLAYER)
        .as_trigger()
}

/// Collider for an enemy ship
pub fn enemy_collider() -> ColliderComponent {
    ColliderComponent::new(CollisionLayer::Enemy)
        .with_radius(ENEMY_RADIUS)
        .with_mask(LayerMask::PLAYER | LayerMask::PROJECTILE)
}

/// Entities spawned into the field, by role
#[derive(Debug, Clone, Default)]
pub struct FieldPopulation {
    /// The player ship
    pub player: Option<Entity>,

    /// Asteroids
    pub asteroids: Vec<Entity>,

    /// Player projectiles
    pub projectiles: Vec<Entity>,

    /// Power-ups
    pub power_ups: Vec<Entity>,

    /// Enemy ships
    pub enemies: Vec<Entity>,
}

impl FieldPopulation {
    /// Total number of spawned entities
    pub fn len(&self) -> usize {
        usize::from(self.player.is_some())
            + self.asteroids.len()
            + self.projectiles.len()
            + self.power_ups.len()
            + self.enemies.len()
    }
}

/// Seeded spawner for one field
pub struct FieldSpawner<'a> {
    config: &'a FieldConfig,
    bounds: ScreenBounds,
    rng: StdRng,
}

impl<'a> FieldSpawner<'a> {
    /// Create a spawner; the field covers the collision grid's extent
    pub fn new(config: &'a FieldConfig) -> Self {
        Self {
            config,
            bounds: ScreenBounds::centered(config.collision.width, config.collision.height),
            rng: StdRng::seed_from_u64(config.seed),
        }
    }

    /// Spawn the whole field into `world`
    pub fn populate(&mut self, world: &mut World) -> Result<FieldPopulation, EcsError> {
        let mut population = FieldPopulation {
            player: Some(self.spawn_player(world)?),
            ..FieldPopulation::default()
        };

        for _ in 0..self.config.asteroid_count {
            population.asteroids.push(self.spawn_asteroid(world)?);
        }
        for index in 0..self.config.projectile_count {
            population.projectiles.push(self.spawn_projectile(world, index)?);
        }
        for _ in 0..self.config.power_up_count {
            population.power_ups.push(self.spawn_power_up(world)?);
        }
        for _ in 0..self.config.enemy_count {
            population.enemies.push(self.spawn_enemy(world)?);
        }

        debug!(
            "Spawned field: {} asteroids, {} projectiles, {} power-ups, {} enemies",
            population.asteroids.len(),
            population.projectiles.len(),
            population.power_ups.len(),
            population.enemies.len()
        );
        Ok(population)
    }

    fn spawn_player(&mut self, world: &mut World) -> Result<Entity, EcsError> {
        let player = world.create_entity();
        world.add_component(player, TransformComponent::at(0.0, 0.0))?;
        world.add_component(player, Velocity::default())?;
        world.add_component(player, WrapAround { bounds: self.bounds })?;
        world.add_component(player, player_collider())?;
        Ok(player)
    }

    fn spawn_asteroid(&mut self, world: &mut World) -> Result<Entity, EcsError> {
        let (x, y) = self.random_point();
        let radius = self
            .rng
            .gen_range(self.config.asteroid_radius_min..=self.config.asteroid_radius_max);
        let direction = self.rng.gen_range(0.0..TAU);
        let speed = self.rng.gen_range(0.0..=self.config.asteroid_speed_max);
        let spin = self.rng.gen_range(-1.5..1.5);

        let asteroid = world.create_entity();
        world.add_component(asteroid, TransformComponent::at(x, y).with_heading(direction))?;
        world.add_component(
            asteroid,
            Velocity::planar(direction.cos() * speed, direction.sin() * speed).with_spin(spin),
        )?;
        world.add_component(asteroid, WrapAround { bounds: self.bounds })?;
        world.add_component(asteroid, asteroid_collider(radius))?;
        Ok(asteroid)
    }

    /// Projectiles leave the player's nose in an even fan
    fn spawn_projectile(&mut self, world: &mut World, index: u32) -> Result<Entity, EcsError> {
        let count = self.config.projectile_count.max(1) as f32;
        let heading = TAU * index as f32 / count;
        let (dx, dy) = (heading.cos(), heading.sin());
        let speed = self.config.projectile_speed;
        let offset = PLAYER_RADIUS + PROJECTILE_RADIUS;

        let projectile = world.create_entity();
        world.add_component(
            projectile,
            TransformComponent::at(dx * offset, dy * offset).with_heading(heading),
        )?;
        world.add_component(projectile, Velocity::planar(dx * speed, dy * speed))?;
        world.add_component(projectile, WrapAround { bounds: self.bounds })?;
        world.add_component(projectile, projectile_collider())?;
        Ok(projectile)
    }

    fn spawn_power_up(&mut self, world: &mut World) -> Result<Entity, EcsError> {
        let (x, y) = self.random_point();

        let power_up = world.create_entity();
        world.add_component(power_up, TransformComponent::at(x, y))?;
        world.add_component(power_up, power_up_collider())?;
        Ok(power_up)
    }

    fn spawn_enemy(&mut self, world: &mut World) -> Result<Entity, EcsError> {
        let (x, y) = self.random_point();
        let direction = self.rng.gen_range(0.0..TAU);

        let enemy = world.create_entity();
        world.add_component(enemy, TransformComponent::at(x, y).with_heading(direction))?;
        world.add_component(
            enemy,
            Velocity::planar(direction.cos() * ENEMY_SPEED, direction.sin() * ENEMY_SPEED),
        )?;
        world.add_component(enemy, WrapAround { bounds: self.bounds })?;
        world.add_component(enemy, enemy_collider())?;
        Ok(enemy)
    }

    fn random_point(&mut self) -> (f32, f32) {
        (
            self.rng.gen_range(self.bounds.min_x..self.bounds.max_x),
            self.rng.gen_range(self.bounds.min_y..self.bounds.max_y),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcade_core::physics::should_collide;

    fn small_config() -> FieldConfig {
        FieldConfig {
            asteroid_count: 20,
            projectile_count: 4,
            power_up_count: 3,
            enemy_count: 1,
            ..FieldConfig::default()
        }
    }

    fn collides(a: &ColliderComponent, b: &ColliderComponent) -> bool {
        should_collide(a.layer, a.mask, b.layer, b.mask)
    }

    #[test]
    fn test_layer_presets() {
        let player = player_collider();
        let asteroid = asteroid_collider(20.0);
        let projectile = projectile_collider();
        let power_up = power_up_collider();
        let enemy = enemy_collider();

        assert!(collides(&player, &asteroid));
        assert!(collides(&player, &power_up));
        assert!(collides(&player, &enemy));
        assert!(collides(&projectile, &asteroid));
        assert!(collides(&projectile, &enemy));

        assert!(!collides(&player, &projectile));
        assert!(!collides(&asteroid, &asteroid));
        assert!(!collides(&asteroid, &power_up));
        assert!(!collides(&projectile, &power_up));
        assert!(power_up.is_trigger);
    }

    #[test]
    fn test_power_up_pickup_is_a_trigger_event() {
        let mut world = World::new();
        let player = world.create_entity();
        world.add_component(player, TransformComponent::at(0.0, 0.0)).unwrap();
        world.add_component(player, player_collider()).unwrap();
        let power_up = world.create_entity();
        world.add_component(power_up, TransformComponent::at(20.0, 0.0)).unwrap();
        world.add_component(power_up, power_up_collider()).unwrap();

        let mut collisions = CollisionSystem::new(CollisionConfig::default());
        collisions.update(&world);

        assert_eq!(collisions.collision_count(), 1);
        let event = collisions.collisions()[0];
        assert!(event.is_trigger());
        assert!(event.between(CollisionLayer::Player, CollisionLayer::PowerUp).is_some());
    }

    #[test]
    fn test_populate_spawns_configured_counts() {
        let config = small_config();
        let mut world = World::new();
        let population = FieldSpawner::new(&config).populate(&mut world).unwrap();

        assert_eq!(population.len(), config.entity_count() as usize);
        assert_eq!(world.entity_count(), population.len());
        assert_eq!(population.asteroids.len(), 20);
        assert_eq!(
            world.query::<(TransformComponent, ColliderComponent)>().len(),
            population.len()
        );
        // Power-ups sit still
        assert_eq!(
            world.query::<(TransformComponent, Velocity)>().len(),
            population.len() - population.power_ups.len()
        );
    }

    #[test]
    fn test_spawns_inside_the_field() {
        let config = small_config();
        let mut world = World::new();
        let bounds = ScreenBounds::centered(config.collision.width, config.collision.height);
        FieldSpawner::new(&config).populate(&mut world).unwrap();

        for entity in world.query::<(TransformComponent,)>() {
            let position = world.get_component::<TransformComponent>(entity).unwrap().position;
            assert!(bounds.contains(position.x, position.y), "{entity} at {position:?}");
        }
    }

    #[test]
    fn test_same_seed_same_field() {
        let config = small_config();
        let mut first = World::new();
        let mut second = World::new();
        let a = FieldSpawner::new(&config).populate(&mut first).unwrap();
        let b = FieldSpawner::new(&config).populate(&mut second).unwrap();

        for (&left, &right) in a.asteroids.iter().zip(&b.asteroids) {
            assert_eq!(
                first.get_component::<TransformComponent>(left),
                second.get_component::<TransformComponent>(right)
            );
            assert_eq!(
                first.get_component::<ColliderComponent>(left).map(|c| c.radius),
                second.get_component::<ColliderComponent>(right).map(|c| c.radius)
            );
        }
    }

    #[test]
    fn test_asteroid_radius_within_range() {
        let config = small_config();
        let mut world = World::new();
        let population = FieldSpawner::new(&config).populate(&mut world).unwrap();

        for &asteroid in &population.asteroids {
            let radius = world
                .get_component::<ColliderComponent>(asteroid)
                .and_then(|collider| collider.radius)
                .unwrap();
            assert!(radius >= config.asteroid_radius_min && radius <= config.asteroid_radius_max);
        }
    }
}
