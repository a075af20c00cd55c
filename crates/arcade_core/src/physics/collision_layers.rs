//! Collision layer system for filtering collision detection
//!
//! Every collider sits on exactly one [`CollisionLayer`] and carries a
//! [`LayerMask`] of the layers it accepts. A pair is only tested when each
//! side accepts the other's layer, so either collider can veto the pair.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Category a collider belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionLayer {
    /// Player ship
    Player,
    /// Asteroids of any size
    Asteroid,
    /// Player-fired projectiles
    Projectile,
    /// Collectible power-ups
    PowerUp,
    /// Boss bodies and weak points
    Boss,
    /// Regular enemy ships
    Enemy,
    /// Projectiles fired by enemies and bosses
    EnemyProjectile,
}

impl CollisionLayer {
    /// Every layer, in bit order
    pub const ALL: [Self; 7] = [
        Self::Player,
        Self::Asteroid,
        Self::Projectile,
        Self::PowerUp,
        Self::Boss,
        Self::Enemy,
        Self::EnemyProjectile,
    ];

    /// Single-bit mask for this layer
    pub fn bit(self) -> LayerMask {
        match self {
            Self::Player => LayerMask::PLAYER,
            Self::Asteroid => LayerMask::ASTEROID,
            Self::Projectile => LayerMask::PROJECTILE,
            Self::PowerUp => LayerMask::POWER_UP,
            Self::Boss => LayerMask::BOSS,
            Self::Enemy => LayerMask::ENEMY,
            Self::EnemyProjectile => LayerMask::ENEMY_PROJECTILE,
        }
    }
}

bitflags! {
    /// Set of collision layers
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct LayerMask: u32 {
        /// Player ship
        const PLAYER = 1 << 0;
        /// Asteroids
        const ASTEROID = 1 << 1;
        /// Player projectiles
        const PROJECTILE = 1 << 2;
        /// Power-ups
        const POWER_UP = 1 << 3;
        /// Bosses
        const BOSS = 1 << 4;
        /// Enemy ships
        const ENEMY = 1 << 5;
        /// Enemy projectiles
        const ENEMY_PROJECTILE = 1 << 6;
    }
}

impl LayerMask {
    /// Whether `layer` is in this mask
    pub fn accepts(self, layer: CollisionLayer) -> bool {
        self.contains(layer.bit())
    }

    /// Build a mask from a list of layers
    ///
    /// ```
    /// use arcade_core::physics::{CollisionLayer, LayerMask};
    ///
    /// let mask = LayerMask::of(&[CollisionLayer::Player, CollisionLayer::Boss]);
    /// assert_eq!(mask, LayerMask::PLAYER | LayerMask::BOSS);
    /// ```
    pub fn of(layers: &[CollisionLayer]) -> Self {
        layers.iter().copied().collect()
    }
}

impl FromIterator<CollisionLayer> for LayerMask {
    fn from_iter<I: IntoIterator<Item = CollisionLayer>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |mask, layer| mask | layer.bit())
    }
}

impl From<CollisionLayer> for LayerMask {
    fn from(layer: CollisionLayer) -> Self {
        layer.bit()
    }
}

/// Check if two colliders should collide based on their layers and masks
///
/// B's layer must be in A's mask AND A's layer must be in B's mask.
pub fn should_collide(
    layer_a: CollisionLayer,
    mask_a: LayerMask,
    layer_b: CollisionLayer,
    mask_b: LayerMask,
) -> bool {
    mask_a.accepts(layer_b) && mask_b.accepts(layer_a)
}
