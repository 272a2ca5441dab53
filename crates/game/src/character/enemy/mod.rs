pub mod config;
pub mod create;

use bevy::prelude::*;


#[derive(Component, Reflect, Debug, Clone)]
#[reflect(Component)]
pub struct Enemy {
    /// Name of the enemy type in the encounter config
    pub kind: String,
}

/// Entity the enemy goes after, the player in practice.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyTarget(pub Entity);
