use bevy::prelude::*;

use crate::{
    character::{health::{DamageAccumulator, Health, HealthConfig}, Character},
    wave::{SpawnSlot, WaveEnemy},
};

use super::{Enemy, EnemyTarget};

/// Spawns the gameplay side of an enemy at its slot, chasing `target`.
///
/// Visuals and physics are attached elsewhere by whoever watches `Added<Enemy>`.
pub fn spawn_enemy(
    commands: &mut Commands,
    kind: String,
    health: HealthConfig,
    slot: SpawnSlot,
    wave: usize,
    target: Entity,
) -> Entity {
    commands
        .spawn((
            Name::new(format!("{} (wave {})", kind, wave + 1)),
            Transform::from_translation(slot.position.extend(0.0)),
            Character,
            Enemy { kind },
            EnemyTarget(target),
            Health::from(health),
            DamageAccumulator::default(),
            WaveEnemy { wave, slot },
        ))
        .id()
}
