use bevy::prelude::*;

use crate::character::{health::{Health, HealthConfig}, Character};

use super::{Player, PlayerRegeneration};

pub fn create_player(
    commands: &mut Commands,
    health: HealthConfig,
    regeneration_per_second: f32,
    translation: Vec3,
) -> Entity {
    let entity = commands.spawn((
        Name::new("player"),
        Transform::from_translation(translation),
        Character,
        Player,
        Health::from(health),
        PlayerRegeneration { per_second: regeneration_per_second, active: false },
    )).id();

    info!("Adding player {} at {:?}", entity, translation);

    entity
}
