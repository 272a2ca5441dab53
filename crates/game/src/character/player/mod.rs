pub mod create;

use bevy::prelude::*;

use crate::{character::health::Health, wave::StartPlayerRegeneration};


#[derive(Component, Reflect, Default, Debug, Copy, Clone)]
#[reflect(Component)]
pub struct Player;

/// Health regained per second once regeneration is switched on.
#[derive(Component, Reflect, Debug, Clone, Copy)]
pub struct PlayerRegeneration {
    pub per_second: f32,
    pub active: bool,
}

impl Default for PlayerRegeneration {
    fn default() -> Self {
        Self { per_second: 5.0, active: false }
    }
}

pub fn start_regeneration_system(
    mut requests: EventReader<StartPlayerRegeneration>,
    mut query: Query<&mut PlayerRegeneration, With<Player>>,
) {
    if requests.read().count() == 0 {
        return;
    }

    for mut regeneration in query.iter_mut() {
        regeneration.active = true;
        info!("player regeneration started");
    }
}

/// Heals the player until full health, then switches regeneration off.
pub fn player_regeneration_system(
    time: Res<Time>,
    mut query: Query<(&mut Health, &mut PlayerRegeneration), With<Player>>,
) {
    for (mut health, mut regeneration) in query.iter_mut() {
        if !regeneration.active {
            continue;
        }

        health.heal(regeneration.per_second * time.delta_secs());

        if health.is_full() {
            regeneration.active = false;
        }
    }
}
