pub mod enemy;
pub mod health;
pub mod player;

use bevy::prelude::*;


/// Anything with health that takes part in the fight, player or enemy.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Character;
