use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::character::health::HealthConfig;


/// Which spawn point group an enemy type is placed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect, Serialize, Deserialize)]
pub enum SpawnAffinity {
    /// Runs in from the sides of the arena
    #[default]
    Ground,
    /// Flies in from above
    Sky,
    /// Shoots from a window, one enemy per window
    Window,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyArchetype {
    #[serde(default)]
    pub affinity: SpawnAffinity,
    #[serde(default)]
    pub health: HealthConfig,
}
