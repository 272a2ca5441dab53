use bevy::{ecs::world::Command, prelude::*, utils::HashMap};
use utils::rng::SpawnRng;

use crate::character::{enemy::config::{EnemyArchetype, SpawnAffinity}, health::HealthConfig};

use super::{
    allocator::SpawnPoints,
    config::{affinity_of, ConfigError, EncounterConfig, WaveDefinition},
    occupancy::OccupancyTracker,
    scheduler::SpawnQueue,
    state::WaveState,
};


/// Read-only wave list and enemy table of the running encounter.
#[derive(Resource, Debug, Clone)]
pub struct Encounter {
    waves: Vec<WaveDefinition>,
    enemies: HashMap<String, EnemyArchetype>,
}

impl Encounter {
    pub fn wave(&self, index: usize) -> Option<&WaveDefinition> {
        self.waves.get(index)
    }

    pub fn wave_count(&self) -> usize {
        self.waves.len()
    }

    pub fn affinity_of(&self, enemy: &str) -> SpawnAffinity {
        affinity_of(&self.enemies, enemy)
    }

    pub fn health_of(&self, enemy: &str) -> HealthConfig {
        self.enemies
            .get(enemy)
            .map(|archetype| archetype.health.clone())
            .unwrap_or_default()
    }
}

/// Installs every encounter resource and asks the controller to start.
///
/// Built only from a config that passed validation, queue it with
/// `commands.queue(..)` or apply it to a `World` directly.
pub struct StartEncounter {
    encounter: Encounter,
    spawn_points: SpawnPoints,
    start_wave: usize,
    rng: SpawnRng,
}

impl StartEncounter {
    pub fn new(config: EncounterConfig, rng: SpawnRng) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            start_wave: config.start_wave_index,
            spawn_points: config.spawn_points.into(),
            encounter: Encounter { waves: config.waves, enemies: config.enemies },
            rng,
        })
    }

    /// Overrides the configured first wave. Debug only.
    pub fn with_start_wave(mut self, index: usize) -> Result<Self, ConfigError> {
        let len = self.encounter.wave_count();
        if index >= len {
            return Err(ConfigError::StartWaveOutOfRange { index, len });
        }
        self.start_wave = index;
        Ok(self)
    }
}

impl Command for StartEncounter {
    fn apply(self, world: &mut World) {
        info!(
            "starting encounter of {} waves at wave {} (seed {})",
            self.encounter.wave_count(),
            self.start_wave + 1,
            self.rng.seed()
        );

        let mut state = WaveState::default();
        state.request_start(self.start_wave);

        world.insert_resource(self.encounter);
        world.insert_resource(self.spawn_points);
        world.insert_resource(self.rng);
        world.insert_resource(OccupancyTracker::default());
        world.insert_resource(SpawnQueue::default());
        world.insert_resource(state);
    }
}
