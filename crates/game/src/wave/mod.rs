//! Wave based enemy spawning.
//!
//! # Overview
//!
//! An encounter is an ordered list of waves. Each wave announces itself
//! (camera zoom, spawn point reflow, player regeneration), waits its pre
//! start delay, then drains its population into the arena under a cap of
//! enemies alive at once. Once every enemy of the wave is dead the next wave
//! is announced, after the last one the victory presentation is requested.
//!
//! Ground and sky enemies share their spawn points freely. Window enemies
//! need a free window, and windows unlock group by group as waves progress.
//!
//! # Usage
//!
//! ```rust,ignore
//! app.add_plugins(WaveSystemPlugin);
//! commands.queue(StartEncounter::new(config, SpawnRng::new(seed))?);
//! ```
//!
//! # Configuration
//!
//! Configure via `assets/waves/encounter.ron`. See `config::EncounterConfig` for options.

pub mod allocator;
pub mod commands;
pub mod config;
pub mod encounter;
pub mod occupancy;
pub mod scheduler;
pub mod state;
pub mod systems;
pub mod tracking;

use bevy::prelude::*;

use crate::character::health::{apply_accumulated_damage, apply_death};

pub use allocator::{SpawnPoints, SpawnSlot};
pub use commands::{AdvanceMusicTrack, CameraZoomCommand, LoadVictoryPresentation, StartPlayerRegeneration};
pub use config::{ConfigError, EncounterConfig, PopulationEntry, SpawnPointsConfig, WaveDefinition};
pub use encounter::{Encounter, StartEncounter};
pub use occupancy::OccupancyTracker;
pub use scheduler::SpawnQueue;
pub use state::{WaveCounters, WaveEvent, WaveEventKind, WavePhase, WaveState};
pub use tracking::WaveEnemy;


/// Frame ordering of the encounter. Deaths are processed before the
/// controller looks at the counters, the controller runs before the spawner,
/// collaborators react last to the commands of the same frame.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WaveSystemSet {
    DeathManagement,
    StateMachine,
    Spawning,
    Collaborators,
}

/// Plugin that adds the wave spawning system.
pub struct WaveSystemPlugin;

impl Plugin for WaveSystemPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<WaveEvent>()
            .add_event::<CameraZoomCommand>()
            .add_event::<AdvanceMusicTrack>()
            .add_event::<StartPlayerRegeneration>()
            .add_event::<LoadVictoryPresentation>();

        app.init_resource::<WaveState>();
        app.init_resource::<OccupancyTracker>();
        app.init_resource::<SpawnQueue>();

        app.register_type::<WavePhase>();
        app.register_type::<WaveEnemy>();

        app.configure_sets(
            Update,
            (
                WaveSystemSet::DeathManagement,
                WaveSystemSet::StateMachine,
                WaveSystemSet::Spawning,
                WaveSystemSet::Collaborators,
            )
                .chain(),
        );

        app.add_systems(
            Update,
            (
                apply_accumulated_damage,
                tracking::wave_enemy_death_tracking_system,
                apply_death,
            )
                .chain()
                .in_set(WaveSystemSet::DeathManagement),
        );

        app.add_systems(
            Update,
            (
                systems::wave_state_machine_system
                    .run_if(resource_exists::<Encounter>)
                    .in_set(WaveSystemSet::StateMachine),
                scheduler::wave_spawning_system
                    .run_if(resource_exists::<Encounter>)
                    .in_set(WaveSystemSet::Spawning),
            ),
        );
    }
}
