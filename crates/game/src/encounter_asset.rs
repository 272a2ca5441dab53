use bevy::{asset::LoadState, prelude::*};
use utils::rng::SpawnRng;

use crate::{plugins::AppState, wave::{EncounterConfig, StartEncounter}};

pub const ENCOUNTER_CONFIG_PATH: &str = "waves/encounter.ron";


/// How the encounter of this run is picked.
#[derive(Resource, Debug, Clone)]
pub struct EncounterSettings {
    pub config_path: String,
    /// Fixed seed for a replayable run, random otherwise
    pub seed: Option<u64>,
    /// Debug override of the config's first wave
    pub start_wave: Option<usize>,
}

impl Default for EncounterSettings {
    fn default() -> Self {
        Self { config_path: ENCOUNTER_CONFIG_PATH.to_string(), seed: None, start_wave: None }
    }
}

#[derive(Resource)]
pub struct EncounterAsset {
    pub config: Handle<EncounterConfig>,
}

pub fn add_encounter_asset(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    settings: Res<EncounterSettings>,
) {
    let config = asset_server.load(settings.config_path.clone());

    commands.insert_resource(EncounterAsset { config });
}

/// Waits for the encounter config, validates it and starts the encounter.
/// A config that fails to load or validate stops the app before any wave.
pub fn loading_encounter_system(
    mut commands: Commands,
    mut app_state: ResMut<NextState<AppState>>,
    mut exit: EventWriter<AppExit>,
    encounter_asset: Res<EncounterAsset>,
    asset_server: Res<AssetServer>,
    configs: Res<Assets<EncounterConfig>>,
    settings: Res<EncounterSettings>,
) {
    if let LoadState::Failed(err) = asset_server.load_state(&encounter_asset.config) {
        error!("could not load encounter config {}: {}", settings.config_path, err);
        exit.send(AppExit::error());
        return;
    }

    let Some(config) = configs.get(&encounter_asset.config) else {
        return;
    };

    let rng = settings.seed.map(SpawnRng::new).unwrap_or_else(SpawnRng::from_entropy);
    let start = StartEncounter::new(config.clone(), rng).and_then(|start| match settings.start_wave {
        Some(index) => start.with_start_wave(index),
        None => Ok(start),
    });

    match start {
        Ok(start) => {
            commands.queue(start);
            app_state.set(AppState::InGame);
            info!("loading of encounter {} is done, now entering the arena", settings.config_path);
        }
        Err(err) => {
            error!("invalid encounter config {}: {}", settings.config_path, err);
            exit.send(AppExit::error());
        }
    }
}
