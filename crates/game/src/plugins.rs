use bevy::prelude::*;
use bevy_common_assets::ron::RonAssetPlugin;

use crate::{
    audio::ZAudioPlugin,
    camera::{CameraControlPlugin, CameraSettings, GameCamera},
    character::{
        health::HealthConfig,
        player::{create::create_player, player_regeneration_system, start_regeneration_system},
    },
    encounter_asset::{add_encounter_asset, loading_encounter_system, EncounterSettings},
    wave::{EncounterConfig, LoadVictoryPresentation, WaveSystemPlugin, WaveSystemSet},
};

#[derive(Debug, Clone, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    InGame,
    Victory,
}

/// Everything needed to play an encounter from a RON file.
///
/// Needs the asset and state plugins (`DefaultPlugins`, or `MinimalPlugins`
/// with `AssetPlugin` and `StatesPlugin` for a headless run).
pub struct BaseZombieGamePlugin { settings: EncounterSettings }

impl BaseZombieGamePlugin {
    pub fn new(settings: EncounterSettings) -> Self {
        Self { settings }
    }
}

impl Plugin for BaseZombieGamePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RonAssetPlugin::<EncounterConfig>::new(&["ron"]));

        app.add_plugins(WaveSystemPlugin);
        app.add_plugins(CameraControlPlugin);
        app.add_plugins(ZAudioPlugin {});

        app.insert_resource(self.settings.clone());
        app.init_state::<AppState>();

        app.add_systems(Startup, (add_encounter_asset, setup_arena));
        app.add_systems(Update, loading_encounter_system.run_if(in_state(AppState::Loading)));

        app.add_systems(Update, (
            start_regeneration_system,
            player_regeneration_system,
            victory_presentation_system,
        ).chain().in_set(WaveSystemSet::Collaborators));
    }
}

fn setup_arena(mut commands: Commands, settings: Res<CameraSettings>) {
    commands.spawn((
        GameCamera::new(&settings),
        OrthographicProjection { scale: settings.default_zoom, ..OrthographicProjection::default_2d() },
    ));

    create_player(&mut commands, HealthConfig::default(), 5.0, Vec3::ZERO);
}

fn victory_presentation_system(
    mut requests: EventReader<LoadVictoryPresentation>,
    mut app_state: ResMut<NextState<AppState>>,
) {
    if requests.read().count() > 0 {
        info!("gg, loading the victory screen");
        app_state.set(AppState::Victory);
    }
}
