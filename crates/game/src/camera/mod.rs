use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::wave::{CameraZoomCommand, WaveSystemSet};


// Plugin to add all camera systems
pub struct CameraControlPlugin;

impl Plugin for CameraControlPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraSettings>()
            .add_event::<CameraZoomCommand>()
            .add_systems(Update, (
                camera_zoom_command_system,
                camera_zoom_system,
            ).chain().in_set(WaveSystemSet::Collaborators));
    }
}

#[derive(Resource, Clone, Debug, Serialize, Deserialize)]
pub struct CameraSettings {
    // How quickly the camera interpolates to the target zoom
    pub lerp_speed: f32,
    // Zoom level of the first wave
    pub default_zoom: f32,
    // Maximum zoom out, whatever the waves ask for
    pub max_zoom_out: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            lerp_speed: 5.0,
            default_zoom: 1.0,
            max_zoom_out: 15.0,
        }
    }
}

// Component to mark the camera entity
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct GameCamera {
    pub target_zoom: f32,
}

impl GameCamera {
    pub fn new(settings: &CameraSettings) -> Self {
        Self { target_zoom: settings.default_zoom }
    }
}

/// Each wave zooms the camera out a bit more than the previous one.
pub fn camera_zoom_command_system(
    mut commands: EventReader<CameraZoomCommand>,
    settings: Res<CameraSettings>,
    mut camera_query: Query<&mut GameCamera>,
) {
    for command in commands.read() {
        for mut camera in camera_query.iter_mut() {
            camera.target_zoom = (camera.target_zoom + command.offset).min(settings.max_zoom_out);
            info!("camera zooming to {}", camera.target_zoom);
        }
    }
}

// Apply zoom by easing the orthographic projection scale
pub fn camera_zoom_system(
    time: Res<Time>,
    settings: Res<CameraSettings>,
    mut camera_query: Query<(&GameCamera, &mut OrthographicProjection)>,
) {
    let lerp_factor = (settings.lerp_speed * time.delta_secs()).min(1.0);

    for (camera, mut projection) in camera_query.iter_mut() {
        let current_zoom = projection.scale;
        projection.scale = current_zoom + (camera.target_zoom - current_zoom) * lerp_factor;
    }
}
