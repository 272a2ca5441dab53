//! Commands the wave controller sends to the rest of the game.
//!
//! The spawner only emits these; camera, music, player and scene code react
//! to them.

use bevy::{ecs::system::SystemParam, prelude::*};


/// Zoom the camera out by `offset`.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct CameraZoomCommand {
    pub offset: f32,
}

/// Queue the next music track.
#[derive(Event, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdvanceMusicTrack;

/// Turn player health regeneration back on.
#[derive(Event, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StartPlayerRegeneration;

/// Show the end of encounter screen.
#[derive(Event, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadVictoryPresentation;

#[derive(SystemParam)]
pub struct CollaboratorCommands<'w> {
    pub camera: EventWriter<'w, CameraZoomCommand>,
    pub music: EventWriter<'w, AdvanceMusicTrack>,
    pub regeneration: EventWriter<'w, StartPlayerRegeneration>,
    pub victory: EventWriter<'w, LoadVictoryPresentation>,
}
