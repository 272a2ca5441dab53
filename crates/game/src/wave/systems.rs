//! Wave lifecycle controller.
//!
//! ```text
//! Idle → PreStart → Spawning → AwaitingClear → Advancing → Victory
//!           ↑                                      │
//!           └──────────────────────────────────────┘
//! ```

use bevy::{ecs::system::SystemParam, prelude::*};

use crate::character::player::Player;

use super::{
    allocator::SpawnPoints,
    commands::{AdvanceMusicTrack, CameraZoomCommand, CollaboratorCommands, LoadVictoryPresentation, StartPlayerRegeneration},
    encounter::Encounter,
    scheduler::SpawnQueue,
    state::{WaveEvent, WaveEventKind, WavePhase, WaveState},
};


#[derive(SystemParam)]
pub struct WaveController<'w, 's> {
    time: Res<'w, Time>,
    encounter: Res<'w, Encounter>,
    state: ResMut<'w, WaveState>,
    spawn_points: ResMut<'w, SpawnPoints>,
    queue: ResMut<'w, SpawnQueue>,
    players: Query<'w, 's, &'static Transform, With<Player>>,
    collaborators: CollaboratorCommands<'w>,
    wave_events: EventWriter<'w, WaveEvent>,
}

impl WaveController<'_, '_> {
    /// Runs the transition of the current phase, at most one per frame.
    fn step(&mut self) {
        match self.state.phase {
            WavePhase::Idle => {
                if let Some(first) = self.state.requested_start.take() {
                    self.enter_pre_start(first);
                }
            }
            WavePhase::PreStart { wave } => {
                let delta = self.time.delta();
                let ready = match self.state.pre_start_timer.as_mut() {
                    Some(timer) => timer.tick(delta).finished(),
                    None => true,
                };
                if ready {
                    self.state.pre_start_timer = None;
                    self.enter_spawning(wave);
                }
            }
            WavePhase::Spawning { wave } => {
                if self.state.issuance_complete {
                    self.state.phase = WavePhase::AwaitingClear { wave };
                }
            }
            WavePhase::AwaitingClear { wave } => {
                if self.state.cleared {
                    self.state.phase = WavePhase::Advancing { wave };
                }
            }
            WavePhase::Advancing { wave } => self.advance(wave),
            WavePhase::Victory => {}
        }
    }

    fn enter_pre_start(&mut self, wave: usize) {
        let Some(definition) = self.encounter.wave(wave) else {
            panic!("wave {} does not exist, encounter has {} waves", wave, self.encounter.wave_count());
        };
        let first_of_run = wave == self.state.first_wave;

        if !first_of_run {
            self.collaborators.regeneration.send(StartPlayerRegeneration);

            let player = match self.players.get_single() {
                Ok(transform) => transform.translation.truncate(),
                Err(err) => panic!("wave controller needs a single player to place spawn points: {}", err),
            };
            self.spawn_points.reflow(player, definition.camera_zoom_offset);
        }

        self.collaborators.camera.send(CameraZoomCommand { offset: definition.camera_zoom_offset });

        self.state.pre_start_timer = if first_of_run {
            None
        } else {
            Some(Timer::from_seconds(definition.pre_start_delay, TimerMode::Once))
        };
        self.state.phase = WavePhase::PreStart { wave };

        info!("wave {} is about to start", wave + 1);
        self.wave_events.send(WaveEvent { wave, kind: WaveEventKind::PreStart });
    }

    fn enter_spawning(&mut self, wave: usize) {
        let Some(definition) = self.encounter.wave(wave) else {
            panic!("wave {} does not exist, encounter has {} waves", wave, self.encounter.wave_count());
        };

        self.state.begin_wave(definition.total_population());
        self.queue.load(wave, definition.population_bag());
        self.state.phase = WavePhase::Spawning { wave };

        info!(
            "wave {} started, {} enemies, at most {} alive",
            wave + 1,
            definition.total_population(),
            definition.max_concurrent_spawned
        );
        self.wave_events.send(WaveEvent { wave, kind: WaveEventKind::Started });
    }

    fn advance(&mut self, wave: usize) {
        let next = wave + 1;

        if next < self.encounter.wave_count() {
            self.collaborators.music.send(AdvanceMusicTrack);
            self.enter_pre_start(next);
        } else {
            self.state.phase = WavePhase::Victory;
            info!("every wave cleared, encounter won");
            self.collaborators.victory.send(LoadVictoryPresentation);
            self.wave_events.send(WaveEvent { wave, kind: WaveEventKind::Victory });
        }
    }
}

pub fn wave_state_machine_system(mut controller: WaveController) {
    controller.step();
}
