use bevy::prelude::*;

use crate::wave::{AdvanceMusicTrack, WaveSystemSet};


pub struct ZAudioPlugin {}

impl Plugin for ZAudioPlugin {
   fn build(&self, app: &mut App) {
       app.init_resource::<MusicPlaylist>();
       app.add_event::<AdvanceMusicTrack>();
       app.add_systems(Update, (
           advance_music_track_system,
           music_loop_system,
       ).chain().in_set(WaveSystemSet::Collaborators));
   }
}

/// Encounter soundtrack, one track per stage of the fight.
///
/// Advancing never cuts the current track: the next one is queued and
/// starts when the current one loops. The last track loops forever.
#[derive(Resource, Debug, Clone)]
pub struct MusicPlaylist {
    pub tracks: Vec<String>,
    current: usize,
    queued: Option<usize>,
    loop_timer: Timer,
}

impl Default for MusicPlaylist {
    fn default() -> Self {
        Self::new(vec![
            "sounds/wave_calm.ogg".to_string(),
            "sounds/wave_tense.ogg".to_string(),
            "sounds/wave_final.ogg".to_string(),
        ], 32.0)
    }
}

impl MusicPlaylist {
    pub fn new(tracks: Vec<String>, loop_seconds: f32) -> Self {
        Self {
            tracks,
            current: 0,
            queued: None,
            loop_timer: Timer::from_seconds(loop_seconds, TimerMode::Repeating),
        }
    }

    pub fn current_track(&self) -> Option<&str> {
        self.tracks.get(self.current).map(String::as_str)
    }

    pub fn queued_track(&self) -> Option<&str> {
        self.queued.and_then(|index| self.tracks.get(index)).map(String::as_str)
    }

    /// Queues the track after the current (or already queued) one.
    pub fn advance(&mut self) {
        let from = self.queued.unwrap_or(self.current);
        let next = from + 1;
        if next < self.tracks.len() {
            self.queued = Some(next);
        }
    }

    /// Called when the current track reaches its end.
    pub fn on_track_end(&mut self) {
        if let Some(next) = self.queued.take() {
            self.current = next;
        }
    }
}

fn advance_music_track_system(
    mut requests: EventReader<AdvanceMusicTrack>,
    mut playlist: ResMut<MusicPlaylist>,
) {
    for _ in requests.read() {
        playlist.advance();
        match playlist.queued_track() {
            Some(track) => info!("music: {} queued after the current track", track),
            None => debug!("music: already on the last track"),
        }
    }
}

fn music_loop_system(time: Res<Time>, mut playlist: ResMut<MusicPlaylist>) {
    if !playlist.loop_timer.tick(time.delta()).just_finished() {
        return;
    }

    let before = playlist.current;
    playlist.on_track_end();
    if playlist.current != before {
        if let Some(track) = playlist.current_track() {
            info!("music: now playing {}", track);
        }
    }
}
