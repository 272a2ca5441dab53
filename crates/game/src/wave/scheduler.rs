//! Spawn loop of the active wave.
//!
//! One spawn attempt per cooldown: skip while the wave is at its live cap,
//! otherwise draw a random enemy from the remaining population and try to
//! place it. The cooldown is redrawn after every attempt, successful or not.
//! A failed placement keeps the enemy in the bag and simply retries later.

use bevy::prelude::*;
use utils::rng::SpawnRng;

use crate::character::{enemy::create::spawn_enemy, player::Player};

use super::{
    allocator::SpawnPoints,
    encounter::Encounter,
    occupancy::OccupancyTracker,
    state::{WaveEvent, WaveEventKind, WavePhase, WaveState},
};


/// Enemies of the active wave still waiting to be spawned.
#[derive(Resource, Debug, Default)]
pub struct SpawnQueue {
    wave: usize,
    bag: Vec<String>,
    cooldown: Option<Timer>,
}

impl SpawnQueue {
    /// Replaces the bag with the population of `wave`. The first attempt is immediate.
    pub fn load(&mut self, wave: usize, bag: Vec<String>) {
        self.wave = wave;
        self.bag = bag;
        self.cooldown = None;
    }

    pub fn wave(&self) -> usize {
        self.wave
    }

    pub fn remaining(&self) -> usize {
        self.bag.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bag.is_empty()
    }

    /// Wait before the next attempt. Restarted from zero by every attempt.
    pub fn cooldown(&self) -> Option<&Timer> {
        self.cooldown.as_ref()
    }

    /// Ticks the cooldown, `true` when an attempt is due.
    fn ready(&mut self, delta: std::time::Duration) -> bool {
        match self.cooldown.as_mut() {
            Some(cooldown) => cooldown.tick(delta).finished(),
            None => true,
        }
    }

    fn wait(&mut self, seconds: f32) {
        self.cooldown = Some(Timer::from_seconds(seconds, TimerMode::Once));
    }
}

pub fn wave_spawning_system(
    mut commands: Commands,
    time: Res<Time>,
    encounter: Res<Encounter>,
    spawn_points: Res<SpawnPoints>,
    mut occupancy: ResMut<OccupancyTracker>,
    mut queue: ResMut<SpawnQueue>,
    mut rng: ResMut<SpawnRng>,
    mut state: ResMut<WaveState>,
    players: Query<Entity, With<Player>>,
    mut wave_events: EventWriter<WaveEvent>,
) {
    let WavePhase::Spawning { wave } = state.phase else {
        return;
    };
    if state.issuance_complete || !queue.ready(time.delta()) {
        return;
    }

    let Some(definition) = encounter.wave(wave) else {
        panic!("spawning wave {} but the encounter only has {} waves", wave, encounter.wave_count());
    };

    if state.counters.live >= definition.max_concurrent_spawned {
        debug!(
            "enemy can't spawn, wave {} already has {} enemies alive",
            wave + 1,
            state.counters.live
        );
    } else if let Some(index) = rng.index(queue.bag.len()) {
        let kind = queue.bag[index].clone();
        let affinity = encounter.affinity_of(&kind);

        match spawn_points.allocate(affinity, wave, &occupancy, &mut rng) {
            Some(slot) => {
                let target = match players.get_single() {
                    Ok(player) => player,
                    Err(err) => panic!("wave spawner needs a single player to target: {}", err),
                };

                queue.bag.swap_remove(index);
                if slot.is_exclusive() {
                    occupancy.reserve(slot.position);
                }
                let health = encounter.health_of(&kind);
                let entity = spawn_enemy(&mut commands, kind, health, slot, wave, target);
                state.counters.record_spawn();

                debug!(
                    "spawned {} at {:?}, {} left in wave {}",
                    entity,
                    slot.position,
                    queue.bag.len(),
                    wave + 1
                );
            }
            None => {
                warn!(
                    "no {:?} spawn point available for {} in wave {}, retrying",
                    affinity,
                    kind,
                    wave + 1
                );
            }
        }
    }

    if queue.is_empty() {
        state.issuance_complete = true;
        queue.cooldown = None;
        info!("every enemy of wave {} has been spawned", wave + 1);
        wave_events.send(WaveEvent { wave, kind: WaveEventKind::AllEnemiesIssued });
        return;
    }

    let (min, max) = definition.spawn_interval;
    let delay = rng.range_f32(min, max);
    queue.wait(delay);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_queue_attempts_immediately() {
        let mut queue = SpawnQueue::default();
        queue.load(2, vec!["runner".to_string()]);
        assert!(queue.ready(std::time::Duration::ZERO));
        assert_eq!(queue.wave(), 2);
        assert_eq!(queue.remaining(), 1);
    }

    #[test]
    fn cooldown_blocks_until_elapsed() {
        let mut queue = SpawnQueue::default();
        queue.wait(1.0);
        assert_eq!(queue.cooldown().map(|timer| timer.elapsed()), Some(std::time::Duration::ZERO));
        assert!(!queue.ready(std::time::Duration::from_millis(600)));
        assert!(queue.ready(std::time::Duration::from_millis(400)));
    }
}
