//! Wave enemy tracking components.

use bevy::prelude::*;

use crate::character::health::Death;

use super::{
    allocator::SpawnSlot,
    occupancy::OccupancyTracker,
    state::{WaveEvent, WaveEventKind, WavePhase, WaveState},
};


/// Handle of an enemy spawned by the wave system.
///
/// Remembers its wave and spawn slot so its death can be counted and its
/// window released. Removed as soon as the death is processed, so a death is
/// never counted twice.
#[derive(Component, Debug, Clone, Reflect)]
pub struct WaveEnemy {
    /// Wave index when this enemy was spawned
    pub wave: usize,
    pub slot: SpawnSlot,
}

/// Consumes the death of wave enemies and signals the wave clear exactly once.
pub fn wave_enemy_death_tracking_system(
    mut commands: Commands,
    query: Query<(Entity, &WaveEnemy), With<Death>>,
    mut occupancy: ResMut<OccupancyTracker>,
    mut state: ResMut<WaveState>,
    mut wave_events: EventWriter<WaveEvent>,
) {
    for (entity, enemy) in query.iter() {
        commands.entity(entity).remove::<WaveEnemy>();

        if enemy.slot.is_exclusive() {
            occupancy.release(enemy.slot.position);
        }

        if state.current_wave() == Some(enemy.wave) {
            state.counters.record_death();
        } else {
            debug!("enemy {} of wave {} died after its wave ended", entity, enemy.wave + 1);
        }
    }

    let wave = match state.phase {
        WavePhase::Spawning { wave } | WavePhase::AwaitingClear { wave } => wave,
        _ => return,
    };

    if !state.cleared && state.counters.is_clear() {
        state.cleared = true;
        info!("wave {} cleared, {} enemies killed", wave + 1, state.counters.dead);
        wave_events.send(WaveEvent { wave, kind: WaveEventKind::Cleared });
    }
}
