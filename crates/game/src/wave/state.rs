//! Wave state machine for tracking wave progression.

use bevy::prelude::*;


/// Current phase of the encounter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum WavePhase {
    /// No encounter running
    #[default]
    Idle,
    /// Wave announced, waiting for its pre start delay
    PreStart { wave: usize },
    /// Draining the wave population
    Spawning { wave: usize },
    /// Everything issued, waiting for the last kills
    AwaitingClear { wave: usize },
    /// Wave cleared, moving to the next one
    Advancing { wave: usize },
    /// Last wave cleared
    Victory,
}

impl WavePhase {
    pub fn wave(&self) -> Option<usize> {
        match *self {
            WavePhase::PreStart { wave }
            | WavePhase::Spawning { wave }
            | WavePhase::AwaitingClear { wave }
            | WavePhase::Advancing { wave } => Some(wave),
            WavePhase::Idle | WavePhase::Victory => None,
        }
    }
}

/// Counters of the active wave, reset when a wave starts spawning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
pub struct WaveCounters {
    /// Size of the population, fixed at wave start
    pub total_population: u32,
    /// Spawned and not dead yet
    pub live: u32,
    /// Confirmed dead
    pub dead: u32,
}

impl WaveCounters {
    pub fn new(total_population: u32) -> Self {
        Self { total_population, live: 0, dead: 0 }
    }

    pub fn record_spawn(&mut self) {
        self.live += 1;
    }

    /// Counts one death. Returns `false` if no live enemy was left to die,
    /// the death is still counted.
    pub fn record_death(&mut self) -> bool {
        self.dead += 1;
        if self.live == 0 {
            warn!("death recorded with no live enemy, {} dead of {}", self.dead, self.total_population);
            return false;
        }
        self.live -= 1;
        true
    }

    pub fn is_clear(&self) -> bool {
        self.dead >= self.total_population
    }
}

/// Wave system state resource
#[derive(Resource, Debug, Clone, Default)]
pub struct WaveState {
    pub phase: WavePhase,
    /// Index of the wave the encounter started on
    pub first_wave: usize,
    pub counters: WaveCounters,
    /// Every enemy of the active wave has been spawned
    pub issuance_complete: bool,
    /// Set by the death tracker once the active wave is cleared
    pub cleared: bool,
    pub(crate) requested_start: Option<usize>,
    pub(crate) pre_start_timer: Option<Timer>,
}

impl WaveState {
    /// Index of the active wave, `None` when idle or victorious.
    pub fn current_wave(&self) -> Option<usize> {
        self.phase.wave()
    }

    pub fn is_spawning(&self) -> bool {
        matches!(self.phase, WavePhase::Spawning { .. })
    }

    pub fn is_victory(&self) -> bool {
        self.phase == WavePhase::Victory
    }

    /// Asks the controller to announce wave `index` as the first wave of the run.
    pub fn request_start(&mut self, index: usize) {
        self.phase = WavePhase::Idle;
        self.first_wave = index;
        self.requested_start = Some(index);
    }

    /// Resets the per-wave bookkeeping for a wave of `total_population` enemies.
    pub(crate) fn begin_wave(&mut self, total_population: u32) {
        self.counters = WaveCounters::new(total_population);
        self.issuance_complete = false;
        self.cleared = false;
    }
}

/// Wave progress notification, mostly for UI and logs.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveEvent {
    pub wave: usize,
    pub kind: WaveEventKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveEventKind {
    /// Wave announced, pre start delay running
    PreStart,
    /// Wave has started spawning
    Started,
    /// All enemies for wave have been spawned
    AllEnemiesIssued,
    /// All enemies killed, wave complete
    Cleared,
    /// Last wave cleared
    Victory,
}
