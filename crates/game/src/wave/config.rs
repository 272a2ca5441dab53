//! Wave encounter configuration loaded from RON files.
//!
//! Everything here is authored before the encounter starts and read-only at
//! runtime. [`EncounterConfig::validate`] must pass before any resource is
//! built from it: a bad config would leave the spawner retrying forever.

use bevy::{prelude::*, reflect::TypePath, utils::HashMap};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::character::enemy::config::{EnemyArchetype, SpawnAffinity};

/// One line of a wave population table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationEntry {
    pub enemy: String,
    pub count: u32,
}

impl PopulationEntry {
    pub fn new(enemy: impl Into<String>, count: u32) -> Self {
        Self { enemy: enemy.into(), count }
    }
}

/// Static description of one wave.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveDefinition {
    /// Enemy types and how many of each the wave spawns
    pub population: Vec<PopulationEntry>,
    /// Maximum enemies of this wave alive at once
    pub max_concurrent_spawned: u32,
    /// Range of seconds between two spawn attempts
    pub spawn_interval: (f32, f32),
    /// Seconds between the wave announcement and its first spawn
    #[serde(default)]
    pub pre_start_delay: f32,
    /// How far the camera zooms out when the wave is announced
    #[serde(default)]
    pub camera_zoom_offset: f32,
}

impl WaveDefinition {
    pub fn total_population(&self) -> u32 {
        self.population.iter().map(|entry| entry.count).sum()
    }

    /// Every enemy of the wave, one entry per individual.
    pub fn population_bag(&self) -> Vec<String> {
        self.population
            .iter()
            .flat_map(|entry| std::iter::repeat(entry.enemy.clone()).take(entry.count as usize))
            .collect()
    }
}

/// Author-time spawn point layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpawnPointsConfig {
    #[serde(default)]
    pub ground: Vec<Vec2>,
    #[serde(default)]
    pub sky: Vec<Vec2>,
    /// Window groups, unlocked one per wave
    #[serde(default)]
    pub windows: Vec<Vec<Vec2>>,
}

#[derive(Asset, TypePath, Debug, Clone, Serialize, Deserialize)]
pub struct EncounterConfig {
    pub waves: Vec<WaveDefinition>,
    pub spawn_points: SpawnPointsConfig,
    /// Enemy types missing from this table spawn on the ground
    #[serde(default)]
    pub enemies: HashMap<String, EnemyArchetype>,
    /// Debug override of the first wave. Keep at 0 when shipping.
    #[serde(default)]
    pub start_wave_index: usize,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("encounter has no waves")]
    NoWaves,
    #[error("start wave index {index} is out of range, encounter has {len} waves")]
    StartWaveOutOfRange { index: usize, len: usize },
    #[error("no ground spawn point configured")]
    EmptyGroundPoints,
    #[error("wave {wave} spawns sky enemies but no sky spawn point is configured")]
    EmptySkyPoints { wave: usize },
    #[error("wave {wave} spawns window enemies but no window spawn point is unlocked")]
    NoWindowPoints { wave: usize },
    #[error("wave {wave} has an empty population")]
    EmptyPopulation { wave: usize },
    #[error("wave {wave} allows zero enemies alive at once")]
    ZeroConcurrency { wave: usize },
    #[error("wave {wave} spawn interval ({min}, {max}) is invalid")]
    InvalidSpawnInterval { wave: usize, min: f32, max: f32 },
    #[error("wave {wave} has a negative pre start delay")]
    NegativeDelay { wave: usize },
    #[error("wave {wave} field `{field}` is not a finite number")]
    NonFinite { wave: usize, field: &'static str },
}

impl EncounterConfig {
    pub fn affinity_of(&self, enemy: &str) -> SpawnAffinity {
        affinity_of(&self.enemies, enemy)
    }

    /// Checks every condition that would make the encounter livelock or crash.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.waves.is_empty() {
            return Err(ConfigError::NoWaves);
        }
        if self.start_wave_index >= self.waves.len() {
            return Err(ConfigError::StartWaveOutOfRange {
                index: self.start_wave_index,
                len: self.waves.len(),
            });
        }
        if self.spawn_points.ground.is_empty() {
            return Err(ConfigError::EmptyGroundPoints);
        }

        for (index, wave) in self.waves.iter().enumerate() {
            self.validate_wave(index, wave)?;
        }

        Ok(())
    }

    fn validate_wave(&self, index: usize, wave: &WaveDefinition) -> Result<(), ConfigError> {
        if wave.total_population() == 0 {
            return Err(ConfigError::EmptyPopulation { wave: index });
        }
        if wave.max_concurrent_spawned == 0 {
            return Err(ConfigError::ZeroConcurrency { wave: index });
        }

        let (min, max) = wave.spawn_interval;
        if !min.is_finite() || !max.is_finite() || min < 0.0 || max < min {
            return Err(ConfigError::InvalidSpawnInterval { wave: index, min, max });
        }
        if !wave.pre_start_delay.is_finite() {
            return Err(ConfigError::NonFinite { wave: index, field: "pre_start_delay" });
        }
        if wave.pre_start_delay < 0.0 {
            return Err(ConfigError::NegativeDelay { wave: index });
        }
        if !wave.camera_zoom_offset.is_finite() {
            return Err(ConfigError::NonFinite { wave: index, field: "camera_zoom_offset" });
        }

        for entry in wave.population.iter().filter(|entry| entry.count > 0) {
            match self.affinity_of(&entry.enemy) {
                SpawnAffinity::Ground => {}
                SpawnAffinity::Sky => {
                    if self.spawn_points.sky.is_empty() {
                        return Err(ConfigError::EmptySkyPoints { wave: index });
                    }
                }
                SpawnAffinity::Window => {
                    let unlocked = unlocked_window_groups(self.spawn_points.windows.len(), index);
                    let has_point = self.spawn_points.windows[..unlocked]
                        .iter()
                        .any(|group| !group.is_empty());
                    if !has_point {
                        return Err(ConfigError::NoWindowPoints { wave: index });
                    }
                }
            }
        }

        Ok(())
    }
}

pub(crate) fn affinity_of(enemies: &HashMap<String, EnemyArchetype>, enemy: &str) -> SpawnAffinity {
    enemies
        .get(enemy)
        .map(|archetype| archetype.affinity)
        .unwrap_or_default()
}

/// Number of window groups eligible at `wave_index`: group `i` unlocks with wave `i`
/// and the last group stays unlocked for every later wave.
pub fn unlocked_window_groups(group_count: usize, wave_index: usize) -> usize {
    if group_count == 0 {
        return 0;
    }
    wave_index.min(group_count - 1) + 1
}

#[cfg(test)]
mod tests {
    use utils::bmap;

    use super::*;
    use crate::character::health::HealthConfig;

    fn wave(population: Vec<PopulationEntry>) -> WaveDefinition {
        WaveDefinition {
            population,
            max_concurrent_spawned: 2,
            spawn_interval: (0.5, 1.0),
            pre_start_delay: 2.0,
            camera_zoom_offset: 1.0,
        }
    }

    fn config() -> EncounterConfig {
        EncounterConfig {
            waves: vec![
                wave(vec![PopulationEntry::new("runner", 3)]),
                wave(vec![PopulationEntry::new("runner", 2), PopulationEntry::new("shooter", 1)]),
            ],
            spawn_points: SpawnPointsConfig {
                ground: vec![Vec2::new(-10.0, 0.0), Vec2::new(10.0, 0.0)],
                sky: vec![],
                windows: vec![vec![], vec![Vec2::new(0.0, 5.0)]],
            },
            enemies: bmap!(
                "runner" => EnemyArchetype { affinity: SpawnAffinity::Ground, health: HealthConfig::default() },
                "drone" => EnemyArchetype { affinity: SpawnAffinity::Sky, health: HealthConfig::default() },
                "shooter" => EnemyArchetype { affinity: SpawnAffinity::Window, health: HealthConfig::default() }
            ),
            start_wave_index: 0,
        }
    }

    #[test]
    fn valid_config_passes() {
        assert_eq!(config().validate(), Ok(()));
    }

    #[test]
    fn population_bag_expands_counts() {
        let wave = wave(vec![PopulationEntry::new("a", 2), PopulationEntry::new("b", 0), PopulationEntry::new("c", 1)]);
        let mut bag = wave.population_bag();
        bag.sort();
        assert_eq!(bag, vec!["a", "a", "c"]);
        assert_eq!(wave.total_population(), 3);
    }

    #[test]
    fn unknown_enemy_falls_back_to_ground() {
        assert_eq!(config().affinity_of("zombie_42"), SpawnAffinity::Ground);
        assert_eq!(config().affinity_of("drone"), SpawnAffinity::Sky);
    }

    #[test]
    fn empty_wave_list_is_rejected() {
        let mut config = config();
        config.waves.clear();
        assert_eq!(config.validate(), Err(ConfigError::NoWaves));
    }

    #[test]
    fn empty_ground_is_rejected() {
        let mut config = config();
        config.spawn_points.ground.clear();
        assert_eq!(config.validate(), Err(ConfigError::EmptyGroundPoints));
    }

    #[test]
    fn sky_enemy_without_sky_points_is_rejected() {
        let mut config = config();
        config.waves[1].population.push(PopulationEntry::new("drone", 1));
        assert_eq!(config.validate(), Err(ConfigError::EmptySkyPoints { wave: 1 }));
    }

    #[test]
    fn window_enemy_before_its_group_unlocks_is_rejected() {
        let mut config = config();
        config.waves[0].population.push(PopulationEntry::new("shooter", 1));
        assert_eq!(config.validate(), Err(ConfigError::NoWindowPoints { wave: 0 }));
    }

    #[test]
    fn inverted_interval_is_rejected() {
        let mut config = config();
        config.waves[1].spawn_interval = (2.0, 1.0);
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidSpawnInterval { wave: 1, min: 2.0, max: 1.0 })
        );
    }

    #[test]
    fn zero_concurrency_is_rejected() {
        let mut config = config();
        config.waves[0].max_concurrent_spawned = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroConcurrency { wave: 0 }));
    }

    #[test]
    fn empty_population_is_rejected() {
        let mut config = config();
        config.waves[0].population = vec![PopulationEntry::new("runner", 0)];
        assert_eq!(config.validate(), Err(ConfigError::EmptyPopulation { wave: 0 }));
    }

    #[test]
    fn negative_delay_is_rejected() {
        let mut config = config();
        config.waves[1].pre_start_delay = -1.0;
        assert_eq!(config.validate(), Err(ConfigError::NegativeDelay { wave: 1 }));
    }

    #[test]
    fn start_index_out_of_range_is_rejected() {
        let mut config = config();
        config.start_wave_index = 2;
        assert_eq!(config.validate(), Err(ConfigError::StartWaveOutOfRange { index: 2, len: 2 }));
    }

    #[test]
    fn unlocked_groups_grow_then_cap() {
        assert_eq!(unlocked_window_groups(0, 5), 0);
        assert_eq!(unlocked_window_groups(3, 0), 1);
        assert_eq!(unlocked_window_groups(3, 2), 3);
        assert_eq!(unlocked_window_groups(3, 9), 3);
    }

    #[test]
    fn deserializes_from_ron() {
        let source = r#"(
            waves: [
                (
                    population: [(enemy: "runner", count: 4)],
                    max_concurrent_spawned: 2,
                    spawn_interval: (0.5, 1.5),
                    camera_zoom_offset: 0.5,
                ),
            ],
            spawn_points: (
                ground: [(-20.0, 0.0), (20.0, 0.0)],
            ),
        )"#;
        let config: EncounterConfig = ron::from_str(source).unwrap();
        assert_eq!(config.waves[0].total_population(), 4);
        assert_eq!(config.waves[0].pre_start_delay, 0.0);
        assert_eq!(config.spawn_points.ground[1], Vec2::new(20.0, 0.0));
        assert!(config.spawn_points.windows.is_empty());
        assert_eq!(config.validate(), Ok(()));
    }
}
