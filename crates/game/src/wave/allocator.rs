//! Spawn point selection per enemy affinity.
//!
//! Ground and sky points are shared freely: any number of enemies may spawn
//! on the same one. Window points are exclusive while occupied and unlock
//! group by group as waves progress.

use bevy::{prelude::*, utils::HashSet};
use utils::{math::{ground_reflow_offset, sky_reflow_offset}, rng::SpawnRng};

use crate::character::enemy::config::SpawnAffinity;

use super::{config::{unlocked_window_groups, SpawnPointsConfig}, occupancy::{OccupancyTracker, PointKey}};


/// Where an enemy was placed, kept on the enemy so its death can release it.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct SpawnSlot {
    pub position: Vec2,
    pub affinity: SpawnAffinity,
}

impl SpawnSlot {
    /// Only window slots are tracked for occupancy.
    pub fn is_exclusive(&self) -> bool {
        self.affinity == SpawnAffinity::Window
    }
}

/// Live spawn point layout of the encounter.
#[derive(Resource, Debug, Clone, Default)]
pub struct SpawnPoints {
    pub ground: Vec<Vec2>,
    pub sky: Vec<Vec2>,
    pub windows: Vec<Vec<Vec2>>,
}

impl From<SpawnPointsConfig> for SpawnPoints {
    fn from(value: SpawnPointsConfig) -> Self {
        Self { ground: value.ground, sky: value.sky, windows: value.windows }
    }
}

impl SpawnPoints {
    /// Resolves a spawn position for an enemy of `affinity` during wave `wave_index`.
    ///
    /// `None` only happens for window enemies when every unlocked window is
    /// occupied, or when the matching group is empty.
    pub fn allocate(
        &self,
        affinity: SpawnAffinity,
        wave_index: usize,
        occupancy: &OccupancyTracker,
        rng: &mut SpawnRng,
    ) -> Option<SpawnSlot> {
        let position = match affinity {
            SpawnAffinity::Ground => rng.pick(&self.ground).copied(),
            SpawnAffinity::Sky => rng.pick(&self.sky).copied(),
            SpawnAffinity::Window => self.free_window(wave_index, occupancy, rng),
        }?;

        Some(SpawnSlot { position, affinity })
    }

    /// Window points unlocked at `wave_index`, in group order.
    pub fn eligible_windows(&self, wave_index: usize) -> impl Iterator<Item = Vec2> + '_ {
        let unlocked = unlocked_window_groups(self.windows.len(), wave_index);
        self.windows[..unlocked].iter().flatten().copied()
    }

    fn free_window(&self, wave_index: usize, occupancy: &OccupancyTracker, rng: &mut SpawnRng) -> Option<Vec2> {
        let mut candidates: Vec<Vec2> = self.eligible_windows(wave_index).collect();
        rng.shuffle(&mut candidates);

        // The same position may appear in several groups, test it once per call.
        let mut tested: HashSet<PointKey> = HashSet::default();

        for candidate in candidates {
            if !tested.insert(candidate.into()) {
                continue;
            }
            if !occupancy.is_occupied(candidate) {
                return Some(candidate);
            }
        }

        None
    }

    /// Shifts ground and sky points toward the player's side before a wave
    /// whose camera zooms out by `zoom_offset`. Window points stay where they are.
    pub fn reflow(&mut self, player: Vec2, zoom_offset: f32) {
        for point in self.ground.iter_mut() {
            *point += ground_reflow_offset(*point, player, zoom_offset);
        }
        for point in self.sky.iter_mut() {
            *point += sky_reflow_offset(*point, player, zoom_offset);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points() -> SpawnPoints {
        SpawnPoints {
            ground: vec![Vec2::new(-10.0, 0.0), Vec2::new(10.0, 0.0)],
            sky: vec![Vec2::new(-5.0, 10.0), Vec2::new(5.0, 10.0)],
            windows: vec![
                vec![Vec2::new(0.0, 4.0)],
                vec![Vec2::new(2.0, 4.0), Vec2::new(4.0, 4.0)],
                vec![Vec2::new(6.0, 4.0)],
            ],
        }
    }

    #[test]
    fn ground_and_sky_always_resolve() {
        let points = points();
        let mut rng = SpawnRng::new(1);
        let mut occupancy = OccupancyTracker::default();
        for p in points.ground.iter().chain(points.sky.iter()) {
            occupancy.reserve(*p);
        }

        for _ in 0..50 {
            let ground = points.allocate(SpawnAffinity::Ground, 0, &occupancy, &mut rng).unwrap();
            assert!(points.ground.contains(&ground.position));
            assert!(!ground.is_exclusive());

            let sky = points.allocate(SpawnAffinity::Sky, 0, &occupancy, &mut rng).unwrap();
            assert!(points.sky.contains(&sky.position));
        }
    }

    #[test]
    fn empty_sky_group_does_not_resolve() {
        let mut points = points();
        points.sky.clear();
        let mut rng = SpawnRng::new(1);
        assert_eq!(points.allocate(SpawnAffinity::Sky, 0, &OccupancyTracker::default(), &mut rng), None);
    }

    #[test]
    fn eligible_windows_unlock_by_wave() {
        let points = points();
        let wave0: Vec<Vec2> = points.eligible_windows(0).collect();
        let wave2: Vec<Vec2> = points.eligible_windows(2).collect();

        assert_eq!(wave0, vec![Vec2::new(0.0, 4.0)]);
        assert_eq!(wave2.len(), 4);
        assert_eq!(points.eligible_windows(7).count(), 4);
    }

    #[test]
    fn eligible_windows_never_shrink() {
        let points = points();
        for wave in 0..6 {
            let current: Vec<Vec2> = points.eligible_windows(wave).collect();
            let next: Vec<Vec2> = points.eligible_windows(wave + 1).collect();
            assert!(current.iter().all(|p| next.contains(p)), "wave {} set not included in wave {}", wave, wave + 1);
        }
    }

    #[test]
    fn occupied_window_is_never_returned() {
        let points = points();
        let mut rng = SpawnRng::new(99);
        let mut occupancy = OccupancyTracker::default();
        occupancy.reserve(Vec2::new(2.0, 4.0));
        occupancy.reserve(Vec2::new(6.0, 4.0));

        for _ in 0..100 {
            let slot = points.allocate(SpawnAffinity::Window, 2, &occupancy, &mut rng).unwrap();
            assert!(!occupancy.is_occupied(slot.position));
            assert!(slot.is_exclusive());
        }
    }

    #[test]
    fn last_free_window_is_always_found() {
        let points = points();
        let mut occupancy = OccupancyTracker::default();
        for p in points.eligible_windows(2).filter(|p| *p != Vec2::new(4.0, 4.0)) {
            occupancy.reserve(p);
        }

        for seed in 0..50 {
            let mut rng = SpawnRng::new(seed);
            let slot = points.allocate(SpawnAffinity::Window, 2, &occupancy, &mut rng);
            assert_eq!(slot.map(|s| s.position), Some(Vec2::new(4.0, 4.0)));
        }
    }

    #[test]
    fn all_windows_occupied_returns_none() {
        let points = points();
        let mut rng = SpawnRng::new(5);
        let mut occupancy = OccupancyTracker::default();
        occupancy.reserve(Vec2::new(0.0, 4.0));

        assert_eq!(points.allocate(SpawnAffinity::Window, 0, &occupancy, &mut rng), None);
        // Locked groups stay out of reach even though they are free.
        assert!(points.allocate(SpawnAffinity::Window, 1, &occupancy, &mut rng).is_some());
    }

    #[test]
    fn duplicate_window_positions_are_handled() {
        let points = SpawnPoints {
            windows: vec![vec![Vec2::new(1.0, 1.0)], vec![Vec2::new(1.0, 1.0)]],
            ..points()
        };
        let mut rng = SpawnRng::new(3);
        let mut occupancy = OccupancyTracker::default();
        occupancy.reserve(Vec2::new(1.0, 1.0));

        assert_eq!(points.allocate(SpawnAffinity::Window, 1, &occupancy, &mut rng), None);
    }

    #[test]
    fn signed_zero_window_is_one_window() {
        let points = SpawnPoints {
            windows: vec![vec![Vec2::new(-0.0, 5.0)], vec![Vec2::new(0.0, 5.0)]],
            ..points()
        };
        let mut rng = SpawnRng::new(8);
        let mut occupancy = OccupancyTracker::default();

        let slot = points.allocate(SpawnAffinity::Window, 1, &occupancy, &mut rng).unwrap();
        occupancy.reserve(slot.position);

        for _ in 0..20 {
            assert_eq!(points.allocate(SpawnAffinity::Window, 1, &occupancy, &mut rng), None);
        }
    }

    #[test]
    fn reflow_moves_ground_and_sky_only() {
        let mut points = points();
        let windows_before = points.windows.clone();

        points.reflow(Vec2::new(0.0, 0.0), 1.5);

        assert_eq!(points.ground, vec![Vec2::new(-7.0, 0.0), Vec2::new(7.0, 0.0)]);
        assert_eq!(points.sky, vec![Vec2::new(-2.0, 13.0), Vec2::new(2.0, 13.0)]);
        assert_eq!(points.windows, windows_before);
    }
}
