//! Bookkeeping of windowed spawn points that currently hold a live enemy.

use bevy::{prelude::*, utils::HashSet};


/// Exact identity of a spawn position.
///
/// Window points never move, so the bit pattern of their coordinates is a
/// stable key for the whole encounter. `-0.0` and `0.0` share a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointKey([u32; 2]);

impl From<Vec2> for PointKey {
    fn from(value: Vec2) -> Self {
        Self([(value.x + 0.0).to_bits(), (value.y + 0.0).to_bits()])
    }
}

/// Windowed positions occupied by a live enemy.
///
/// Lives for the whole encounter and is never cleared between waves: an
/// enemy that outlives its wave keeps its window.
#[derive(Resource, Debug, Default, Clone)]
pub struct OccupancyTracker {
    occupied: HashSet<PointKey>,
}

impl OccupancyTracker {
    /// Marks `position` as occupied. Returns `false` if it already was.
    pub fn reserve(&mut self, position: Vec2) -> bool {
        let inserted = self.occupied.insert(position.into());
        if !inserted {
            warn!("spawn point {:?} reserved twice without a release", position);
        }
        inserted
    }

    /// Frees `position`. Returns `false` if it was not occupied.
    pub fn release(&mut self, position: Vec2) -> bool {
        let removed = self.occupied.remove(&PointKey::from(position));
        if !removed {
            warn!("spawn point {:?} released but was not occupied", position);
        }
        removed
    }

    pub fn is_occupied(&self, position: Vec2) -> bool {
        self.occupied.contains(&PointKey::from(position))
    }

    pub fn len(&self) -> usize {
        self.occupied.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occupied.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserve_then_release() {
        let mut tracker = OccupancyTracker::default();
        let window = Vec2::new(4.0, 12.5);

        assert!(!tracker.is_occupied(window));
        assert!(tracker.reserve(window));
        assert!(tracker.is_occupied(window));
        assert_eq!(tracker.len(), 1);

        assert!(tracker.release(window));
        assert!(!tracker.is_occupied(window));
        assert!(tracker.is_empty());
    }

    #[test]
    fn double_reserve_is_rejected() {
        let mut tracker = OccupancyTracker::default();
        let window = Vec2::new(1.0, 1.0);

        assert!(tracker.reserve(window));
        assert!(!tracker.reserve(window));
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn release_without_reserve_is_rejected() {
        let mut tracker = OccupancyTracker::default();
        assert!(!tracker.release(Vec2::new(3.0, -2.0)));
    }

    #[test]
    fn signed_zero_is_the_same_position() {
        let mut tracker = OccupancyTracker::default();

        assert!(tracker.reserve(Vec2::new(-0.0, 5.0)));
        assert!(tracker.is_occupied(Vec2::new(0.0, 5.0)));
        assert!(!tracker.reserve(Vec2::new(0.0, 5.0)));
        assert!(tracker.release(Vec2::new(0.0, 5.0)));
        assert!(tracker.is_empty());
    }

    #[test]
    fn positions_are_independent() {
        let mut tracker = OccupancyTracker::default();
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(0.0, 1.0);

        tracker.reserve(a);
        assert!(!tracker.is_occupied(b));
        tracker.reserve(b);
        tracker.release(a);
        assert!(tracker.is_occupied(b));
        assert!(!tracker.is_occupied(a));
    }
}
