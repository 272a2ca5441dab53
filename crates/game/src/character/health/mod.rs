use bevy::prelude::*;
use serde::{Deserialize, Serialize};


#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HealthConfig {
    pub max: f32,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self { max: 100.0 }
    }
}


#[derive(Component, Reflect, Clone, Debug, Serialize, Default, Deserialize)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }

    pub fn heal(&mut self, amount: f32) {
        self.current = (self.current + amount).min(self.max);
    }
}

impl From<HealthConfig> for Health {
    fn from(value: HealthConfig) -> Self {
       Self { current: value.max, max: value.max }
    }
}


/// Inserted once health reaches zero. Consumers read it during
/// `WaveSystemSet::DeathManagement`, the entity is despawned right after.
#[derive(Component, Clone, Debug, Default)]
pub struct Death;

#[derive(Component, Reflect, Clone, Debug, Default)]
pub struct DamageAccumulator {
    pub total_damage: f32,
    pub hit_count: u32,
}

impl DamageAccumulator {
    pub fn hit(&mut self, damage: f32) {
        self.total_damage += damage;
        self.hit_count += 1;
    }
}


pub fn apply_accumulated_damage(
    mut commands: Commands,
    mut query: Query<(Entity, &mut DamageAccumulator, &mut Health), Without<Death>>,
) {
    for (entity, mut accumulator, mut health) in query.iter_mut() {

        if accumulator.total_damage > 0. {

            health.current -= accumulator.total_damage;

            accumulator.total_damage = 0.;
            accumulator.hit_count = 0;

            if health.current <= 0. {
                commands.entity(entity).insert(Death);
            }
        }
    }
}


pub fn apply_death(
    mut commands: Commands,
    query: Query<Entity, With<Death>>,
) {
    for entity in query.iter() {
        debug!("Entity {} died", entity);
        commands.entity(entity).despawn_recursive();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heal_is_capped_at_max() {
        let mut health: Health = HealthConfig { max: 50.0 }.into();
        health.current = 45.0;
        health.heal(20.0);
        assert_eq!(health.current, 50.0);
        assert!(health.is_full());
    }

    #[test]
    fn lethal_damage_inserts_death() {
        let mut app = App::new();
        app.add_systems(Update, apply_accumulated_damage);

        let mut accumulator = DamageAccumulator::default();
        accumulator.hit(30.0);
        accumulator.hit(30.0);
        let entity = app.world_mut().spawn((Health::from(HealthConfig { max: 50.0 }), accumulator)).id();

        app.update();

        assert!(app.world().get::<Death>(entity).is_some());
        assert_eq!(app.world().get::<DamageAccumulator>(entity).unwrap().total_damage, 0.0);
    }

    #[test]
    fn dead_entities_are_despawned() {
        let mut app = App::new();
        app.add_systems(Update, apply_death);

        let dead = app.world_mut().spawn(Death).id();
        let alive = app.world_mut().spawn(Health::default()).id();

        app.update();

        assert!(!app.world().entities().contains(dead));
        assert!(app.world().entities().contains(alive));
    }
}
