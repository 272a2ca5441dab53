mod args;

use std::time::Duration;

use args::get_args;
use bevy::{app::ScheduleRunnerPlugin, log::LogPlugin, prelude::*, state::app::StatesPlugin};
use game::{
    character::{enemy::Enemy, health::DamageAccumulator},
    plugins::{AppState, BaseZombieGamePlugin},
    wave::{WaveEvent, WaveSystemSet},
};
use rand::{rngs::StdRng, Rng, SeedableRng};


/// Stand-in for the player's weapons: hits one random enemy per tick.
#[derive(Resource)]
struct Defender {
    damage_per_second: f32,
    tick: Timer,
    rng: StdRng,
}

impl Defender {
    fn new(damage_per_second: f32, seed: Option<u64>) -> Self {
        Self {
            damage_per_second,
            tick: Timer::from_seconds(0.25, TimerMode::Repeating),
            rng: seed.map(StdRng::seed_from_u64).unwrap_or_else(StdRng::from_entropy),
        }
    }
}

fn main() -> AppExit {
    let (settings, damage_per_second) = get_args();
    let seed = settings.seed;

    App::new()
        .add_plugins(
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(1.0 / 60.0))),
        )
        .add_plugins(LogPlugin::default())
        .add_plugins(AssetPlugin::default())
        .add_plugins(StatesPlugin)
        .add_plugins(BaseZombieGamePlugin::new(settings))
        .insert_resource(Defender::new(damage_per_second, seed))
        .add_systems(
            Update,
            defender_system
                .run_if(in_state(AppState::InGame))
                .before(WaveSystemSet::DeathManagement),
        )
        .add_systems(Update, wave_event_log_system.after(WaveSystemSet::Spawning))
        .add_systems(OnEnter(AppState::Victory), exit_on_victory)
        .run()
}

fn defender_system(
    time: Res<Time>,
    mut defender: ResMut<Defender>,
    mut enemies: Query<&mut DamageAccumulator, With<Enemy>>,
) {
    if !defender.tick.tick(time.delta()).just_finished() {
        return;
    }

    let count = enemies.iter().count();
    if count == 0 {
        return;
    }

    let damage = defender.damage_per_second * defender.tick.duration().as_secs_f32();
    let target = defender.rng.gen_range(0..count);
    if let Some(mut accumulator) = enemies.iter_mut().nth(target) {
        accumulator.hit(damage);
    }
}

fn wave_event_log_system(mut events: EventReader<WaveEvent>) {
    for event in events.read() {
        info!("[wave {}] {:?}", event.wave + 1, event.kind);
    }
}

fn exit_on_victory(mut exit: EventWriter<AppExit>) {
    info!("arena is clear, bye");
    exit.send(AppExit::Success);
}
