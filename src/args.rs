use clap::Parser;

use game::encounter_asset::{EncounterSettings, ENCOUNTER_CONFIG_PATH};


#[derive(Parser, Debug)]
pub struct Opt {
    /// Encounter config, relative to the assets folder
    #[clap(short, long)]
    pub config: Option<String>,
    #[clap(short, long)]
    pub seed: Option<u64>,
    /// Index of the wave to start on, overrides the config
    #[clap(short = 'w', long)]
    pub start_wave: Option<usize>,
    /// Damage the simulated defender deals every second
    #[clap(short, long)]
    pub damage_per_second: Option<f32>,
}

pub fn get_args() -> (EncounterSettings, f32) {
    let args = Opt::parse();

    let settings = EncounterSettings {
        config_path: args.config.unwrap_or(ENCOUNTER_CONFIG_PATH.to_string()),
        seed: args.seed,
        start_wave: args.start_wave,
    };

    (settings, args.damage_per_second.unwrap_or(150.0))
}
