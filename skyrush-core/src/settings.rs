use config::{Config, ConfigError, File};
use lazy_static::lazy_static;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct Settings {
    pub tick_ms: u64,
    pub countdown_secs: f64,
    pub checkpoint_radius: f64,
    pub max_checkpoints: usize,
    pub obstacle_count: usize,
    pub obstacle_collision_radius: f64,
    pub time_bonus_secs: f64,
    pub time_attack_limit_secs: f64,
    pub boost_multiplier: f64,
    pub boost_particle_chance: f64,
    pub result_display_secs: f64,
    // path to a hand-authored world layout; empty means scatter one procedurally
    pub world_file: String,
}

impl Settings {
    fn new() -> Result<Settings, ConfigError> {
        let config = Config::builder()
            .set_default("tick_ms", 30)?
            .set_default("countdown_secs", 3.0)?
            .set_default("checkpoint_radius", 3.0)?
            .set_default("max_checkpoints", 8)?
            .set_default("obstacle_count", 10)?
            .set_default("obstacle_collision_radius", 3.0)?
            .set_default("time_bonus_secs", 10.0)?
            .set_default("time_attack_limit_secs", 60.0)?
            .set_default("boost_multiplier", 2.0)?
            .set_default("boost_particle_chance", 0.2)?
            .set_default("result_display_secs", 2.0)?
            .set_default("world_file", "")?
            .add_source(File::with_name("config.yaml").required(false))
            .build()?;

        config.try_deserialize()
    }
}

lazy_static! {
    pub static ref GLOBAL_CONFIG: Settings = Settings::new().expect("failed to read config file");
}
