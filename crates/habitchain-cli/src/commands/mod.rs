pub mod config;
pub mod demo;
pub mod session;

use habitchain_core::{Config, HabitStore, SeededMultiplier, ThreadRngMultiplier};
use std::path::Path;

/// Load the config from `path`, or from the default location.
pub fn load_config(path: Option<&Path>) -> Result<Config, Box<dyn std::error::Error>> {
    let config = match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    Ok(config)
}

/// Build an empty store from config, seeding the multiplier source if asked.
pub fn build_store(config: &Config, seed: Option<u64>) -> Result<HabitStore, Box<dyn std::error::Error>> {
    let settings = config.store_settings()?;
    let range = settings.multiplier_range;
    let store = match seed {
        Some(seed) => HabitStore::new(settings, SeededMultiplier::new(seed, range)),
        None => HabitStore::new(settings, ThreadRngMultiplier::new(range)),
    };
    Ok(store)
}
