pub mod config;
pub mod history;
pub mod momentum;

use momentum_core::{Config, Database, MomentumTracker, SystemClock};

/// Open the on-disk tracker using the rules from `config.toml`.
pub fn open_tracker(
) -> Result<MomentumTracker<Database, SystemClock>, Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let db = Database::open()?;
    Ok(MomentumTracker::with_rules(db, SystemClock, config.rules()))
}
