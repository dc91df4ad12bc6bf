mod config;
pub mod database;
pub mod store;

pub use config::{ComebackConfig, Config, DecayConfig, ScoringConfig};
pub use database::Database;
pub use store::{MemoryStore, MomentumStore, MOMENTUM_STATE_KEY};

use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Returns `~/.config/momentum[-dev]/` based on MOMENTUM_ENV.
///
/// Set MOMENTUM_ENV=dev to use development data directory.
/// MOMENTUM_DATA_DIR, when set, is used verbatim instead.
///
/// # Errors
/// Returns an error if creating the data directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("MOMENTUM_DATA_DIR") {
        Some(explicit) => PathBuf::from(explicit),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("MOMENTUM_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("momentum-dev")
            } else {
                base_dir.join("momentum")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
