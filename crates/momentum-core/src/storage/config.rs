//! TOML-based application configuration.
//!
//! Stores the tunable momentum rules:
//! - Decay amounts and which weekdays count as weekend
//! - Completion points and bonuses
//! - Comeback boost parameters
//!
//! Configuration is stored at `~/.config/momentum/config.toml`.

use std::path::{Path, PathBuf};

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::{ConfigError, Result};
use crate::momentum::{ComebackRules, DecayRules, MomentumRules, ScoringRules};

/// Decay configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecayConfig {
    #[serde(default = "default_decay_weekday")]
    pub weekday: f64,
    #[serde(default = "default_decay_weekend")]
    pub weekend: f64,
    #[serde(default = "default_decay_rest_day")]
    pub rest_day: f64,
    #[serde(default = "default_weekend_days")]
    pub weekend_days: Vec<Weekday>,
}

/// Completion scoring configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default = "default_points_low")]
    pub low: f64,
    #[serde(default = "default_points_medium")]
    pub medium: f64,
    #[serde(default = "default_points_high")]
    pub high: f64,
    #[serde(default = "default_first_of_day_bonus")]
    pub first_of_day_bonus: f64,
    #[serde(default = "default_bonus_every")]
    pub bonus_every: u32,
    #[serde(default = "default_bonus_points")]
    pub bonus_points: f64,
}

/// Comeback boost configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComebackConfig {
    #[serde(default = "default_min_days_away")]
    pub min_days_away: i64,
    #[serde(default = "default_comeback_base")]
    pub base: f64,
    #[serde(default = "default_per_extra_day")]
    pub per_extra_day: f64,
    #[serde(default = "default_comeback_cap")]
    pub cap: f64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/momentum/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Momentum for a first run with nothing persisted.
    #[serde(default = "default_initial_momentum")]
    pub initial_momentum: f64,
    #[serde(default)]
    pub decay: DecayConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub comeback: ComebackConfig,
}

// Default functions
fn default_initial_momentum() -> f64 {
    50.0
}
fn default_decay_weekday() -> f64 {
    5.0
}
fn default_decay_weekend() -> f64 {
    2.0
}
fn default_decay_rest_day() -> f64 {
    1.0
}
fn default_weekend_days() -> Vec<Weekday> {
    vec![Weekday::Sat, Weekday::Sun]
}
fn default_points_low() -> f64 {
    5.0
}
fn default_points_medium() -> f64 {
    8.0
}
fn default_points_high() -> f64 {
    15.0
}
fn default_first_of_day_bonus() -> f64 {
    10.0
}
fn default_bonus_every() -> u32 {
    3
}
fn default_bonus_points() -> f64 {
    5.0
}
fn default_min_days_away() -> i64 {
    2
}
fn default_comeback_base() -> f64 {
    15.0
}
fn default_per_extra_day() -> f64 {
    2.0
}
fn default_comeback_cap() -> f64 {
    30.0
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            weekday: default_decay_weekday(),
            weekend: default_decay_weekend(),
            rest_day: default_decay_rest_day(),
            weekend_days: default_weekend_days(),
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            low: default_points_low(),
            medium: default_points_medium(),
            high: default_points_high(),
            first_of_day_bonus: default_first_of_day_bonus(),
            bonus_every: default_bonus_every(),
            bonus_points: default_bonus_points(),
        }
    }
}

impl Default for ComebackConfig {
    fn default() -> Self {
        Self {
            min_days_away: default_min_days_away(),
            base: default_comeback_base(),
            per_extra_day: default_per_extra_day(),
            cap: default_comeback_cap(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_momentum: default_initial_momentum(),
            decay: DecayConfig::default(),
            scoring: ScoringConfig::default(),
            comeback: ComebackConfig::default(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> std::result::Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().map_or(true, |p| p.is_empty()) {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<i64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| {
                                    invalid(format!("cannot parse '{value}' as number"))
                                })?
                        } else {
                            return Err(invalid(format!("cannot parse '{value}' as number")));
                        }
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Default location, `<data dir>/config.toml`.
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing defaults there if missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
        }
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed
    /// into the field's type or fails validation. On error `self` is unchanged.
    pub fn update(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Set a config value by key and save to the default location.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.update(key, value)?;
        self.save()
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let invalid = |key: &str, message: &str| ConfigError::InvalidValue {
            key: key.to_string(),
            message: message.to_string(),
        };

        if !(0.0..=100.0).contains(&self.initial_momentum) {
            return Err(invalid("initial_momentum", "must be within 0..=100"));
        }

        let non_negative = [
            ("decay.weekday", self.decay.weekday),
            ("decay.weekend", self.decay.weekend),
            ("decay.rest_day", self.decay.rest_day),
            ("scoring.low", self.scoring.low),
            ("scoring.medium", self.scoring.medium),
            ("scoring.high", self.scoring.high),
            ("scoring.first_of_day_bonus", self.scoring.first_of_day_bonus),
            ("scoring.bonus_points", self.scoring.bonus_points),
            ("comeback.base", self.comeback.base),
            ("comeback.per_extra_day", self.comeback.per_extra_day),
            ("comeback.cap", self.comeback.cap),
        ];
        for (key, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(key, "must be a non-negative number"));
            }
        }

        if self.comeback.min_days_away < 1 {
            return Err(invalid("comeback.min_days_away", "must be at least 1"));
        }
        Ok(())
    }

    /// Engine rules described by this configuration.
    pub fn rules(&self) -> MomentumRules {
        MomentumRules {
            initial_momentum: self.initial_momentum,
            decay: DecayRules {
                weekday: self.decay.weekday,
                weekend: self.decay.weekend,
                rest_day: self.decay.rest_day,
                weekend_days: self.decay.weekend_days.clone(),
            },
            scoring: ScoringRules {
                low: self.scoring.low,
                medium: self.scoring.medium,
                high: self.scoring.high,
                first_of_day_bonus: self.scoring.first_of_day_bonus,
                bonus_every: self.scoring.bonus_every,
                bonus_points: self.scoring.bonus_points,
            },
            comeback: ComebackRules {
                min_days_away: self.comeback.min_days_away,
                base: self.comeback.base,
                per_extra_day: self.comeback.per_extra_day,
                cap: self.comeback.cap,
            },
        }
    }
}
