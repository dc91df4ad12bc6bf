use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::level::MomentumLevel;

pub const MIN_MOMENTUM: f64 = 0.0;
pub const MAX_MOMENTUM: f64 = 100.0;

/// Durable engine state. Serialized as a JSON blob by the stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MomentumState {
    pub momentum: f64,
    #[serde(default)]
    pub last_active_date: Option<NaiveDate>,
    #[serde(default)]
    pub today_completed_count: u32,
    #[serde(default)]
    pub rest_day_marker: Option<NaiveDate>,
    /// Last date decay was charged through.
    #[serde(default)]
    pub last_decay_date: Option<NaiveDate>,
}

impl MomentumState {
    /// Fresh state for a first run.
    pub fn new(initial_momentum: f64) -> Self {
        Self {
            momentum: clamp_momentum(initial_momentum),
            last_active_date: None,
            today_completed_count: 0,
            rest_day_marker: None,
            last_decay_date: None,
        }
    }

    pub fn level(&self) -> MomentumLevel {
        MomentumLevel::from_score(self.momentum)
    }

    /// Last day already accounted for by decay or activity.
    pub fn decay_anchor(&self) -> Option<NaiveDate> {
        match (self.last_active_date, self.last_decay_date) {
            (Some(active), Some(decayed)) => Some(active.max(decayed)),
            (Some(active), None) => Some(active),
            (None, _) => None,
        }
    }

    /// Repair a loaded blob so the range invariant holds.
    pub(crate) fn sanitized(mut self, fallback: f64) -> Self {
        self.momentum = if self.momentum.is_finite() {
            clamp_momentum(self.momentum)
        } else {
            clamp_momentum(fallback)
        };
        self
    }
}

impl Default for MomentumState {
    fn default() -> Self {
        Self::new(50.0)
    }
}

pub fn clamp_momentum(value: f64) -> f64 {
    value.clamp(MIN_MOMENTUM, MAX_MOMENTUM)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn default_is_moderate_fifty() {
        let state = MomentumState::default();
        assert_eq!(state.momentum, 50.0);
        assert_eq!(state.level(), MomentumLevel::Moderate);
        assert!(state.last_active_date.is_none());
    }

    #[test]
    fn json_roundtrip_preserves_every_field() {
        let state = MomentumState {
            momentum: 0.0,
            last_active_date: Some(date(2024, 6, 3)),
            today_completed_count: 4,
            rest_day_marker: Some(date(2024, 6, 1)),
            last_decay_date: Some(date(2024, 6, 5)),
        };
        let json = serde_json::to_string(&state).unwrap();
        let parsed: MomentumState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, state);
    }

    #[test]
    fn missing_optional_fields_deserialize_as_absent() {
        let parsed: MomentumState = serde_json::from_str(r#"{"momentum": 12.5}"#).unwrap();
        assert_eq!(parsed.momentum, 12.5);
        assert_eq!(parsed.today_completed_count, 0);
        assert!(parsed.rest_day_marker.is_none());
        assert!(parsed.last_decay_date.is_none());
    }

    #[test]
    fn decay_anchor_takes_later_date() {
        let mut state = MomentumState::default();
        assert_eq!(state.decay_anchor(), None);

        state.last_active_date = Some(date(2024, 6, 3));
        assert_eq!(state.decay_anchor(), Some(date(2024, 6, 3)));

        state.last_decay_date = Some(date(2024, 6, 5));
        assert_eq!(state.decay_anchor(), Some(date(2024, 6, 5)));

        state.last_active_date = Some(date(2024, 6, 6));
        assert_eq!(state.decay_anchor(), Some(date(2024, 6, 6)));
    }

    #[test]
    fn sanitize_clamps_and_repairs() {
        let mut state = MomentumState::default();
        state.momentum = 140.0;
        assert_eq!(state.clone().sanitized(50.0).momentum, 100.0);
        state.momentum = -3.0;
        assert_eq!(state.clone().sanitized(50.0).momentum, 0.0);
        state.momentum = f64::NAN;
        assert_eq!(state.sanitized(50.0).momentum, 50.0);
    }
}
