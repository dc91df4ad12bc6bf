use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::level::MomentumLevel;
use super::rules::TaskPriority;

/// Every state change in the engine produces an event.
/// Stores that keep history append them; the UI reads them back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MomentumEvent {
    DecayApplied {
        date: NaiveDate,
        days: i64,
        amount: f64,
        before: f64,
        after: f64,
    },
    CompletionRecorded {
        date: NaiveDate,
        priority: TaskPriority,
        points: f64,
        first_today: bool,
        completed_today: u32,
        before: f64,
        after: f64,
    },
    ComebackBoosted {
        date: NaiveDate,
        days_away: i64,
        boost: f64,
        before: f64,
        after: f64,
    },
    /// `adjustment` credits back today's decay when it was already charged
    /// at the normal rate.
    RestDayMarked {
        date: NaiveDate,
        #[serde(default)]
        adjustment: f64,
    },
    /// `adjustment` re-charges the credit given when the marker was set.
    RestDayCleared {
        date: NaiveDate,
        cleared: NaiveDate,
        #[serde(default)]
        adjustment: f64,
    },
}

impl MomentumEvent {
    pub fn date(&self) -> NaiveDate {
        match self {
            MomentumEvent::DecayApplied { date, .. }
            | MomentumEvent::CompletionRecorded { date, .. }
            | MomentumEvent::ComebackBoosted { date, .. }
            | MomentumEvent::RestDayMarked { date, .. }
            | MomentumEvent::RestDayCleared { date, .. } => *date,
        }
    }

    /// Short machine-readable name, used as the history table's kind column.
    pub fn kind(&self) -> &'static str {
        match self {
            MomentumEvent::DecayApplied { .. } => "decay_applied",
            MomentumEvent::CompletionRecorded { .. } => "completion_recorded",
            MomentumEvent::ComebackBoosted { .. } => "comeback_boosted",
            MomentumEvent::RestDayMarked { .. } => "rest_day_marked",
            MomentumEvent::RestDayCleared { .. } => "rest_day_cleared",
        }
    }
}

/// Before/after view of a mutation, returned to callers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MomentumChange {
    pub before: f64,
    pub after: f64,
    pub level_before: MomentumLevel,
    pub level_after: MomentumLevel,
}

impl MomentumChange {
    pub fn new(before: f64, after: f64) -> Self {
        Self {
            before,
            after,
            level_before: MomentumLevel::from_score(before),
            level_after: MomentumLevel::from_score(after),
        }
    }

    pub fn delta(&self) -> f64 {
        self.after - self.before
    }

    pub fn level_changed(&self) -> bool {
        self.level_before != self.level_after
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_serializes_with_type_tag() {
        let event = MomentumEvent::RestDayMarked {
            date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            adjustment: 4.0,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "RestDayMarked");
        assert_eq!(json["date"], "2024-06-03");
        assert_eq!(json["adjustment"], 4.0);
    }

    #[test]
    fn change_reports_level_transition() {
        let change = MomentumChange::new(78.0, 86.0);
        assert_eq!(change.delta(), 8.0);
        assert!(change.level_changed());
        assert_eq!(change.level_after, MomentumLevel::Excellent);

        let flat = MomentumChange::new(50.0, 55.0);
        assert!(!flat.level_changed());
    }
}
