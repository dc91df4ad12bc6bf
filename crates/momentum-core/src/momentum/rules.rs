//! Tunable constants for scoring, decay and comeback boosts.
//!
//! `Default` reproduces the stock behavior; hosts may load other values
//! from configuration.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Priority of a completed task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }
}

impl std::str::FromStr for TaskPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(TaskPriority::Low),
            "medium" | "med" => Ok(TaskPriority::Medium),
            "high" => Ok(TaskPriority::High),
            other => Err(format!("unknown priority: {other}")),
        }
    }
}

/// Per-day decay amounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecayRules {
    pub weekday: f64,
    pub weekend: f64,
    pub rest_day: f64,
    /// Days counted as weekend.
    pub weekend_days: Vec<Weekday>,
}

impl DecayRules {
    pub fn is_weekend(&self, day: Weekday) -> bool {
        self.weekend_days.contains(&day)
    }
}

impl Default for DecayRules {
    fn default() -> Self {
        Self {
            weekday: 5.0,
            weekend: 2.0,
            rest_day: 1.0,
            weekend_days: vec![Weekday::Sat, Weekday::Sun],
        }
    }
}

/// Points awarded for completions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringRules {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
    pub first_of_day_bonus: f64,
    /// Every Nth completion of a day earns `bonus_points` (1-indexed).
    pub bonus_every: u32,
    pub bonus_points: f64,
}

impl ScoringRules {
    pub fn base_points(&self, priority: TaskPriority) -> f64 {
        match priority {
            TaskPriority::Low => self.low,
            TaskPriority::Medium => self.medium,
            TaskPriority::High => self.high,
        }
    }

    /// Total points for the `ordinal`-th completion today (1-indexed).
    pub fn completion_points(
        &self,
        priority: TaskPriority,
        ordinal: u32,
        first_today: bool,
    ) -> f64 {
        let mut points = self.base_points(priority);
        if first_today {
            points += self.first_of_day_bonus;
        }
        if self.bonus_every > 0 && ordinal % self.bonus_every == 0 {
            points += self.bonus_points;
        }
        points
    }
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            low: 5.0,
            medium: 8.0,
            high: 15.0,
            first_of_day_bonus: 10.0,
            bonus_every: 3,
            bonus_points: 5.0,
        }
    }
}

/// Boost granted when returning after an absence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComebackRules {
    pub min_days_away: i64,
    pub base: f64,
    pub per_extra_day: f64,
    pub cap: f64,
}

impl ComebackRules {
    /// Boost for an absence of `days_away` calendar days, or `None` below
    /// the threshold.
    pub fn boost_for(&self, days_away: i64) -> Option<f64> {
        if days_away < self.min_days_away {
            return None;
        }
        let extra = (days_away - self.min_days_away).max(0) as f64;
        Some((self.base + extra * self.per_extra_day).min(self.cap))
    }
}

impl Default for ComebackRules {
    fn default() -> Self {
        Self {
            min_days_away: 2,
            base: 15.0,
            per_extra_day: 2.0,
            cap: 30.0,
        }
    }
}

/// Everything the tracker needs to score and decay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MomentumRules {
    pub initial_momentum: f64,
    pub decay: DecayRules,
    pub scoring: ScoringRules,
    pub comeback: ComebackRules,
}

impl Default for MomentumRules {
    fn default() -> Self {
        Self {
            initial_momentum: 50.0,
            decay: DecayRules::default(),
            scoring: ScoringRules::default(),
            comeback: ComebackRules::default(),
        }
    }
}
