//! The momentum tracker.
//!
//! Owns the engine state, applies decay lazily before anything that
//! depends on the current date, and writes through to a [`MomentumStore`]
//! after every mutation. Store failures are logged and never roll back the
//! in-memory state.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::decay::{day_decay, days_between, decay_breakdown, total_decay_up_to, DayDecay};
use super::events::{MomentumChange, MomentumEvent};
use super::level::MomentumLevel;
use super::rules::{MomentumRules, TaskPriority};
use super::state::{clamp_momentum, MomentumState};
use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::storage::MomentumStore;

/// Display-ready view of the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MomentumSnapshot {
    pub date: NaiveDate,
    pub momentum: f64,
    pub level: MomentumLevel,
    pub label: String,
    pub icon: String,
    pub color: String,
    /// Points needed to reach the next band; `None` at the top band.
    pub points_to_next_level: Option<f64>,
    pub today_completed_count: u32,
    pub last_active_date: Option<NaiveDate>,
    pub days_since_active: Option<i64>,
    pub rest_day_marker: Option<NaiveDate>,
    pub rest_day_is_today: bool,
}

pub struct MomentumTracker<S: MomentumStore, C: Clock = SystemClock> {
    store: S,
    clock: C,
    rules: MomentumRules,
    state: MomentumState,
    level: MomentumLevel,
}

impl<S: MomentumStore> MomentumTracker<S, SystemClock> {
    /// Tracker with stock rules reading the local wall-clock date.
    pub fn open(store: S) -> Self {
        Self::new(store, SystemClock)
    }
}

impl<S: MomentumStore, C: Clock> MomentumTracker<S, C> {
    pub fn new(store: S, clock: C) -> Self {
        Self::with_rules(store, clock, MomentumRules::default())
    }

    /// Load persisted state, falling back to a fresh state when nothing was
    /// persisted or the store cannot be read.
    pub fn with_rules(store: S, clock: C, rules: MomentumRules) -> Self {
        let state = match store.load() {
            Ok(Some(state)) => state.sanitized(rules.initial_momentum),
            Ok(None) => {
                debug!(initial = rules.initial_momentum, "no persisted momentum; first run");
                MomentumState::new(rules.initial_momentum)
            }
            Err(e) => {
                warn!(error = %e, "failed to load momentum state; starting fresh");
                MomentumState::new(rules.initial_momentum)
            }
        };
        let level = state.level();
        Self {
            store,
            clock,
            rules,
            state,
            level,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn rules(&self) -> &MomentumRules {
        &self.rules
    }

    /// Raw state as of the last operation, without running decay.
    pub fn state(&self) -> &MomentumState {
        &self.state
    }

    /// Current score, after catching up on decay.
    pub fn momentum(&mut self) -> f64 {
        self.apply_decay_if_needed();
        self.state.momentum
    }

    /// Current band, after catching up on decay.
    pub fn current_level(&mut self) -> MomentumLevel {
        self.apply_decay_if_needed();
        self.level
    }

    /// Charge decay for every day since the decay anchor.
    ///
    /// Idempotent within a calendar day. Returns the change when any days
    /// were charged. Does not move `last_active_date`.
    pub fn apply_decay_if_needed(&mut self) -> Option<MomentumChange> {
        let today = self.clock.today();
        let anchor = self.state.decay_anchor()?;
        if anchor >= today {
            return None;
        }

        let before = self.state.momentum;
        let days = days_between(anchor, today);
        let amount = total_decay_up_to(
            anchor,
            today,
            self.state.rest_day_marker,
            &self.rules.decay,
            before,
        );

        self.state.momentum = clamp_momentum(before - amount);
        self.state.last_decay_date = Some(today);
        self.refresh_level();

        debug!(
            %anchor,
            %today,
            days,
            amount,
            before,
            after = self.state.momentum,
            "applied momentum decay"
        );

        self.persist(MomentumEvent::DecayApplied {
            date: today,
            days,
            amount,
            before,
            after: self.state.momentum,
        });
        Some(MomentumChange::new(before, self.state.momentum))
    }

    /// Per-day decay that would be charged right now, without applying it.
    pub fn pending_decay(&self) -> Vec<DayDecay> {
        match self.state.decay_anchor() {
            Some(anchor) => decay_breakdown(
                anchor,
                self.clock.today(),
                self.state.rest_day_marker,
                &self.rules.decay,
            ),
            None => Vec::new(),
        }
    }

    /// Award points for a completed task.
    pub fn record_completion(&mut self, priority: TaskPriority) -> MomentumChange {
        self.apply_decay_if_needed();

        let today = self.clock.today();
        let first_today = self.state.last_active_date != Some(today);
        if first_today {
            self.state.today_completed_count = 0;
        }

        let ordinal = self.state.today_completed_count + 1;
        let points = self
            .rules
            .scoring
            .completion_points(priority, ordinal, first_today);

        let before = self.state.momentum;
        self.state.momentum = clamp_momentum(before + points);
        self.state.today_completed_count = ordinal;
        self.state.last_active_date = Some(today);
        self.refresh_level();

        debug!(
            priority = priority.as_str(),
            points,
            first_today,
            completed_today = ordinal,
            after = self.state.momentum,
            "recorded completion"
        );

        self.persist(MomentumEvent::CompletionRecorded {
            date: today,
            priority,
            points,
            first_today,
            completed_today: ordinal,
            before,
            after: self.state.momentum,
        });
        MomentumChange::new(before, self.state.momentum)
    }

    /// Grant a one-time boost for returning after an absence.
    ///
    /// No-op before first use or when the absence is below the threshold.
    /// Callers decide when a "return" happens; repeated calls grant again.
    pub fn apply_comeback_boost(&mut self) -> Option<MomentumChange> {
        self.apply_decay_if_needed();

        let today = self.clock.today();
        let last_active = self.state.last_active_date?;
        let days_away = days_between(last_active, today);
        let boost = self.rules.comeback.boost_for(days_away)?;

        let before = self.state.momentum;
        self.state.momentum = clamp_momentum(before + boost);
        self.refresh_level();

        debug!(days_away, boost, after = self.state.momentum, "applied comeback boost");

        self.persist(MomentumEvent::ComebackBoosted {
            date: today,
            days_away,
            boost,
            before,
            after: self.state.momentum,
        });
        Some(MomentumChange::new(before, self.state.momentum))
    }

    /// Mark today as a rest day, replacing any earlier marker.
    ///
    /// Today's decay is charged as soon as the day is first evaluated, so
    /// when that already happened the difference between the normal rate
    /// and the rest-day rate is credited back.
    pub fn mark_rest_day(&mut self) -> NaiveDate {
        self.apply_decay_if_needed();

        let today = self.clock.today();
        if self.state.rest_day_marker == Some(today) {
            return today;
        }

        let adjustment = self.rest_day_credit(today);
        self.state.rest_day_marker = Some(today);
        self.state.momentum = clamp_momentum(self.state.momentum + adjustment);
        self.refresh_level();

        debug!(%today, adjustment, "marked rest day");
        self.persist(MomentumEvent::RestDayMarked {
            date: today,
            adjustment,
        });
        today
    }

    /// Remove the rest-day marker. Returns the date that was cleared.
    ///
    /// Clearing today's marker takes back the credit `mark_rest_day` gave.
    pub fn clear_rest_day(&mut self) -> Option<NaiveDate> {
        self.apply_decay_if_needed();

        let today = self.clock.today();
        let cleared = self.state.rest_day_marker.take()?;
        let adjustment = if cleared == today {
            -self.rest_day_credit(today)
        } else {
            0.0
        };
        self.state.momentum = clamp_momentum(self.state.momentum + adjustment);
        self.refresh_level();

        debug!(%cleared, adjustment, "cleared rest day");
        self.persist(MomentumEvent::RestDayCleared {
            date: today,
            cleared,
            adjustment,
        });
        Some(cleared)
    }

    /// Normal decay for `today` minus the rest-day rate, when today was
    /// already charged; zero otherwise.
    fn rest_day_credit(&self, today: NaiveDate) -> f64 {
        if self.state.last_decay_date != Some(today) {
            return 0.0;
        }
        day_decay(today, None, &self.rules.decay).amount - self.rules.decay.rest_day
    }

    /// Display view, after catching up on decay.
    pub fn snapshot(&mut self) -> MomentumSnapshot {
        self.apply_decay_if_needed();

        let today = self.clock.today();
        let momentum = self.state.momentum;
        let level = self.level;
        let active_today = self.state.last_active_date == Some(today);

        MomentumSnapshot {
            date: today,
            momentum,
            level,
            label: level.label().to_string(),
            icon: level.icon().to_string(),
            color: level.color().to_string(),
            points_to_next_level: level.next().map(|next| next.threshold() - momentum),
            today_completed_count: if active_today {
                self.state.today_completed_count
            } else {
                0
            },
            last_active_date: self.state.last_active_date,
            days_since_active: self
                .state
                .last_active_date
                .map(|last| days_between(last, today)),
            rest_day_marker: self.state.rest_day_marker,
            rest_day_is_today: self.state.rest_day_marker == Some(today),
        }
    }

    /// Most recent history entries from the store, newest first.
    pub fn recent_events(&self, limit: usize) -> Result<Vec<MomentumEvent>> {
        self.store.recent_events(limit)
    }

    fn refresh_level(&mut self) {
        self.level = MomentumLevel::from_score(self.state.momentum);
    }

    fn persist(&self, event: MomentumEvent) {
        if let Err(e) = self.store.save(&self.state) {
            warn!(error = %e, "failed to save momentum state; keeping in-memory state");
        }
        if let Err(e) = self.store.append_event(&event) {
            warn!(error = %e, kind = event.kind(), "failed to record momentum event");
        }
    }
}
