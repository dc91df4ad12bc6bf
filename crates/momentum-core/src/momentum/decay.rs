//! Day-by-day decay over a gap of inactivity.
//!
//! Pure functions of dates: the tracker supplies the decay anchor (the
//! last day already accounted for) and today's date, and gets back the
//! amount to subtract. Every day strictly after the anchor up to and
//! including today is charged once.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::rules::DecayRules;

/// Why a given day decayed by the amount it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecayKind {
    Weekday,
    Weekend,
    RestDay,
}

/// Decay charged for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayDecay {
    pub date: NaiveDate,
    pub kind: DecayKind,
    pub amount: f64,
}

/// Decay for a single date. The rest-day marker wins over the weekend rule.
pub fn day_decay(date: NaiveDate, rest_day: Option<NaiveDate>, rules: &DecayRules) -> DayDecay {
    let (kind, amount) = if rest_day == Some(date) {
        (DecayKind::RestDay, rules.rest_day)
    } else if rules.is_weekend(date.weekday()) {
        (DecayKind::Weekend, rules.weekend)
    } else {
        (DecayKind::Weekday, rules.weekday)
    };
    DayDecay { date, kind, amount }
}

/// Whole calendar days from `from` to `to`; negative when `to` is earlier.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}

/// Lazily yields the decay for every day in `(anchor, today]`.
pub fn decay_days<'a>(
    anchor: NaiveDate,
    today: NaiveDate,
    rest_day: Option<NaiveDate>,
    rules: &'a DecayRules,
) -> impl Iterator<Item = DayDecay> + 'a {
    let days = days_between(anchor, today);
    (1..=days)
        .map_while(move |offset| anchor.checked_add_signed(Duration::days(offset)))
        .map(move |date| day_decay(date, rest_day, rules))
}

/// Per-day contributions for every day in `(anchor, today]`.
pub fn decay_breakdown(
    anchor: NaiveDate,
    today: NaiveDate,
    rest_day: Option<NaiveDate>,
    rules: &DecayRules,
) -> Vec<DayDecay> {
    decay_days(anchor, today, rest_day, rules).collect()
}

/// Sum of decay for every day in `(anchor, today]`. Zero when `today` is
/// not after `anchor`.
pub fn total_decay(
    anchor: NaiveDate,
    today: NaiveDate,
    rest_day: Option<NaiveDate>,
    rules: &DecayRules,
) -> f64 {
    decay_days(anchor, today, rest_day, rules)
        .map(|d| d.amount)
        .sum()
}

/// Like [`total_decay`], but stops summing once `limit` is reached.
///
/// Momentum floors at zero, so nothing past the current score matters;
/// this keeps a far-past anchor from walking every elapsed day.
pub fn total_decay_up_to(
    anchor: NaiveDate,
    today: NaiveDate,
    rest_day: Option<NaiveDate>,
    rules: &DecayRules,
    limit: f64,
) -> f64 {
    if limit <= 0.0 || (rules.weekday <= 0.0 && rules.weekend <= 0.0 && rules.rest_day <= 0.0) {
        return 0.0;
    }
    let mut total = 0.0;
    for day in decay_days(anchor, today, rest_day, rules) {
        total += day.amount;
        if total >= limit {
            break;
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn monday() -> NaiveDate {
        date(2024, 6, 3)
    }

    #[test]
    fn same_day_has_no_decay() {
        let rules = DecayRules::default();
        assert_eq!(total_decay(monday(), monday(), None, &rules), 0.0);
    }

    #[test]
    fn clock_going_backwards_has_no_decay() {
        let rules = DecayRules::default();
        let earlier = monday() - Duration::days(3);
        assert_eq!(total_decay(monday(), earlier, None, &rules), 0.0);
        assert!(decay_breakdown(monday(), earlier, None, &rules).is_empty());
    }

    #[test]
    fn monday_to_wednesday_is_two_weekdays() {
        let rules = DecayRules::default();
        let wednesday = monday() + Duration::days(2);
        assert_eq!(total_decay(monday(), wednesday, None, &rules), 10.0);
    }

    #[test]
    fn friday_to_monday_charges_weekend_rate() {
        let rules = DecayRules::default();
        let friday = date(2024, 6, 7);
        let next_monday = date(2024, 6, 10);
        let breakdown = decay_breakdown(friday, next_monday, None, &rules);
        let kinds: Vec<_> = breakdown.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![DecayKind::Weekend, DecayKind::Weekend, DecayKind::Weekday]
        );
        assert_eq!(total_decay(friday, next_monday, None, &rules), 9.0);
    }

    #[test]
    fn rest_day_overrides_weekday() {
        let rules = DecayRules::default();
        let tuesday = monday() + Duration::days(1);
        let wednesday = monday() + Duration::days(2);
        assert_eq!(total_decay(monday(), wednesday, Some(tuesday), &rules), 6.0);
    }

    #[test]
    fn rest_day_overrides_weekend() {
        let rules = DecayRules::default();
        let friday = date(2024, 6, 7);
        let saturday = date(2024, 6, 8);
        let d = day_decay(saturday, Some(saturday), &rules);
        assert_eq!(d.kind, DecayKind::RestDay);
        assert_eq!(total_decay(friday, saturday, Some(saturday), &rules), 1.0);
    }

    #[test]
    fn rest_day_outside_window_is_ignored() {
        let rules = DecayRules::default();
        let wednesday = monday() + Duration::days(2);
        let last_week = monday() - Duration::days(7);
        assert_eq!(
            total_decay(monday(), wednesday, Some(last_week), &rules),
            10.0
        );
    }

    #[test]
    fn full_week_gap() {
        let rules = DecayRules::default();
        let next_monday = monday() + Duration::days(7);
        // Tue-Fri weekdays (20), Sat-Sun weekend (4), Monday (5)
        assert_eq!(total_decay(monday(), next_monday, None, &rules), 29.0);
    }

    #[test]
    fn custom_weekend_days() {
        let rules = DecayRules {
            weekend_days: vec![chrono::Weekday::Fri, chrono::Weekday::Sat],
            ..Default::default()
        };
        let thursday = date(2024, 6, 6);
        let sunday = date(2024, 6, 9);
        // Fri 2, Sat 2, Sun 5
        assert_eq!(total_decay(thursday, sunday, None, &rules), 9.0);
    }

    #[test]
    fn decay_up_to_stops_at_limit() {
        let rules = DecayRules::default();
        let far_past = NaiveDate::MIN;
        let total = total_decay_up_to(far_past, monday(), None, &rules, 50.0);
        assert!(total >= 50.0 && total < 56.0);
    }

    #[test]
    fn decay_up_to_is_zero_without_budget_or_rates() {
        let far_past = NaiveDate::MIN;
        assert_eq!(
            total_decay_up_to(far_past, monday(), None, &DecayRules::default(), 0.0),
            0.0
        );
        let free = DecayRules {
            weekday: 0.0,
            weekend: 0.0,
            rest_day: 0.0,
            ..DecayRules::default()
        };
        assert_eq!(total_decay_up_to(far_past, monday(), None, &free, 50.0), 0.0);
    }

    #[test]
    fn decay_up_to_matches_total_below_limit() {
        let rules = DecayRules::default();
        let wednesday = monday() + Duration::days(2);
        assert_eq!(
            total_decay_up_to(monday(), wednesday, None, &rules, 100.0),
            total_decay(monday(), wednesday, None, &rules)
        );
    }

    #[test]
    fn days_between_counts_calendar_days() {
        assert_eq!(days_between(monday(), monday()), 0);
        assert_eq!(days_between(monday(), monday() + Duration::days(10)), 10);
        assert_eq!(days_between(monday(), monday() - Duration::days(1)), -1);
    }
}
