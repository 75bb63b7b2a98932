use chrono::{Datelike, NaiveDate};

use crate::models::habit::Habit;
use crate::models::record::{DailyRecord, HabitStats};
use crate::services::time::last_n_days;

/// Whether the habit is scheduled on this calendar date. Deactivated habits
/// are never scheduled.
pub fn is_active_on_date(habit: &Habit, date: NaiveDate) -> bool {
    habit.is_active && habit.active_days.contains(date.weekday())
}

/// Trailing 100-day completion percentage, anchored at `today`.
///
/// Every scheduled day since the habit was created counts, and a scheduled
/// day with no record counts as zero. Returns a value in [0, 100], or 0 when
/// no day in the window qualifies.
pub fn rolling_100_days(habit: &Habit, records: &[DailyRecord], today: NaiveDate) -> f64 {
    let created = habit.created_at.date_naive();

    let mut total_completion_rate = 0.0;
    let mut counted_days = 0u32;

    for date in last_n_days(100, today) {
        if !is_active_on_date(habit, date) {
            continue;
        }
        if date < created {
            continue;
        }

        counted_days += 1;

        if let Some(record) = records
            .iter()
            .find(|r| r.habit_id == habit.id && r.record_date == date)
        {
            total_completion_rate += record.completion_rate;
        }
    }

    if counted_days == 0 {
        return 0.0;
    }

    (total_completion_rate / counted_days as f64) * 100.0
}

/// Consecutive fully-completed scheduled days, walking backward from `today`.
///
/// Non-scheduled days are skipped without breaking the run, the walk stops at
/// the habit's creation date, and a missing record for today itself does not
/// break a streak built on prior days.
pub fn current_streak(habit: &Habit, records: &[DailyRecord], today: NaiveDate) -> i32 {
    let created = habit.created_at.date_naive();
    let mut streak = 0;

    // Bounded lookback of one year.
    for i in 0..365i64 {
        let date = today - chrono::Duration::days(i);

        if !is_active_on_date(habit, date) {
            continue;
        }
        if date < created {
            break;
        }

        let completed = records
            .iter()
            .find(|r| r.habit_id == habit.id && r.record_date == date)
            .is_some_and(|r| r.completion_rate >= 1.0);

        if completed {
            streak += 1;
        } else if i > 0 {
            break;
        }
    }

    streak
}

/// Lifetime count of fully-completed days; no window restriction.
pub fn total_completed_days(habit: &Habit, records: &[DailyRecord]) -> i64 {
    records
        .iter()
        .filter(|r| r.habit_id == habit.id && r.completion_rate >= 1.0)
        .count() as i64
}

pub fn compute_stats(habit: &Habit, records: &[DailyRecord], today: NaiveDate) -> HabitStats {
    let rolling = rolling_100_days(habit, records, today);
    let streak = current_streak(habit, records, today);

    HabitStats {
        habit_id: habit.id,
        rolling_100_days: rolling,
        current_streak: streak,
        // No historical streak ledger is kept; best mirrors current.
        best_streak: streak,
        total_completed_days: total_completed_days(habit, records),
        reached_max_at: (rolling >= 100.0).then_some(today),
    }
}

/// Mean rolling-window percentage across habits; 0 when there are none.
pub fn average_completion(stats: &[HabitStats]) -> f64 {
    if stats.is_empty() {
        return 0.0;
    }
    stats.iter().map(|s| s.rolling_100_days).sum::<f64>() / stats.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::habit::ActiveDays;
    use crate::services::fixtures::{habit_created_on, record_at};

    fn today() -> NaiveDate {
        // 2024-09-13 is a Friday
        NaiveDate::from_ymd_opt(2024, 9, 13).unwrap()
    }

    fn days_ago(n: i64) -> NaiveDate {
        today() - chrono::Duration::days(n)
    }

    #[test]
    fn rolling_window_counts_missing_days_as_zero() {
        // Created 10 days ago (window of 10 counted days), full credit on 5.
        let habit = habit_created_on(540, 600, ActiveDays::all_days(), days_ago(9));
        let records: Vec<_> = (0..5)
            .map(|i| record_at(habit.id, days_ago(i), 540, 600, 1.0))
            .collect();

        assert_eq!(rolling_100_days(&habit, &records, today()), 50.0);
    }

    #[test]
    fn rolling_window_skips_unscheduled_days() {
        // Fridays only, created 3 weeks back: exactly 3 Fridays in the window
        // so far, one completed.
        let fridays = ActiveDays {
            friday: true,
            ..ActiveDays::no_days()
        };
        let habit = habit_created_on(540, 600, fridays, days_ago(20));
        let records = vec![record_at(habit.id, days_ago(7), 540, 600, 1.0)];

        let pct = rolling_100_days(&habit, &records, today());
        assert!((pct - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn rolling_window_is_zero_with_no_counted_days() {
        let mut habit = habit_created_on(540, 600, ActiveDays::all_days(), days_ago(50));
        habit.is_active = false;
        assert_eq!(rolling_100_days(&habit, &[], today()), 0.0);

        let habit = habit_created_on(540, 600, ActiveDays::no_days(), days_ago(50));
        assert_eq!(rolling_100_days(&habit, &[], today()), 0.0);
    }

    #[test]
    fn rolling_window_ignores_other_habits_records() {
        let habit = habit_created_on(540, 600, ActiveDays::all_days(), days_ago(0));
        let other = record_at(uuid::Uuid::new_v4(), today(), 540, 600, 1.0);
        assert_eq!(rolling_100_days(&habit, &[other], today()), 0.0);
    }

    #[test]
    fn streak_tolerates_missing_today() {
        let habit = habit_created_on(540, 600, ActiveDays::all_days(), days_ago(30));
        let records: Vec<_> = (1..=3)
            .map(|i| record_at(habit.id, days_ago(i), 540, 600, 1.0))
            .collect();

        assert_eq!(current_streak(&habit, &records, today()), 3);
    }

    #[test]
    fn streak_breaks_on_partial_completion() {
        let habit = habit_created_on(540, 600, ActiveDays::all_days(), days_ago(30));
        let records = vec![
            record_at(habit.id, days_ago(1), 540, 600, 1.0),
            record_at(habit.id, days_ago(2), 540, 570, 0.5),
            record_at(habit.id, days_ago(3), 540, 600, 1.0),
        ];

        assert_eq!(current_streak(&habit, &records, today()), 1);
    }

    #[test]
    fn streak_counts_today_when_completed() {
        let habit = habit_created_on(540, 600, ActiveDays::all_days(), days_ago(30));
        let records: Vec<_> = (0..=2)
            .map(|i| record_at(habit.id, days_ago(i), 540, 600, 1.0))
            .collect();

        assert_eq!(current_streak(&habit, &records, today()), 3);
    }

    #[test]
    fn streak_skips_unscheduled_days_without_breaking() {
        // Weekdays only; today is Friday, so Sat/Sun of last week must not
        // break the run between Friday and the prior Monday-Thursday.
        let weekdays = ActiveDays {
            saturday: false,
            sunday: false,
            ..ActiveDays::all_days()
        };
        let habit = habit_created_on(540, 600, weekdays, days_ago(30));
        let records = vec![
            record_at(habit.id, days_ago(0), 540, 600, 1.0),  // Fri
            record_at(habit.id, days_ago(3), 540, 600, 1.0),  // Tue
            record_at(habit.id, days_ago(4), 540, 600, 1.0),  // Mon
        ];

        // Thursday (days_ago(1)) is scheduled but missing: streak is Friday only.
        assert_eq!(current_streak(&habit, &records, today()), 1);

        let full: Vec<_> = [0i64, 1, 2, 3, 4]
            .iter()
            .map(|&i| record_at(habit.id, days_ago(i), 540, 600, 1.0))
            .collect();
        // Mon-Fri all complete; the weekend before is skipped, then the walk
        // hits a missing Friday and stops.
        assert_eq!(current_streak(&habit, &full, today()), 5);
    }

    #[test]
    fn streak_stops_at_creation_date() {
        let habit = habit_created_on(540, 600, ActiveDays::all_days(), days_ago(1));
        let records: Vec<_> = (0..10)
            .map(|i| record_at(habit.id, days_ago(i), 540, 600, 1.0))
            .collect();

        // Only the two days since creation can count.
        assert_eq!(current_streak(&habit, &records, today()), 2);
    }

    #[test]
    fn stats_aggregate_fields() {
        let habit = habit_created_on(540, 600, ActiveDays::all_days(), days_ago(2));
        let records: Vec<_> = (0..=2)
            .map(|i| record_at(habit.id, days_ago(i), 540, 600, 1.0))
            .collect();

        let stats = compute_stats(&habit, &records, today());
        assert_eq!(stats.rolling_100_days, 100.0);
        assert_eq!(stats.current_streak, 3);
        assert_eq!(stats.best_streak, 3);
        assert_eq!(stats.total_completed_days, 3);
        assert_eq!(stats.reached_max_at, Some(today()));
    }

    #[test]
    fn average_completion_over_habits() {
        let a = habit_created_on(540, 600, ActiveDays::all_days(), days_ago(0));
        let b = habit_created_on(660, 720, ActiveDays::all_days(), days_ago(0));
        let records = vec![record_at(a.id, today(), 540, 600, 1.0)];

        let stats = vec![
            compute_stats(&a, &records, today()),
            compute_stats(&b, &records, today()),
        ];
        assert_eq!(average_completion(&stats), 50.0);
        assert_eq!(average_completion(&[]), 0.0);
    }
}
