use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::habit::{ActiveDays, Habit};
use crate::models::record::DailyRecord;
use crate::services::time::ranges_overlap;

/// Find the first active habit whose schedule collides with the proposed
/// time range on at least one shared weekday. Habits are checked in input
/// order; `exclude_id` lets an edit skip the habit being edited.
pub fn check_habit_overlap<'a>(
    new_start: i32,
    new_end: i32,
    new_active_days: &ActiveDays,
    existing_habits: &'a [Habit],
    exclude_id: Option<Uuid>,
) -> Option<&'a Habit> {
    for habit in existing_habits {
        if exclude_id == Some(habit.id) {
            continue;
        }
        if !habit.is_active {
            continue;
        }
        if habit.active_days.shares_day(new_active_days)
            && ranges_overlap(new_start, new_end, habit.start_time, habit.end_time)
        {
            return Some(habit);
        }
    }
    None
}

/// True if the proposed actual time range collides with any fully-timed
/// record on the same date. Records without recorded times are ignored.
pub fn check_record_overlap(
    new_start: i32,
    new_end: i32,
    date: NaiveDate,
    existing_records: &[DailyRecord],
    exclude_id: Option<Uuid>,
) -> bool {
    existing_records
        .iter()
        .filter(|r| r.record_date == date && exclude_id != Some(r.id))
        .any(|r| match (r.actual_start_time, r.actual_end_time) {
            (Some(start), Some(end)) => ranges_overlap(new_start, new_end, start, end),
            _ => false,
        })
}

/// Ratio of actual to expected duration, clamped to [0, 1].
pub fn completion_rate(actual_duration: i32, expected_duration: i32) -> f64 {
    if expected_duration <= 0 {
        return 0.0;
    }
    (actual_duration as f64 / expected_duration as f64).min(1.0)
}
