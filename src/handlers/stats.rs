use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::habit::Habit;
use crate::models::record::{DailyRecord, HabitStats};
use crate::services::stats::{average_completion, compute_stats, is_active_on_date};
use crate::services::time::minutes_to_label;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct StatsSummary {
    pub average_completion: f64,
    pub habits: Vec<HabitStats>,
}

#[derive(Debug, Deserialize)]
pub struct ScheduleQuery {
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct ScheduledHabit {
    #[serde(flatten)]
    pub habit: Habit,
    /// Display label, e.g. "9:00AM - 9:30AM".
    pub time_label: String,
}

#[derive(Debug, Serialize)]
pub struct DaySchedule {
    pub date: NaiveDate,
    pub habits: Vec<ScheduledHabit>,
    pub records: Vec<DailyRecord>,
}

pub async fn get_habit_stats(
    State(state): State<AppState>,
    Path(habit_id): Path<Uuid>,
) -> AppResult<Json<HabitStats>> {
    let habit = sqlx::query_as::<_, Habit>("SELECT * FROM habits WHERE id = $1")
        .bind(habit_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or(AppError::NotFound("Habit not found".into()))?;

    let records =
        sqlx::query_as::<_, DailyRecord>("SELECT * FROM daily_records WHERE habit_id = $1")
            .bind(habit_id)
            .fetch_all(&state.db)
            .await?;

    let today = Utc::now().date_naive();
    Ok(Json(compute_stats(&habit, &records, today)))
}

pub async fn list_stats(State(state): State<AppState>) -> AppResult<Json<StatsSummary>> {
    let habits = sqlx::query_as::<_, Habit>(
        "SELECT * FROM habits WHERE is_active = true ORDER BY created_at ASC",
    )
    .fetch_all(&state.db)
    .await?;

    let records = sqlx::query_as::<_, DailyRecord>("SELECT * FROM daily_records")
        .fetch_all(&state.db)
        .await?;

    let today = Utc::now().date_naive();
    let per_habit: Vec<HabitStats> = habits
        .iter()
        .map(|h| compute_stats(h, &records, today))
        .collect();

    Ok(Json(StatsSummary {
        average_completion: average_completion(&per_habit),
        habits: per_habit,
    }))
}

/// Daily-calendar feed: the habits scheduled on a date plus that date's
/// records.
pub async fn get_schedule(
    State(state): State<AppState>,
    Query(query): Query<ScheduleQuery>,
) -> AppResult<Json<DaySchedule>> {
    let date = query.date.unwrap_or_else(|| Utc::now().date_naive());

    let habits = sqlx::query_as::<_, Habit>(
        "SELECT * FROM habits WHERE is_active = true ORDER BY start_time ASC",
    )
    .fetch_all(&state.db)
    .await?;

    let records =
        sqlx::query_as::<_, DailyRecord>("SELECT * FROM daily_records WHERE record_date = $1")
            .bind(date)
            .fetch_all(&state.db)
            .await?;

    let scheduled = habits
        .into_iter()
        .filter(|h| is_active_on_date(h, date))
        .map(|habit| {
            let time_label = format!(
                "{} - {}",
                minutes_to_label(habit.start_time),
                minutes_to_label(habit.end_time)
            );
            ScheduledHabit { habit, time_label }
        })
        .collect();

    Ok(Json(DaySchedule {
        date,
        habits: scheduled,
        records,
    }))
}
