use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::habit::{CreateHabitRequest, Habit, ListHabitsQuery, UpdateHabitRequest};
use crate::services::schedule::check_habit_overlap;
use crate::AppState;

pub async fn list_habits(
    State(state): State<AppState>,
    Query(query): Query<ListHabitsQuery>,
) -> AppResult<Json<Vec<Habit>>> {
    let habits = if query.active_only.unwrap_or(false) {
        sqlx::query_as::<_, Habit>(
            "SELECT * FROM habits WHERE is_active = true ORDER BY start_time ASC, created_at ASC",
        )
        .fetch_all(&state.db)
        .await?
    } else {
        sqlx::query_as::<_, Habit>("SELECT * FROM habits ORDER BY start_time ASC, created_at ASC")
            .fetch_all(&state.db)
            .await?
    };

    Ok(Json(habits))
}

pub async fn get_habit(
    State(state): State<AppState>,
    Path(habit_id): Path<Uuid>,
) -> AppResult<Json<Habit>> {
    let habit = sqlx::query_as::<_, Habit>("SELECT * FROM habits WHERE id = $1")
        .bind(habit_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or(AppError::NotFound("Habit not found".into()))?;

    Ok(Json(habit))
}

pub async fn create_habit(
    State(state): State<AppState>,
    Json(body): Json<CreateHabitRequest>,
) -> AppResult<Json<Habit>> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    if body.start_time >= body.end_time {
        return Err(AppError::Validation(
            "Start time must be before end time".into(),
        ));
    }

    let active_days = body.active_days.unwrap_or_default();
    if !active_days.any() {
        return Err(AppError::Validation(
            "At least one active day is required".into(),
        ));
    }

    // Overlap check runs against a fresh snapshot before any write.
    let existing = sqlx::query_as::<_, Habit>("SELECT * FROM habits ORDER BY created_at ASC")
        .fetch_all(&state.db)
        .await?;

    if let Some(conflict) =
        check_habit_overlap(body.start_time, body.end_time, &active_days, &existing, None)
    {
        return Err(AppError::ScheduleConflict(Box::new(conflict.clone())));
    }

    let habit = sqlx::query_as::<_, Habit>(
        r#"
        INSERT INTO habits (id, title, description, color, start_time, end_time, expected_duration, active_days)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&body.title)
    .bind(&body.description)
    .bind(body.color.as_deref().unwrap_or("#6366f1"))
    .bind(body.start_time)
    .bind(body.end_time)
    .bind(body.end_time - body.start_time)
    .bind(sqlx::types::Json(&active_days))
    .fetch_one(&state.db)
    .await?;

    tracing::info!(habit_id = %habit.id, title = %habit.title, "Habit created");

    Ok(Json(habit))
}

pub async fn update_habit(
    State(state): State<AppState>,
    Path(habit_id): Path<Uuid>,
    Json(body): Json<UpdateHabitRequest>,
) -> AppResult<Json<Habit>> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let existing = sqlx::query_as::<_, Habit>("SELECT * FROM habits WHERE id = $1")
        .bind(habit_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or(AppError::NotFound("Habit not found".into()))?;

    // Merge the prospective schedule before validating it.
    let new_start = body.start_time.unwrap_or(existing.start_time);
    let new_end = body.end_time.unwrap_or(existing.end_time);
    let new_days = body.active_days.unwrap_or(existing.active_days.0);

    if new_start >= new_end {
        return Err(AppError::Validation(
            "Start time must be before end time".into(),
        ));
    }
    if !new_days.any() {
        return Err(AppError::Validation(
            "At least one active day is required".into(),
        ));
    }

    if body.changes_schedule() {
        let all_habits = sqlx::query_as::<_, Habit>("SELECT * FROM habits ORDER BY created_at ASC")
            .fetch_all(&state.db)
            .await?;

        if let Some(conflict) =
            check_habit_overlap(new_start, new_end, &new_days, &all_habits, Some(habit_id))
        {
            return Err(AppError::ScheduleConflict(Box::new(conflict.clone())));
        }
    }

    let habit = sqlx::query_as::<_, Habit>(
        r#"
        UPDATE habits SET
            title = COALESCE($2, title),
            description = COALESCE($3, description),
            color = COALESCE($4, color),
            start_time = $5,
            end_time = $6,
            expected_duration = $7,
            active_days = $8,
            is_active = COALESCE($9, is_active),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(habit_id)
    .bind(&body.title)
    .bind(&body.description)
    .bind(&body.color)
    .bind(new_start)
    .bind(new_end)
    .bind(new_end - new_start)
    .bind(sqlx::types::Json(&new_days))
    .bind(body.is_active)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(habit))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeleteMode {
    /// Clear is_active; the habit and its history stay queryable.
    #[default]
    Soft,
    /// Remove the habit and every record referencing it.
    Hard,
}

#[derive(Debug, Deserialize)]
pub struct DeleteHabitQuery {
    #[serde(default)]
    pub mode: DeleteMode,
}

pub async fn delete_habit(
    State(state): State<AppState>,
    Path(habit_id): Path<Uuid>,
    Query(query): Query<DeleteHabitQuery>,
) -> AppResult<Json<serde_json::Value>> {
    match query.mode {
        DeleteMode::Soft => {
            let result = sqlx::query("UPDATE habits SET is_active = false, updated_at = NOW() WHERE id = $1")
                .bind(habit_id)
                .execute(&state.db)
                .await?;

            if result.rows_affected() == 0 {
                return Err(AppError::NotFound("Habit not found".into()));
            }

            Ok(Json(serde_json::json!({ "deleted": true, "mode": "soft" })))
        }
        DeleteMode::Hard => {
            // Cascade is best-effort: a failed record purge is logged and the
            // habit delete still runs.
            if let Err(e) = sqlx::query("DELETE FROM daily_records WHERE habit_id = $1")
                .bind(habit_id)
                .execute(&state.db)
                .await
            {
                tracing::warn!(habit_id = %habit_id, error = %e, "Failed to delete habit records");
            }

            let result = sqlx::query("DELETE FROM habits WHERE id = $1")
                .bind(habit_id)
                .execute(&state.db)
                .await?;

            if result.rows_affected() == 0 {
                return Err(AppError::NotFound("Habit not found".into()));
            }

            tracing::info!(habit_id = %habit_id, "Habit deleted");

            Ok(Json(serde_json::json!({ "deleted": true, "mode": "hard" })))
        }
    }
}
