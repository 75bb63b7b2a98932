use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::habit::Habit;
use crate::models::record::{CreateRecordRequest, DailyRecord, RecordQuery};
use crate::services::schedule::{check_record_overlap, completion_rate};
use crate::AppState;

pub async fn create_record(
    State(state): State<AppState>,
    Json(body): Json<CreateRecordRequest>,
) -> AppResult<Json<DailyRecord>> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    if body.actual_start_time >= body.actual_end_time {
        return Err(AppError::Validation(
            "Actual start time must be before actual end time".into(),
        ));
    }

    let habit = sqlx::query_as::<_, Habit>("SELECT * FROM habits WHERE id = $1")
        .bind(body.habit_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or(AppError::NotFound("Habit not found".into()))?;

    let record_date = body.record_date.unwrap_or_else(|| Utc::now().date_naive());

    // One record per habit per date.
    let existing = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM daily_records WHERE habit_id = $1 AND record_date = $2",
    )
    .bind(body.habit_id)
    .bind(record_date)
    .fetch_one(&state.db)
    .await?;

    if existing > 0 {
        return Err(AppError::Duplicate(
            "This habit already has a record for that date".into(),
        ));
    }

    // No two records on the same date may overlap in actual time, across
    // all habits.
    let day_records =
        sqlx::query_as::<_, DailyRecord>("SELECT * FROM daily_records WHERE record_date = $1")
            .bind(record_date)
            .fetch_all(&state.db)
            .await?;

    if check_record_overlap(
        body.actual_start_time,
        body.actual_end_time,
        record_date,
        &day_records,
        None,
    ) {
        return Err(AppError::Overlap(
            "Actual time overlaps another record on that date".into(),
        ));
    }

    let actual_duration = body.actual_end_time - body.actual_start_time;
    let rate = completion_rate(actual_duration, habit.expected_duration);

    let insert = sqlx::query_as::<_, DailyRecord>(
        r#"
        INSERT INTO daily_records (id, habit_id, record_date, actual_start_time, actual_end_time, actual_duration, completion_rate)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(body.habit_id)
    .bind(record_date)
    .bind(body.actual_start_time)
    .bind(body.actual_end_time)
    .bind(actual_duration)
    .bind(rate)
    .fetch_one(&state.db)
    .await;

    let record = match insert {
        Ok(record) => record,
        // The unique constraint backstops the check above when two inserts race.
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            return Err(AppError::Duplicate(
                "This habit already has a record for that date".into(),
            ));
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(
        record_id = %record.id,
        habit_id = %record.habit_id,
        date = %record.record_date,
        completion_rate = record.completion_rate,
        "Completion recorded"
    );

    Ok(Json(record))
}

pub async fn list_records(
    State(state): State<AppState>,
    Query(query): Query<RecordQuery>,
) -> AppResult<Json<Vec<DailyRecord>>> {
    let start = query
        .start_date
        .unwrap_or_else(|| Utc::now().date_naive() - chrono::Duration::days(100));
    let end = query.end_date.unwrap_or_else(|| Utc::now().date_naive());

    let records = if let Some(habit_id) = query.habit_id {
        sqlx::query_as::<_, DailyRecord>(
            r#"
            SELECT * FROM daily_records
            WHERE habit_id = $1 AND record_date BETWEEN $2 AND $3
            ORDER BY record_date DESC
            "#,
        )
        .bind(habit_id)
        .bind(start)
        .bind(end)
        .fetch_all(&state.db)
        .await?
    } else {
        sqlx::query_as::<_, DailyRecord>(
            r#"
            SELECT * FROM daily_records
            WHERE record_date BETWEEN $1 AND $2
            ORDER BY record_date DESC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&state.db)
        .await?
    };

    Ok(Json(records))
}

/// Undo a recorded completion.
pub async fn delete_record(
    State(state): State<AppState>,
    Path(record_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let result = sqlx::query("DELETE FROM daily_records WHERE id = $1")
        .bind(record_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Record not found".into()));
    }

    Ok(Json(serde_json::json!({ "deleted": true })))
}
