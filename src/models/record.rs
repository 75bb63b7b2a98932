use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DailyRecord {
    pub id: Uuid,
    pub habit_id: Uuid,
    pub record_date: NaiveDate,
    /// Minutes from midnight; both are null until the habit is actually
    /// performed and recorded.
    pub actual_start_time: Option<i32>,
    pub actual_end_time: Option<i32>,
    pub actual_duration: i32,
    /// 0.0 - 1.0, fixed at creation time against the habit's expected
    /// duration as it was then.
    pub completion_rate: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateRecordRequest {
    pub habit_id: Uuid,
    pub record_date: Option<NaiveDate>,
    #[validate(range(min = 0, max = 1439))]
    pub actual_start_time: i32,
    #[validate(range(min = 1, max = 1440))]
    pub actual_end_time: i32,
}

#[derive(Debug, Deserialize)]
pub struct RecordQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub habit_id: Option<Uuid>,
}

/// Per-habit adherence aggregate, recomputed on demand; never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct HabitStats {
    pub habit_id: Uuid,
    /// 0.0 - 100.0, trailing 100-day window.
    pub rolling_100_days: f64,
    pub current_streak: i32,
    pub best_streak: i32,
    pub total_completed_days: i64,
    pub reached_max_at: Option<NaiveDate>,
}
