use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// One boolean per weekday; a habit is scheduled only on days set to true.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveDays {
    pub monday: bool,
    pub tuesday: bool,
    pub wednesday: bool,
    pub thursday: bool,
    pub friday: bool,
    pub saturday: bool,
    pub sunday: bool,
}

impl ActiveDays {
    pub fn all_days() -> Self {
        Self {
            monday: true,
            tuesday: true,
            wednesday: true,
            thursday: true,
            friday: true,
            saturday: true,
            sunday: true,
        }
    }

    pub fn no_days() -> Self {
        Self {
            monday: false,
            tuesday: false,
            wednesday: false,
            thursday: false,
            friday: false,
            saturday: false,
            sunday: false,
        }
    }

    pub fn contains(&self, day: Weekday) -> bool {
        match day {
            Weekday::Mon => self.monday,
            Weekday::Tue => self.tuesday,
            Weekday::Wed => self.wednesday,
            Weekday::Thu => self.thursday,
            Weekday::Fri => self.friday,
            Weekday::Sat => self.saturday,
            Weekday::Sun => self.sunday,
        }
    }

    /// True if at least one weekday is scheduled.
    pub fn any(&self) -> bool {
        self.monday
            || self.tuesday
            || self.wednesday
            || self.thursday
            || self.friday
            || self.saturday
            || self.sunday
    }

    /// True if both schedules share at least one weekday.
    pub fn shares_day(&self, other: &ActiveDays) -> bool {
        (self.monday && other.monday)
            || (self.tuesday && other.tuesday)
            || (self.wednesday && other.wednesday)
            || (self.thursday && other.thursday)
            || (self.friday && other.friday)
            || (self.saturday && other.saturday)
            || (self.sunday && other.sunday)
    }
}

impl Default for ActiveDays {
    fn default() -> Self {
        Self::all_days()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Habit {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub color: String,
    /// Minutes from midnight, 0..1440. start_time < end_time always holds.
    pub start_time: i32,
    pub end_time: i32,
    /// end_time - start_time, recomputed on every schedule edit.
    pub expected_duration: i32,
    pub active_days: sqlx::types::Json<ActiveDays>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateHabitRequest {
    #[validate(length(min = 1, message = "Habit title is required"))]
    pub title: String,
    pub description: Option<String>,
    pub color: Option<String>,
    #[validate(range(min = 0, max = 1439))]
    pub start_time: i32,
    #[validate(range(min = 1, max = 1440))]
    pub end_time: i32,
    pub active_days: Option<ActiveDays>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateHabitRequest {
    #[validate(length(min = 1, message = "Habit title must not be empty"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    #[validate(range(min = 0, max = 1439))]
    pub start_time: Option<i32>,
    #[validate(range(min = 1, max = 1440))]
    pub end_time: Option<i32>,
    pub active_days: Option<ActiveDays>,
    pub is_active: Option<bool>,
}

impl UpdateHabitRequest {
    /// True when the update touches anything the overlap check depends on.
    pub fn changes_schedule(&self) -> bool {
        self.start_time.is_some() || self.end_time.is_some() || self.active_days.is_some()
    }
}

#[derive(Debug, Deserialize)]
pub struct ListHabitsQuery {
    pub active_only: Option<bool>,
}
