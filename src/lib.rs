use sqlx::PgPool;
use std::sync::Arc;

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;

use config::Config;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<Config>,
}

pub fn router(state: AppState) -> axum::Router {
    use axum::routing::{delete, get, post, put};

    axum::Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz))
        // Habits
        .route("/api/habits", get(handlers::habits::list_habits))
        .route("/api/habits", post(handlers::habits::create_habit))
        .route("/api/habits/:id", get(handlers::habits::get_habit))
        .route("/api/habits/:id", put(handlers::habits::update_habit))
        .route("/api/habits/:id", delete(handlers::habits::delete_habit))
        // Daily records
        .route("/api/records", post(handlers::records::create_record))
        .route("/api/records", get(handlers::records::list_records))
        .route("/api/records/:id", delete(handlers::records::delete_record))
        // Stats & daily schedule
        .route("/api/habits/:id/stats", get(handlers::stats::get_habit_stats))
        .route("/api/stats", get(handlers::stats::list_stats))
        .route("/api/schedule", get(handlers::stats::get_schedule))
        .with_state(state)
}
