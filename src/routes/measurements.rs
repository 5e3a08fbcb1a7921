// SPDX-License-Identifier: MIT

//! Weight, workout and step logging, and their bucketed dashboards.

use crate::error::{AppError, Result};
use crate::middleware::identity::Identity;
use crate::models::{StepLog, WeightLog, Workout};
use crate::services::buckets::{bucket_records, Granularity};
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;
use std::sync::Arc;
use validator::Validate;

/// Measurement routes (identity middleware is applied in routes/mod.rs).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/weight", post(log_weight))
        .route("/api/weight/history", get(get_weight_history))
        .route("/api/workouts", post(log_workout))
        .route("/api/workouts/summary", get(get_workout_summary))
        .route("/api/steps", post(log_steps))
}

fn default_granularity() -> Granularity {
    Granularity::Day
}

#[derive(Deserialize)]
struct GranularityQuery {
    #[serde(default = "default_granularity")]
    granularity: Granularity,
}

// ─── Weight ──────────────────────────────────────────────────

#[derive(Deserialize, Validate)]
pub struct LogWeightRequest {
    pub date: NaiveDate,
    #[validate(range(exclusive_min = 0.0, max = 500.0))]
    pub weight_kg: f64,
}

/// Log a body-weight measurement.
async fn log_weight(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<LogWeightRequest>,
) -> Result<(StatusCode, Json<WeightLog>)> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let log = WeightLog {
        user_id: identity.user_id.clone(),
        date: payload.date,
        weight_kg: payload.weight_kg,
    };
    state.store.insert_weight_log(log.clone());

    tracing::info!(
        user_id = %identity.user_id,
        date = %log.date,
        weight_kg = log.weight_kg,
        "Weight logged"
    );

    Ok((StatusCode::CREATED, Json(log)))
}

/// The user's weight logs in ascending date order (chart-ready).
async fn get_weight_history(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Vec<WeightLog>>> {
    Ok(Json(state.store.weight_logs_for_user(&identity.user_id)))
}

// ─── Workouts ────────────────────────────────────────────────

#[derive(Deserialize, Validate)]
pub struct LogWorkoutRequest {
    pub date: NaiveDate,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(range(min = 1, max = 1440))]
    pub duration_minutes: Option<u32>,
    #[validate(range(min = 0.0))]
    pub calories_burned: Option<f64>,
}

/// Log a workout session.
async fn log_workout(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<LogWorkoutRequest>,
) -> Result<(StatusCode, Json<Workout>)> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let workout = state.store.insert_workout(Workout {
        id: 0,
        user_id: identity.user_id.clone(),
        date: payload.date,
        name: payload.name,
        duration_minutes: payload.duration_minutes,
        calories_burned: payload.calories_burned,
    });

    tracing::info!(
        user_id = %identity.user_id,
        workout_id = workout.id,
        date = %workout.date,
        "Workout logged"
    );

    Ok((StatusCode::CREATED, Json(workout)))
}

/// Per-bucket workout sums for the dashboard.
#[derive(Debug, Default, Clone, Copy, Serialize)]
pub struct WorkoutBucket {
    pub workouts: u32,
    pub duration_minutes: u32,
    pub calories_burned: f64,
}

impl AddAssign for WorkoutBucket {
    fn add_assign(&mut self, rhs: Self) {
        self.workouts += rhs.workouts;
        self.duration_minutes += rhs.duration_minutes;
        self.calories_burned += rhs.calories_burned;
    }
}

#[derive(Serialize)]
pub struct WorkoutSummaryResponse {
    pub buckets: Vec<WorkoutSummaryPoint>,
}

#[derive(Serialize)]
pub struct WorkoutSummaryPoint {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub totals: WorkoutBucket,
}

/// Workout counts and durations bucketed by day or week.
async fn get_workout_summary(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Query(params): Query<GranularityQuery>,
) -> Result<Json<WorkoutSummaryResponse>> {
    let workouts = state.store.workouts_for_user(&identity.user_id);

    // A workout without a timed duration or known burn contributes 0
    // to those sums but still counts.
    let buckets = bucket_records(&workouts, params.granularity, |w| w.date, |w| WorkoutBucket {
        workouts: 1,
        duration_minutes: w.duration_minutes.unwrap_or(0),
        calories_burned: w.calories_burned.unwrap_or(0.0),
    });

    Ok(Json(WorkoutSummaryResponse {
        buckets: buckets
            .into_iter()
            .map(|(date, totals)| WorkoutSummaryPoint { date, totals })
            .collect(),
    }))
}

// ─── Steps ───────────────────────────────────────────────────

#[derive(Deserialize, Validate)]
pub struct LogStepsRequest {
    pub date: NaiveDate,
    #[validate(range(max = 200_000))]
    pub steps: u32,
}

/// Log a daily step count.
async fn log_steps(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<LogStepsRequest>,
) -> Result<(StatusCode, Json<StepLog>)> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let log = StepLog {
        user_id: identity.user_id.clone(),
        date: payload.date,
        steps: payload.steps,
    };
    state.store.insert_step_log(log.clone());

    Ok((StatusCode::CREATED, Json(log)))
}
