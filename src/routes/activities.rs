// SPDX-License-Identifier: MIT

//! GPS activity routes.

use crate::error::Result;
use crate::middleware::identity::Identity;
use crate::models::activity::{Activity, ActivityMetrics, ActivityRecording, ActivityType};
use crate::services::activity::compute_metrics;
use crate::services::buckets::{bucket_records, Granularity};
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{NaiveDate, SecondsFormat};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Activity routes (identity middleware is applied in routes/mod.rs).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/activities", post(submit_recording).get(get_activities))
        .route("/api/activities/summary", get(get_distance_summary))
}

// ─── Recording Submission ────────────────────────────────────

/// Accept a finished recording, derive its metrics and store it.
///
/// The recording itself (fix sequence, timer, optional route) is
/// validated and reduced by the metrics calculator; only the derived
/// record is kept.
async fn submit_recording(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Json(recording): Json<ActivityRecording>,
) -> Result<(StatusCode, Json<Activity>)> {
    let metrics = compute_metrics(&recording)?;

    let activity = state.store.insert_activity(Activity {
        id: 0,
        user_id: identity.user_id.clone(),
        activity_type: recording.activity_type,
        started_at: recording.started_at,
        metrics,
        route: recording.route,
    });

    tracing::info!(
        user_id = %identity.user_id,
        activity_id = activity.id,
        activity_type = ?activity.activity_type,
        distance_km = metrics.distance_km,
        duration_seconds = metrics.duration_seconds,
        "Activity recorded"
    );

    Ok((StatusCode::CREATED, Json(activity)))
}

// ─── Activity Listing ────────────────────────────────────────

#[derive(Serialize)]
pub struct ActivitySummary {
    pub id: u64,
    pub activity_type: ActivityType,
    pub started_at: String,
    #[serde(flatten)]
    pub metrics: ActivityMetrics,
}

#[derive(Serialize)]
pub struct ActivitiesResponse {
    pub activities: Vec<ActivitySummary>,
    pub total: u32,
}

/// List the user's activities, most recent first.
async fn get_activities(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<ActivitiesResponse>> {
    let activities = state.store.activities_for_user(&identity.user_id);

    let summaries: Vec<ActivitySummary> = activities
        .into_iter()
        .map(|a| ActivitySummary {
            id: a.id,
            activity_type: a.activity_type,
            started_at: a.started_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            metrics: a.metrics,
        })
        .collect();

    let total = summaries.len() as u32;
    Ok(Json(ActivitiesResponse {
        activities: summaries,
        total,
    }))
}

// ─── Distance Dashboard ──────────────────────────────────────

fn default_granularity() -> Granularity {
    Granularity::Day
}

#[derive(Deserialize)]
struct SummaryQuery {
    #[serde(default = "default_granularity")]
    granularity: Granularity,
}

#[derive(Serialize)]
pub struct DistanceBucket {
    pub date: NaiveDate,
    pub distance_km: f64,
}

#[derive(Serialize)]
pub struct DistanceSummaryResponse {
    pub buckets: Vec<DistanceBucket>,
}

/// Distance covered per day or week, for the dashboard chart.
async fn get_distance_summary(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Query(params): Query<SummaryQuery>,
) -> Result<Json<DistanceSummaryResponse>> {
    let activities = state.store.activities_for_user(&identity.user_id);

    // Bucket on the stored UTC start date of each activity.
    let buckets = bucket_records(
        &activities,
        params.granularity,
        |a| a.started_at.date_naive(),
        |a| a.metrics.distance_km,
    );

    Ok(Json(DistanceSummaryResponse {
        buckets: buckets
            .into_iter()
            .map(|(date, distance_km)| DistanceBucket { date, distance_km })
            .collect(),
    }))
}
