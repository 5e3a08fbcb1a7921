// SPDX-License-Identifier: MIT

//! Challenge and leaderboard routes.

use crate::error::{AppError, Result};
use crate::middleware::identity::Identity;
use crate::models::challenge::{Challenge, ChallengeType, LeaderboardEntry, Participation};
use crate::services::leaderboard::compute_leaderboard;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

/// Challenge routes (identity middleware is applied in routes/mod.rs).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/challenges", post(create_challenge).get(list_challenges))
        .route("/api/challenges/{id}/join", post(join_challenge))
        .route("/api/challenges/{id}/leaderboard", get(get_leaderboard))
}

// ─── Challenge Creation ──────────────────────────────────────

#[derive(Deserialize, Validate)]
pub struct CreateChallengeRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub challenge_type: ChallengeType,
    #[validate(range(exclusive_min = 0.0))]
    pub goal_value: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Create a challenge.
async fn create_challenge(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<CreateChallengeRequest>,
) -> Result<(StatusCode, Json<Challenge>)> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    if payload.end_date < payload.start_date {
        return Err(AppError::BadRequest(
            "'end_date' must not be before 'start_date'".to_string(),
        ));
    }

    let challenge = state.store.insert_challenge(Challenge {
        id: 0,
        name: payload.name,
        challenge_type: payload.challenge_type,
        goal_value: payload.goal_value,
        start_date: payload.start_date,
        end_date: payload.end_date,
    });

    tracing::info!(
        user_id = %identity.user_id,
        challenge_id = challenge.id,
        challenge_type = ?challenge.challenge_type,
        goal = challenge.goal_value,
        "Challenge created"
    );

    Ok((StatusCode::CREATED, Json(challenge)))
}

/// List all challenges.
async fn list_challenges(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Challenge>>> {
    Ok(Json(state.store.list_challenges()))
}

// ─── Membership ──────────────────────────────────────────────

/// Join a challenge. Joining twice is rejected.
async fn join_challenge(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Path(challenge_id): Path<u64>,
) -> Result<(StatusCode, Json<Participation>)> {
    let participation = state
        .store
        .join_challenge(challenge_id, &identity.user_id, Utc::now())?;

    tracing::info!(
        user_id = %identity.user_id,
        challenge_id,
        "Joined challenge"
    );

    Ok((StatusCode::CREATED, Json(participation)))
}

// ─── Leaderboard ─────────────────────────────────────────────

#[derive(Serialize)]
pub struct LeaderboardResponse {
    pub challenge_id: u64,
    pub challenge_type: ChallengeType,
    pub goal_value: f64,
    pub entries: Vec<LeaderboardEntry>,
}

/// Rank a challenge's participants by progress toward the goal.
///
/// Recomputed from source records on every request; a challenge with
/// no participants yields an empty list.
async fn get_leaderboard(
    State(state): State<Arc<AppState>>,
    Path(challenge_id): Path<u64>,
) -> Result<Json<LeaderboardResponse>> {
    let challenge = state
        .store
        .get_challenge(challenge_id)
        .ok_or_else(|| AppError::NotFound(format!("Challenge {challenge_id} not found")))?;

    let participants = state
        .store
        .participants(challenge_id)
        .into_iter()
        .map(|participation| {
            let history = state
                .store
                .history_for_user(&participation.user_id, challenge.challenge_type);
            (participation, history)
        })
        .collect();

    let entries = compute_leaderboard(&challenge, participants)?;

    tracing::debug!(
        challenge_id,
        participants = entries.len(),
        "Leaderboard computed"
    );

    Ok(Json(LeaderboardResponse {
        challenge_id,
        challenge_type: challenge.challenge_type,
        goal_value: challenge.goal_value,
        entries,
    }))
}
