// SPDX-License-Identifier: MIT

//! Challenge progress and leaderboard ranking.
//!
//! Every leaderboard request recomputes from source records; nothing is
//! cached between calls. Only records whose stored UTC calendar date
//! falls inside the challenge window count toward progress.

use crate::models::challenge::{Challenge, ChallengeType, LeaderboardEntry, Participation};
use crate::models::{Activity, StepLog, WeightLog, Workout};
use chrono::NaiveDate;
use std::cmp::Ordering;

/// Errors from leaderboard computation.
#[derive(Debug, thiserror::Error)]
pub enum ChallengeError {
    #[error("Challenge goal must be positive, got {0}")]
    InvalidGoal(f64),

    #[error("Challenge window ends before it starts")]
    InvalidWindow,
}

/// One participant's already-fetched source records for the challenge
/// window. Which field feeds progress depends on the challenge type.
#[derive(Debug, Clone, Default)]
pub struct ParticipantHistory {
    pub activities: Vec<Activity>,
    pub workouts: Vec<Workout>,
    pub weight_logs: Vec<WeightLog>,
    pub step_logs: Vec<StepLog>,
}

/// Rank all participants of a challenge.
///
/// Sort order is descending progress, ties broken by earlier `joined_at`
/// (first to join ranks higher), then by user id so equal rows still
/// order deterministically. Ranks are unique and sequential 1..=N.
pub fn compute_leaderboard(
    challenge: &Challenge,
    participants: Vec<(Participation, ParticipantHistory)>,
) -> Result<Vec<LeaderboardEntry>, ChallengeError> {
    if challenge.goal_value <= 0.0 || !challenge.goal_value.is_finite() {
        return Err(ChallengeError::InvalidGoal(challenge.goal_value));
    }
    if challenge.end_date < challenge.start_date {
        return Err(ChallengeError::InvalidWindow);
    }

    let mut scored: Vec<(Participation, f64)> = participants
        .into_iter()
        .map(|(participation, history)| {
            let progress = compute_progress(challenge, &history);
            (participation, progress)
        })
        .collect();

    scored.sort_by(|(pa, progress_a), (pb, progress_b)| {
        progress_b
            .partial_cmp(progress_a)
            .unwrap_or(Ordering::Equal)
            .then_with(|| pa.joined_at.cmp(&pb.joined_at))
            .then_with(|| pa.user_id.cmp(&pb.user_id))
    });

    let entries = scored
        .into_iter()
        .enumerate()
        .map(|(index, (participation, progress))| LeaderboardEntry {
            user_id: participation.user_id,
            progress,
            progress_percentage: (progress / challenge.goal_value * 100.0).clamp(0.0, 100.0),
            rank: index as u32 + 1,
            is_completed: progress >= challenge.goal_value,
        })
        .collect();

    Ok(entries)
}

/// A participant's raw progress toward the goal, from their records.
pub fn compute_progress(challenge: &Challenge, history: &ParticipantHistory) -> f64 {
    let window = |date: NaiveDate| date >= challenge.start_date && date <= challenge.end_date;

    match challenge.challenge_type {
        ChallengeType::Distance => history
            .activities
            .iter()
            .filter(|a| window(a.started_at.date_naive()))
            .map(|a| a.metrics.distance_km)
            .sum(),
        ChallengeType::WorkoutCount => {
            history.workouts.iter().filter(|w| window(w.date)).count() as f64
        }
        ChallengeType::WeightLoss => {
            // Earliest minus latest in-window weight; needs two logs to
            // measure a delta. Negative when weight was gained.
            let mut in_window: Vec<&WeightLog> =
                history.weight_logs.iter().filter(|w| window(w.date)).collect();
            in_window.sort_by_key(|w| w.date);
            match (in_window.first(), in_window.last()) {
                (Some(first), Some(last)) if in_window.len() >= 2 => {
                    first.weight_kg - last.weight_kg
                }
                _ => 0.0,
            }
        }
        ChallengeType::Steps => history
            .step_logs
            .iter()
            .filter(|s| window(s.date))
            .map(|s| f64::from(s.steps))
            .sum(),
    }
}
