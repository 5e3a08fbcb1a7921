// SPDX-License-Identifier: MIT

//! Challenge and leaderboard models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// What a challenge measures, and therefore which records feed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeType {
    /// Summed GPS activity distance (km)
    Distance,
    /// Count of workouts logged in the window
    WorkoutCount,
    /// Earliest minus latest in-window weight (kg)
    WeightLoss,
    /// Summed step counts
    Steps,
}

/// Stored challenge definition. Invariant: `end_date >= start_date`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Challenge {
    /// Store-assigned ID
    pub id: u64,
    pub name: String,
    pub challenge_type: ChallengeType,
    /// Goal in the challenge type's unit (positive)
    pub goal_value: f64,
    /// First day of the window (UTC, inclusive)
    pub start_date: NaiveDate,
    /// Last day of the window (UTC, inclusive)
    pub end_date: NaiveDate,
}

/// A user's membership in a challenge. Unique per (user, challenge).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participation {
    pub user_id: String,
    pub challenge_id: u64,
    pub joined_at: DateTime<Utc>,
}

/// One ranked row of a leaderboard. Derived on every request, never
/// persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub user_id: String,
    /// Raw progress in the challenge type's unit; may be negative for
    /// weight-loss challenges where weight was gained
    pub progress: f64,
    /// Clamped to [0, 100]
    pub progress_percentage: f64,
    /// Unique sequential rank, 1..=N
    pub rank: u32,
    pub is_completed: bool,
}
