// SPDX-License-Identifier: MIT

//! In-memory row store backed by concurrent maps.
//!
//! Rows are keyed per user (per challenge for participations) and
//! returned as owned snapshots: a handler's computation runs over a
//! copy that no concurrent write mutates. Writes are idempotent
//! single-row inserts, matching what the external store would do.

use crate::models::challenge::{Challenge, ChallengeType, Participation};
use crate::models::{Activity, Meal, StepLog, WeightLog, Workout};
use chrono::{DateTime, NaiveDate, Utc};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Errors from store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Challenge {0} not found")]
    ChallengeNotFound(u64),

    #[error("User {user_id} already joined challenge {challenge_id}")]
    AlreadyJoined { user_id: String, challenge_id: u64 },
}

/// In-memory store. Cheap to clone-share via `AppState`.
#[derive(Default)]
pub struct Store {
    next_id: AtomicU64,
    meals: DashMap<String, Vec<Meal>>,
    activities: DashMap<String, Vec<Activity>>,
    workouts: DashMap<String, Vec<Workout>>,
    weight_logs: DashMap<String, Vec<WeightLog>>,
    step_logs: DashMap<String, Vec<StepLog>>,
    challenges: DashMap<u64, Challenge>,
    /// Keyed by challenge ID
    participations: DashMap<u64, Vec<Participation>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed) + 1
    }

    // ─── Meals ───────────────────────────────────────────────────

    /// Insert a meal, assigning its ID.
    pub fn insert_meal(&self, mut meal: Meal) -> Meal {
        meal.id = self.allocate_id();
        self.meals
            .entry(meal.user_id.clone())
            .or_default()
            .push(meal.clone());
        meal
    }

    /// All of a user's meals on one date.
    pub fn meals_for_date(&self, user_id: &str, date: NaiveDate) -> Vec<Meal> {
        self.meals
            .get(user_id)
            .map(|rows| rows.iter().filter(|m| m.date == date).cloned().collect())
            .unwrap_or_default()
    }

    /// All of a user's meals with dates in `[start, end]`.
    pub fn meals_in_range(&self, user_id: &str, start: NaiveDate, end: NaiveDate) -> Vec<Meal> {
        self.meals
            .get(user_id)
            .map(|rows| {
                rows.iter()
                    .filter(|m| m.date >= start && m.date <= end)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    // ─── Activities ──────────────────────────────────────────────

    pub fn insert_activity(&self, mut activity: Activity) -> Activity {
        activity.id = self.allocate_id();
        self.activities
            .entry(activity.user_id.clone())
            .or_default()
            .push(activity.clone());
        activity
    }

    /// A user's activities, most recent first.
    pub fn activities_for_user(&self, user_id: &str) -> Vec<Activity> {
        let mut rows: Vec<Activity> = self
            .activities
            .get(user_id)
            .map(|rows| rows.clone())
            .unwrap_or_default();
        rows.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        rows
    }

    // ─── Measurements ────────────────────────────────────────────

    pub fn insert_workout(&self, mut workout: Workout) -> Workout {
        workout.id = self.allocate_id();
        self.workouts
            .entry(workout.user_id.clone())
            .or_default()
            .push(workout.clone());
        workout
    }

    pub fn workouts_for_user(&self, user_id: &str) -> Vec<Workout> {
        self.workouts
            .get(user_id)
            .map(|rows| rows.clone())
            .unwrap_or_default()
    }

    pub fn insert_weight_log(&self, log: WeightLog) {
        self.weight_logs
            .entry(log.user_id.clone())
            .or_default()
            .push(log);
    }

    /// A user's weight logs in ascending date order.
    pub fn weight_logs_for_user(&self, user_id: &str) -> Vec<WeightLog> {
        let mut rows: Vec<WeightLog> = self
            .weight_logs
            .get(user_id)
            .map(|rows| rows.clone())
            .unwrap_or_default();
        rows.sort_by_key(|w| w.date);
        rows
    }

    pub fn insert_step_log(&self, log: StepLog) {
        self.step_logs
            .entry(log.user_id.clone())
            .or_default()
            .push(log);
    }

    pub fn step_logs_for_user(&self, user_id: &str) -> Vec<StepLog> {
        self.step_logs
            .get(user_id)
            .map(|rows| rows.clone())
            .unwrap_or_default()
    }

    // ─── Challenges ──────────────────────────────────────────────

    pub fn insert_challenge(&self, mut challenge: Challenge) -> Challenge {
        challenge.id = self.allocate_id();
        self.challenges.insert(challenge.id, challenge.clone());
        challenge
    }

    pub fn get_challenge(&self, id: u64) -> Option<Challenge> {
        self.challenges.get(&id).map(|c| c.clone())
    }

    pub fn list_challenges(&self) -> Vec<Challenge> {
        let mut rows: Vec<Challenge> = self.challenges.iter().map(|c| c.clone()).collect();
        rows.sort_by_key(|c| c.id);
        rows
    }

    /// Join a challenge. A user cannot join the same challenge twice.
    pub fn join_challenge(
        &self,
        challenge_id: u64,
        user_id: &str,
        joined_at: DateTime<Utc>,
    ) -> Result<Participation, StoreError> {
        if !self.challenges.contains_key(&challenge_id) {
            return Err(StoreError::ChallengeNotFound(challenge_id));
        }

        let mut members = self.participations.entry(challenge_id).or_default();
        if members.iter().any(|p| p.user_id == user_id) {
            return Err(StoreError::AlreadyJoined {
                user_id: user_id.to_string(),
                challenge_id,
            });
        }

        let participation = Participation {
            user_id: user_id.to_string(),
            challenge_id,
            joined_at,
        };
        members.push(participation.clone());
        Ok(participation)
    }

    pub fn participants(&self, challenge_id: u64) -> Vec<Participation> {
        self.participations
            .get(&challenge_id)
            .map(|rows| rows.clone())
            .unwrap_or_default()
    }

    /// Everything a leaderboard needs for one participant. Which part
    /// is consulted depends on the challenge type; fetching all four
    /// keeps this a single snapshot per user.
    pub fn history_for_user(
        &self,
        user_id: &str,
        challenge_type: ChallengeType,
    ) -> crate::services::ParticipantHistory {
        let mut history = crate::services::ParticipantHistory::default();
        match challenge_type {
            ChallengeType::Distance => history.activities = self.activities_for_user(user_id),
            ChallengeType::WorkoutCount => history.workouts = self.workouts_for_user(user_id),
            ChallengeType::WeightLoss => history.weight_logs = self.weight_logs_for_user(user_id),
            ChallengeType::Steps => history.step_logs = self.step_logs_for_user(user_id),
        }
        history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn test_challenge() -> Challenge {
        Challenge {
            id: 0,
            name: "Test".to_string(),
            challenge_type: ChallengeType::Steps,
            goal_value: 100.0,
            start_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
        }
    }

    #[test]
    fn test_ids_are_assigned_and_unique() {
        let store = Store::new();
        let a = store.insert_challenge(test_challenge());
        let b = store.insert_challenge(test_challenge());
        assert_ne!(a.id, b.id);
        assert!(store.get_challenge(a.id).is_some());
    }

    #[test]
    fn test_duplicate_join_rejected() {
        let store = Store::new();
        let challenge = store.insert_challenge(test_challenge());
        let joined_at = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();

        store
            .join_challenge(challenge.id, "alice", joined_at)
            .unwrap();
        let err = store
            .join_challenge(challenge.id, "alice", joined_at)
            .unwrap_err();
        assert!(matches!(err, StoreError::AlreadyJoined { .. }));
        assert_eq!(store.participants(challenge.id).len(), 1);
    }

    #[test]
    fn test_join_unknown_challenge_rejected() {
        let store = Store::new();
        let err = store
            .join_challenge(999, "alice", Utc::now())
            .unwrap_err();
        assert!(matches!(err, StoreError::ChallengeNotFound(999)));
    }

    #[test]
    fn test_meals_in_range_is_inclusive() {
        let store = Store::new();
        for day in [1, 15, 30] {
            store.insert_meal(Meal {
                id: 0,
                user_id: "alice".to_string(),
                name: "Lunch".to_string(),
                date: NaiveDate::from_ymd_opt(2025, 6, day).unwrap(),
                entries: vec![],
                totals: Default::default(),
            });
        }
        let rows = store.meals_in_range(
            "alice",
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
        );
        assert_eq!(rows.len(), 2);
    }
}
