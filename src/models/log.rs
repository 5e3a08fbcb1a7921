// SPDX-License-Identifier: MIT

//! Dated measurement records: weight, workouts, steps.
//!
//! Each carries the UTC calendar date it was logged for. That stored
//! date is what bucketing and challenge windows key on; the server
//! never re-derives "today" in another timezone.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A body-weight measurement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightLog {
    pub user_id: String,
    pub date: NaiveDate,
    pub weight_kg: f64,
}

/// A logged (non-GPS) workout session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workout {
    /// Store-assigned ID
    pub id: u64,
    pub user_id: String,
    pub date: NaiveDate,
    /// Workout name (e.g. "Upper body")
    pub name: String,
    /// Session length; absent when the user didn't time it
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    /// Self-reported burn; absent when unknown
    #[serde(default)]
    pub calories_burned: Option<f64>,
}

/// A daily step count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepLog {
    pub user_id: String,
    pub date: NaiveDate,
    pub steps: u32,
}
