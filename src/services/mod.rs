// SPDX-License-Identifier: MIT

//! Services module - the pure computation core.
//!
//! Everything here is a synchronous function of already-fetched,
//! immutable input collections. Handlers fetch rows, call in, and
//! serialize what comes out.

pub mod activity;
pub mod buckets;
pub mod leaderboard;
pub mod nutrition;

pub use activity::{compute_metrics, ActivityError};
pub use buckets::{bucket_records, Granularity};
pub use leaderboard::{compute_leaderboard, ChallengeError, ParticipantHistory};
pub use nutrition::NutritionError;
