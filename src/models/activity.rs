// SPDX-License-Identifier: MIT

//! GPS activity models for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Activity type, with its calorie burn constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Running,
    Cycling,
    Walking,
    Hiking,
}

impl ActivityType {
    /// Estimated calories burned per kilometer. Fixed table; the
    /// estimate is linear in distance.
    pub fn calories_per_km(self) -> f64 {
        match self {
            ActivityType::Running => 60.0,
            ActivityType::Cycling => 30.0,
            ActivityType::Walking => 50.0,
            ActivityType::Hiking => 55.0,
        }
    }
}

/// A single GPS fix captured by the recorder, in capture order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GpsFix {
    pub latitude: f64,
    pub longitude: f64,
    /// Capture time, milliseconds since the Unix epoch
    pub timestamp_ms: i64,
    /// Altitude in meters; may be absent when the receiver has no fix
    #[serde(default)]
    pub altitude: Option<f64>,
}

/// A pause in the recording timer. An interval with no `resumed_at`
/// ran until the recording stopped.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PauseInterval {
    pub paused_at: DateTime<Utc>,
    #[serde(default)]
    pub resumed_at: Option<DateTime<Utc>>,
}

/// Route geometry as captured by the client, GeoJSON LineString shape.
///
/// Typed explicitly so coordinate arity is checked at deserialization;
/// the `kind` tag must be `"LineString"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteData {
    #[serde(rename = "type")]
    pub kind: String,
    /// `[longitude, latitude]` pairs
    pub coordinates: Vec<[f64; 2]>,
}

/// A completed recording as submitted by the client.
///
/// The timer (`started_at`/`ended_at`/`pauses`) runs in parallel with
/// fix capture, so duration is independent of the fix count.
#[derive(Debug, Clone, Deserialize)]
pub struct ActivityRecording {
    pub activity_type: ActivityType,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    #[serde(default)]
    pub pauses: Vec<PauseInterval>,
    #[serde(default)]
    pub fixes: Vec<GpsFix>,
    #[serde(default)]
    pub route: Option<RouteData>,
}

/// Metrics derived from one recording.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivityMetrics {
    pub distance_km: f64,
    pub duration_seconds: i64,
    /// `None` when no distance was covered; serialized as `null`
    pub avg_pace_min_per_km: Option<f64>,
    pub elevation_gain_meters: f64,
    pub estimated_calories: f64,
}

/// Stored activity record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    /// Store-assigned ID
    pub id: u64,
    /// Owning user (opaque identity from the auth provider)
    pub user_id: String,
    pub activity_type: ActivityType,
    /// Recording start time (UTC)
    pub started_at: DateTime<Utc>,
    pub metrics: ActivityMetrics,
    /// Route geometry, if the client captured one
    pub route: Option<RouteData>,
}
