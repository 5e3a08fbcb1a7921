// SPDX-License-Identifier: MIT

//! Activity metrics: distance, pace, elevation and calories from a
//! recorded GPS fix sequence plus the recorder's timer.

use crate::models::activity::{ActivityMetrics, ActivityRecording, GpsFix, PauseInterval, RouteData};
use chrono::{DateTime, Utc};
use geo::{Distance, Haversine, Point};

/// Minimum single-step distance (meters) that counts toward the total.
/// Steps below this are GPS receiver jitter, not movement, so the
/// accumulated distance is a lower bound.
const NOISE_THRESHOLD_METERS: f64 = 5.0;

/// Errors from activity metric computation.
#[derive(Debug, thiserror::Error)]
pub enum ActivityError {
    #[error("Recording ends before it starts")]
    EndBeforeStart,

    #[error("Pause interval resumes before it pauses")]
    PauseOutOfOrder,

    #[error("Invalid route geometry: {0}")]
    InvalidRoute(String),

    #[error("Fix has out-of-range coordinates ({latitude}, {longitude})")]
    InvalidCoordinates { latitude: f64, longitude: f64 },
}

/// Compute all metrics for one recording.
///
/// An empty or single-fix sequence is valid: distance, elevation and
/// calories are zero and pace is `None`. The duration still comes from
/// the timer, which runs independently of fix capture.
pub fn compute_metrics(recording: &ActivityRecording) -> Result<ActivityMetrics, ActivityError> {
    if let Some(route) = &recording.route {
        validate_route(route)?;
    }
    for fix in &recording.fixes {
        validate_fix(fix)?;
    }

    let distance_km = accumulate_distance_km(&recording.fixes);
    let duration_seconds =
        active_duration_seconds(recording.started_at, recording.ended_at, &recording.pauses)?;

    // Guard the division: no pace without distance, and no NaN in output.
    let avg_pace_min_per_km = if distance_km > 0.0 {
        Some((duration_seconds as f64 / 60.0) / distance_km)
    } else {
        None
    };

    Ok(ActivityMetrics {
        distance_km,
        duration_seconds,
        avg_pace_min_per_km,
        elevation_gain_meters: elevation_gain_meters(&recording.fixes),
        estimated_calories: distance_km * recording.activity_type.calories_per_km(),
    })
}

fn validate_fix(fix: &GpsFix) -> Result<(), ActivityError> {
    let in_range = fix.latitude.is_finite()
        && fix.longitude.is_finite()
        && (-90.0..=90.0).contains(&fix.latitude)
        && (-180.0..=180.0).contains(&fix.longitude);
    if in_range {
        Ok(())
    } else {
        Err(ActivityError::InvalidCoordinates {
            latitude: fix.latitude,
            longitude: fix.longitude,
        })
    }
}

/// Validate client-submitted route geometry (typed GeoJSON LineString).
fn validate_route(route: &RouteData) -> Result<(), ActivityError> {
    if route.kind != "LineString" {
        return Err(ActivityError::InvalidRoute(format!(
            "Unsupported geometry type '{}' (expected LineString)",
            route.kind
        )));
    }
    if route.coordinates.len() == 1 {
        return Err(ActivityError::InvalidRoute(
            "LineString needs zero or at least two positions".to_string(),
        ));
    }
    for [lon, lat] in &route.coordinates {
        if !(-180.0..=180.0).contains(lon) || !(-90.0..=90.0).contains(lat) {
            return Err(ActivityError::InvalidRoute(format!(
                "Position ({lon}, {lat}) out of range"
            )));
        }
    }
    Ok(())
}

/// Haversine accumulation over consecutive fixes, skipping sub-threshold
/// steps entirely (they are not added to the accumulator).
fn accumulate_distance_km(fixes: &[GpsFix]) -> f64 {
    let mut total_meters = 0.0;
    for pair in fixes.windows(2) {
        let step = Haversine.distance(point_of(&pair[0]), point_of(&pair[1]));
        if step >= NOISE_THRESHOLD_METERS {
            total_meters += step;
        }
    }
    total_meters / 1000.0
}

fn point_of(fix: &GpsFix) -> Point<f64> {
    Point::new(fix.longitude, fix.latitude)
}

/// Sum of positive consecutive altitude deltas. A step with a missing
/// altitude on either end contributes nothing.
fn elevation_gain_meters(fixes: &[GpsFix]) -> f64 {
    let mut gain = 0.0;
    for pair in fixes.windows(2) {
        if let (Some(prev), Some(next)) = (pair[0].altitude, pair[1].altitude) {
            if next > prev {
                gain += next - prev;
            }
        }
    }
    gain
}

/// Wall-clock seconds between start and stop, minus paused intervals.
///
/// Pauses are clamped to the recording window; an unresumed pause runs
/// to the end of the recording.
fn active_duration_seconds(
    started_at: DateTime<Utc>,
    ended_at: DateTime<Utc>,
    pauses: &[PauseInterval],
) -> Result<i64, ActivityError> {
    if ended_at < started_at {
        return Err(ActivityError::EndBeforeStart);
    }

    let mut paused_seconds = 0;
    for pause in pauses {
        let resumed_at = pause.resumed_at.unwrap_or(ended_at);
        if resumed_at < pause.paused_at {
            return Err(ActivityError::PauseOutOfOrder);
        }
        let from = pause.paused_at.clamp(started_at, ended_at);
        let until = resumed_at.clamp(started_at, ended_at);
        paused_seconds += (until - from).num_seconds();
    }

    let total = (ended_at - started_at).num_seconds();
    Ok((total - paused_seconds).max(0))
}
