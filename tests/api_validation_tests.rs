// SPDX-License-Identifier: MIT

//! API input validation tests: malformed bodies must come back 400,
//! never as NaN or nonsense in a 200.

use axum::http::StatusCode;
use tower::ServiceExt;

mod common;

#[tokio::test]
async fn test_meal_with_negative_quantity_rejected() {
    let (app, _state) = common::create_test_app();

    let payload = serde_json::json!({
        "name": "Breakfast",
        "date": "2025-06-01",
        "entries": [{
            "name": "Oatmeal",
            "quantity": -2.0,
            "calories_per_unit": 100.0,
            "protein_per_unit": 10.0,
            "carbs_per_unit": 20.0,
            "fats_per_unit": 5.0,
        }],
    });

    let response = app
        .oneshot(common::post_json_as("alice", "/api/meals", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_meal_with_zero_quantity_rejected() {
    let (app, _state) = common::create_test_app();

    let payload = serde_json::json!({
        "name": "Breakfast",
        "date": "2025-06-01",
        "entries": [{
            "name": "Oatmeal",
            "quantity": 0.0,
            "calories_per_unit": 100.0,
            "protein_per_unit": 10.0,
            "carbs_per_unit": 20.0,
            "fats_per_unit": 5.0,
        }],
    });

    let response = app
        .oneshot(common::post_json_as("alice", "/api/meals", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_date_format_rejected() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(common::get_as(
            "alice",
            "/api/nutrition/daily?date=not-a-date",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_summary_range_must_be_ordered() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(common::get_as(
            "alice",
            "/api/nutrition/summary?start=2025-06-30&end=2025-06-01",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_challenge_with_non_positive_goal_rejected() {
    let (app, _state) = common::create_test_app();

    let payload = serde_json::json!({
        "name": "June distance",
        "challenge_type": "distance",
        "goal_value": 0.0,
        "start_date": "2025-06-01",
        "end_date": "2025-06-30",
    });

    let response = app
        .oneshot(common::post_json_as("alice", "/api/challenges", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_challenge_window_must_be_ordered() {
    let (app, _state) = common::create_test_app();

    let payload = serde_json::json!({
        "name": "Backwards",
        "challenge_type": "steps",
        "goal_value": 100.0,
        "start_date": "2025-06-30",
        "end_date": "2025-06-01",
    });

    let response = app
        .oneshot(common::post_json_as("alice", "/api/challenges", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_recording_with_reversed_timer_rejected() {
    let (app, _state) = common::create_test_app();

    let payload = serde_json::json!({
        "activity_type": "running",
        "started_at": "2025-06-01T08:10:00Z",
        "ended_at": "2025-06-01T08:00:00Z",
        "fixes": [],
    });

    let response = app
        .oneshot(common::post_json_as("alice", "/api/activities", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_route_with_wrong_geometry_type_rejected() {
    let (app, _state) = common::create_test_app();

    let payload = serde_json::json!({
        "activity_type": "running",
        "started_at": "2025-06-01T08:00:00Z",
        "ended_at": "2025-06-01T08:10:00Z",
        "fixes": [],
        "route": {
            "type": "Point",
            "coordinates": [[-122.1, 37.4], [-122.2, 37.5]],
        },
    });

    let response = app
        .oneshot(common::post_json_as("alice", "/api/activities", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_weight_must_be_positive() {
    let (app, _state) = common::create_test_app();

    let payload = serde_json::json!({
        "date": "2025-06-01",
        "weight_kg": 0.0,
    });

    let response = app
        .oneshot(common::post_json_as("alice", "/api/weight", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
