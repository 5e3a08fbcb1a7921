// SPDX-License-Identifier: MIT

//! Meal logging and nutrition dashboard routes.

use crate::error::{AppError, Result};
use crate::middleware::identity::Identity;
use crate::models::nutrition::{FoodEntry, Meal, MealTotals, RangeSummary};
use crate::services::buckets::{bucket_records, Granularity};
use crate::services::nutrition;
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

/// Nutrition routes (identity middleware is applied in routes/mod.rs).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/meals", post(log_meal).get(get_meals))
        .route("/api/nutrition/daily", get(get_daily_totals))
        .route("/api/nutrition/summary", get(get_range_summary))
}

// ─── Meal Logging ────────────────────────────────────────────

#[derive(Deserialize, Validate)]
pub struct FoodEntryRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// Servings; must be positive
    #[validate(range(exclusive_min = 0.0))]
    pub quantity: f64,
    #[validate(range(min = 0.0))]
    pub calories_per_unit: f64,
    #[validate(range(min = 0.0))]
    pub protein_per_unit: f64,
    #[validate(range(min = 0.0))]
    pub carbs_per_unit: f64,
    #[validate(range(min = 0.0))]
    pub fats_per_unit: f64,
}

#[derive(Deserialize, Validate)]
pub struct LogMealRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Calendar date the meal was eaten (UTC)
    pub date: NaiveDate,
    #[validate(nested)]
    pub entries: Vec<FoodEntryRequest>,
}

/// Log a meal with its food entries.
async fn log_meal(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<LogMealRequest>,
) -> Result<(StatusCode, Json<Meal>)> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let entries: Vec<FoodEntry> = payload
        .entries
        .into_iter()
        .map(|e| FoodEntry {
            name: e.name,
            quantity: e.quantity,
            calories_per_unit: e.calories_per_unit,
            protein_per_unit: e.protein_per_unit,
            carbs_per_unit: e.carbs_per_unit,
            fats_per_unit: e.fats_per_unit,
        })
        .collect();

    // Totals are computed from the line items; the stored copy is a
    // display cache that read paths recompute anyway.
    let totals = nutrition::meal_totals(&entries)?;

    let meal = state.store.insert_meal(Meal {
        id: 0,
        user_id: identity.user_id.clone(),
        name: payload.name,
        date: payload.date,
        entries,
        totals,
    });

    tracing::info!(
        user_id = %identity.user_id,
        meal_id = meal.id,
        date = %meal.date,
        calories = totals.total_calories,
        "Meal logged"
    );

    Ok((StatusCode::CREATED, Json(meal)))
}

#[derive(Deserialize)]
struct MealsQuery {
    date: NaiveDate,
}

/// List the user's meals for one date.
async fn get_meals(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Query(params): Query<MealsQuery>,
) -> Result<Json<Vec<Meal>>> {
    Ok(Json(state.store.meals_for_date(&identity.user_id, params.date)))
}

// ─── Daily Totals ────────────────────────────────────────────

#[derive(Serialize)]
pub struct DailyTotalsResponse {
    pub date: NaiveDate,
    pub meal_count: u32,
    #[serde(flatten)]
    pub totals: MealTotals,
}

#[derive(Deserialize)]
struct DailyQuery {
    date: NaiveDate,
}

/// Macro totals for one day, recomputed from food entries.
async fn get_daily_totals(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Query(params): Query<DailyQuery>,
) -> Result<Json<DailyTotalsResponse>> {
    let meals = state.store.meals_for_date(&identity.user_id, params.date);
    let totals = nutrition::daily_totals(&meals)?;

    Ok(Json(DailyTotalsResponse {
        date: params.date,
        meal_count: meals.len() as u32,
        totals,
    }))
}

// ─── Range Summary ───────────────────────────────────────────

fn default_granularity() -> Granularity {
    Granularity::Day
}

#[derive(Deserialize)]
struct SummaryQuery {
    start: NaiveDate,
    end: NaiveDate,
    #[serde(default = "default_granularity")]
    granularity: Granularity,
}

#[derive(Serialize)]
pub struct NutritionBucket {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub totals: MealTotals,
}

#[derive(Serialize)]
pub struct NutritionSummaryResponse {
    /// Bucketed macro series at the requested granularity, ascending
    pub buckets: Vec<NutritionBucket>,
    pub days_logged: u32,
    /// Averages over days with at least one meal
    pub average_per_day: MealTotals,
}

/// Bucketed macro series plus per-logged-day averages for a range.
async fn get_range_summary(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Query(params): Query<SummaryQuery>,
) -> Result<Json<NutritionSummaryResponse>> {
    if params.end < params.start {
        return Err(AppError::BadRequest(
            "'end' must not be before 'start'".to_string(),
        ));
    }

    let meals = state
        .store
        .meals_in_range(&identity.user_id, params.start, params.end);

    // Recompute each meal from its line items, then bucket the sums at
    // the requested granularity.
    let dated: Vec<(NaiveDate, MealTotals)> = meals
        .iter()
        .map(|m| Ok((m.date, nutrition::meal_totals(&m.entries)?)))
        .collect::<std::result::Result<_, crate::services::NutritionError>>()?;
    let buckets = bucket_records(&dated, params.granularity, |r| r.0, |r| r.1);

    // Averages always divide by logged days, independent of granularity.
    let summary: RangeSummary = nutrition::range_summary(&meals)?;

    Ok(Json(NutritionSummaryResponse {
        buckets: buckets
            .into_iter()
            .map(|(date, totals)| NutritionBucket { date, totals })
            .collect(),
        days_logged: summary.days_logged,
        average_per_day: summary.average_per_day,
    }))
}
