// SPDX-License-Identifier: MIT

//! Meal and macro models for storage and API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

/// One food line item within a meal.
///
/// Displayed and summed macros are always `quantity * per_unit`; the
/// per-unit values come from the food database entry the user picked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodEntry {
    /// Food name as logged (e.g. "Oatmeal")
    pub name: String,
    /// Number of servings (positive)
    pub quantity: f64,
    /// Calories per serving
    pub calories_per_unit: f64,
    /// Protein grams per serving
    pub protein_per_unit: f64,
    /// Carbohydrate grams per serving
    pub carbs_per_unit: f64,
    /// Fat grams per serving
    pub fats_per_unit: f64,
}

/// Summed macros for a meal, a day, or a date range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MealTotals {
    pub total_calories: f64,
    pub total_protein: f64,
    pub total_carbs: f64,
    pub total_fats: f64,
}

impl AddAssign for MealTotals {
    fn add_assign(&mut self, rhs: Self) {
        self.total_calories += rhs.total_calories;
        self.total_protein += rhs.total_protein;
        self.total_carbs += rhs.total_carbs;
        self.total_fats += rhs.total_fats;
    }
}

/// Stored meal record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meal {
    /// Store-assigned ID
    pub id: u64,
    /// Owning user (opaque identity from the auth provider)
    pub user_id: String,
    /// Meal name (e.g. "Breakfast")
    pub name: String,
    /// Calendar date the meal was eaten (UTC)
    pub date: NaiveDate,
    /// Line items making up the meal
    pub entries: Vec<FoodEntry>,
    /// Totals at insert time. Display cache only: every read path
    /// recomputes from `entries`.
    pub totals: MealTotals,
}

/// Per-day totals within a date range summary.
#[derive(Debug, Clone, Serialize)]
pub struct DailyTotals {
    pub date: NaiveDate,
    pub meal_count: u32,
    #[serde(flatten)]
    pub totals: MealTotals,
}

/// Range summary: one entry per logged day plus per-day averages.
///
/// Averages divide by the number of days that have at least one meal,
/// so unlogged days do not dilute them.
#[derive(Debug, Clone, Serialize)]
pub struct RangeSummary {
    pub days: Vec<DailyTotals>,
    pub days_logged: u32,
    pub average_per_day: MealTotals,
}
