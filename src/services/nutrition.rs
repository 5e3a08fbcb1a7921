// SPDX-License-Identifier: MIT

//! Nutrition rollup: meal, day and range macro totals.
//!
//! Totals are always recomputed from the food line items. A meal's
//! stored `totals` field is a display cache and is never trusted here.
//! Sums stay in `f64`; rounding belongs to the presentation boundary.

use crate::models::nutrition::{DailyTotals, Meal, MealTotals, RangeSummary};
use crate::models::FoodEntry;
use std::collections::BTreeMap;

/// Errors from nutrition aggregation.
#[derive(Debug, thiserror::Error)]
pub enum NutritionError {
    #[error("Food entry '{name}' has non-positive quantity {quantity}")]
    InvalidQuantity { name: String, quantity: f64 },

    #[error("Food entry '{name}' has a negative per-unit macro")]
    NegativeMacro { name: String },

    #[error("Food entry '{name}' has a non-finite numeric field")]
    NonFinite { name: String },
}

fn validate_entry(entry: &FoodEntry) -> Result<(), NutritionError> {
    let fields = [
        entry.quantity,
        entry.calories_per_unit,
        entry.protein_per_unit,
        entry.carbs_per_unit,
        entry.fats_per_unit,
    ];
    if fields.iter().any(|v| !v.is_finite()) {
        return Err(NutritionError::NonFinite {
            name: entry.name.clone(),
        });
    }
    if entry.quantity <= 0.0 {
        return Err(NutritionError::InvalidQuantity {
            name: entry.name.clone(),
            quantity: entry.quantity,
        });
    }
    if fields[1..].iter().any(|v| *v < 0.0) {
        return Err(NutritionError::NegativeMacro {
            name: entry.name.clone(),
        });
    }
    Ok(())
}

/// Sum a meal's macros from its line items: `quantity * per_unit` per
/// field, independently.
pub fn meal_totals(entries: &[FoodEntry]) -> Result<MealTotals, NutritionError> {
    let mut totals = MealTotals::default();
    for entry in entries {
        validate_entry(entry)?;
        totals += MealTotals {
            total_calories: entry.quantity * entry.calories_per_unit,
            total_protein: entry.quantity * entry.protein_per_unit,
            total_carbs: entry.quantity * entry.carbs_per_unit,
            total_fats: entry.quantity * entry.fats_per_unit,
        };
    }
    Ok(totals)
}

/// Sum a day's macros across its meals, recomputing each meal from its
/// line items.
pub fn daily_totals(meals: &[Meal]) -> Result<MealTotals, NutritionError> {
    let mut totals = MealTotals::default();
    for meal in meals {
        totals += meal_totals(&meal.entries)?;
    }
    Ok(totals)
}

/// Summarize a date range: per-day totals in ascending date order plus
/// per-day averages.
///
/// The average divides by the number of days that have at least one
/// meal. A day with nothing logged is not a zero sample and does not
/// dilute the average.
pub fn range_summary(meals: &[Meal]) -> Result<RangeSummary, NutritionError> {
    let mut by_day: BTreeMap<chrono::NaiveDate, (MealTotals, u32)> = BTreeMap::new();
    for meal in meals {
        let entry = by_day.entry(meal.date).or_default();
        entry.0 += meal_totals(&meal.entries)?;
        entry.1 += 1;
    }

    let days_logged = by_day.len() as u32;
    let mut range_totals = MealTotals::default();
    let days: Vec<DailyTotals> = by_day
        .into_iter()
        .map(|(date, (totals, meal_count))| {
            range_totals += totals;
            DailyTotals {
                date,
                meal_count,
                totals,
            }
        })
        .collect();

    let average_per_day = if days_logged == 0 {
        MealTotals::default()
    } else {
        let n = f64::from(days_logged);
        MealTotals {
            total_calories: range_totals.total_calories / n,
            total_protein: range_totals.total_protein / n,
            total_carbs: range_totals.total_carbs / n,
            total_fats: range_totals.total_fats / n,
        }
    };

    Ok(RangeSummary {
        days,
        days_logged,
        average_per_day,
    })
}
