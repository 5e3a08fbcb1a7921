// SPDX-License-Identifier: MIT

//! Stridelog: fitness logging API
//!
//! This crate provides the backend API for logging meals, workouts,
//! weight, steps and GPS activities, and for computing the dashboards
//! and challenge leaderboards derived from those records. The derived
//! numbers all come from pure functions in [`services`]; route
//! handlers validate input, fetch rows and serialize results.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

use config::Config;
use store::Store;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: Store,
}
