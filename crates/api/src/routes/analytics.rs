//! Route definitions for goals, streaks, and analytics.
//!
//! All endpoints require the identity header.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::analytics;
use crate::state::AppState;

/// Routes mounted directly under `/api/v1`.
///
/// ```text
/// GET    /goal              -> get_goal
/// POST   /goal              -> set_goal
/// GET    /streak            -> get_streak
/// POST   /streak/pause      -> pause_streak
/// POST   /streak/resume     -> resume_streak
/// POST   /streak/check      -> check_streak
/// GET    /analytics         -> analytics
/// GET    /analytics/compare -> compare
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/goal", get(analytics::get_goal).post(analytics::set_goal))
        .route("/streak", get(analytics::get_streak))
        .route("/streak/pause", post(analytics::pause_streak))
        .route("/streak/resume", post(analytics::resume_streak))
        .route("/streak/check", post(analytics::check_streak))
        .route("/analytics", get(analytics::analytics))
        .route("/analytics/compare", get(analytics::compare))
}
