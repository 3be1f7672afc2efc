pub mod analytics;
pub mod health;
pub mod zikr;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /zikr/increment           single increment (POST)
/// /zikr/increment/batch     batch increment (POST)
/// /zikr/summary             lifetime totals (GET)
/// /zikr/types               list, register (GET, POST)
///
/// /goal                     get, set (GET, POST)
///
/// /streak                   current streak (GET)
/// /streak/pause             freeze the streak (POST)
/// /streak/resume            restore the streak (POST)
/// /streak/check             explicit goal check (POST)
///
/// /analytics                chart series and rollups (GET)
/// /analytics/compare        period-over-period comparison (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/zikr", zikr::router())
        .merge(analytics::router())
}
