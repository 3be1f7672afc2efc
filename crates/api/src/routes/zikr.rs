//! Route definitions for the `/zikr` resource.
//!
//! All endpoints require the identity header.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::zikr;
use crate::state::AppState;

/// Routes mounted at `/zikr`.
///
/// ```text
/// POST   /increment         -> increment
/// POST   /increment/batch   -> increment_batch
/// GET    /summary           -> summary
/// GET    /types             -> list_types
/// POST   /types             -> add_type
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/increment", post(zikr::increment))
        .route("/increment/batch", post(zikr::increment_batch))
        .route("/summary", get(zikr::summary))
        .route("/types", get(zikr::list_types).post(zikr::add_type))
}
