use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: zikr_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Offset to use when the request did not declare one.
    pub fn resolve_offset(&self, requested: Option<i32>) -> i32 {
        requested.unwrap_or(self.config.default_timezone_offset_minutes)
    }
}
