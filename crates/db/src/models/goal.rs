//! Daily goal row.

use serde::Serialize;
use sqlx::FromRow;
use zikr_core::types::Timestamp;

/// Per-user daily target. Created lazily with the default target on first
/// access.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Goal {
    pub user_id: String,
    pub daily_target: i64,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
