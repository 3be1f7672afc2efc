//! User ledger row and related read models.

use serde::Serialize;
use sqlx::FromRow;
use zikr_core::types::Timestamp;

/// Full user row from the `users` table.
///
/// `total_count` is the denormalized lifetime sum across all activity
/// types; the per-type breakdown lives in `zikr_lifetime_totals`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub user_id: String,
    pub total_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A registered activity-type name.
///
/// `name` preserves first-seen casing; uniqueness is enforced on the
/// lowercased key in the database.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ZikrType {
    pub name: String,
    pub created_at: Timestamp,
}

/// Lifetime total for one activity type.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TypeTotal {
    pub zikr_type: String,
    pub total: i64,
}
