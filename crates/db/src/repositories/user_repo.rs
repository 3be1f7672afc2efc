//! Repository for the `users`, `zikr_types`, and `zikr_lifetime_totals`
//! tables -- the lifetime totals ledger.

use sqlx::PgPool;
use zikr_core::zikr_type::{normalized_key, DEFAULT_ZIKR_TYPES};

use crate::models::user::{TypeTotal, User, ZikrType};

/// Column list for `users` queries.
const USER_COLUMNS: &str = "user_id, total_count, created_at, updated_at";

/// Denormalized running totals per user and per activity type.
///
/// Updated in the same logical operation as the daily upsert but in
/// separate statements; the two stores are allowed to drift and no
/// reconciliation happens here.
pub struct UserRepo;

impl UserRepo {
    /// Fetch the user row, creating it on first touch.
    ///
    /// New users are seeded with the default activity types. The insert is
    /// `ON CONFLICT DO NOTHING`, so two concurrent first requests race
    /// harmlessly: one creates, both read.
    pub async fn get_or_create(pool: &PgPool, user_id: &str) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (user_id) VALUES ($1) \
             ON CONFLICT (user_id) DO NOTHING \
             RETURNING {USER_COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, User>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;

        if let Some(user) = inserted {
            for name in DEFAULT_ZIKR_TYPES {
                Self::register_type(pool, user_id, name).await?;
            }
            tracing::info!(user_id, "Created user on first touch");
            return Ok(user);
        }

        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE user_id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Find a user without creating one.
    pub async fn find(pool: &PgPool, user_id: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE user_id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Every known user id. Drives the daily streak sweep.
    pub async fn all_user_ids(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<(String,)> = sqlx::query_as("SELECT user_id FROM users ORDER BY user_id")
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Register the name if new and return the canonical first-seen
    /// casing.
    ///
    /// All counter keys (lifetime totals, daily records) must go through
    /// this so "Zikr" and "zikr" land on the same row regardless of how
    /// the caller spelled the name this time.
    pub async fn resolve_type(
        pool: &PgPool,
        user_id: &str,
        name: &str,
    ) -> Result<String, sqlx::Error> {
        Self::register_type(pool, user_id, name).await?;
        let row: (String,) = sqlx::query_as(
            "SELECT name FROM zikr_types WHERE user_id = $1 AND name_lower = $2",
        )
        .bind(user_id)
        .bind(normalized_key(name))
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Apply one increment to the lifetime ledger: bump the user's global
    /// total and the per-type total under the canonical type casing,
    /// registering the type if new. Returns the new global total.
    pub async fn apply_increment(
        pool: &PgPool,
        user_id: &str,
        zikr_type: &str,
        amount: i64,
    ) -> Result<i64, sqlx::Error> {
        let zikr_type = Self::resolve_type(pool, user_id, zikr_type).await?;

        let row: (i64,) = sqlx::query_as(
            "UPDATE users SET total_count = total_count + $2, updated_at = now() \
             WHERE user_id = $1 \
             RETURNING total_count",
        )
        .bind(user_id)
        .bind(amount)
        .fetch_one(pool)
        .await?;

        sqlx::query(
            "INSERT INTO zikr_lifetime_totals (user_id, zikr_type, total) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (user_id, zikr_type) DO UPDATE SET \
                 total = zikr_lifetime_totals.total + EXCLUDED.total, \
                 updated_at = now()",
        )
        .bind(user_id)
        .bind(&zikr_type)
        .bind(amount)
        .execute(pool)
        .await?;

        Ok(row.0)
    }

    /// Register an activity-type name for the user.
    ///
    /// Membership is case-insensitive via the lowercased key; the supplied
    /// casing is stored when the name is new and kept canonical thereafter.
    pub async fn register_type(
        pool: &PgPool,
        user_id: &str,
        name: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO zikr_types (user_id, name, name_lower) \
             VALUES ($1, $2, $3) \
             ON CONFLICT ON CONSTRAINT uq_zikr_types_user_name DO NOTHING",
        )
        .bind(user_id)
        .bind(name)
        .bind(normalized_key(name))
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Known activity types in registration order.
    pub async fn list_types(pool: &PgPool, user_id: &str) -> Result<Vec<ZikrType>, sqlx::Error> {
        sqlx::query_as::<_, ZikrType>(
            "SELECT name, created_at FROM zikr_types \
             WHERE user_id = $1 \
             ORDER BY created_at, id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Lifetime per-type totals, largest first.
    pub async fn lifetime_totals(
        pool: &PgPool,
        user_id: &str,
    ) -> Result<Vec<TypeTotal>, sqlx::Error> {
        sqlx::query_as::<_, TypeTotal>(
            "SELECT zikr_type, total FROM zikr_lifetime_totals \
             WHERE user_id = $1 \
             ORDER BY total DESC, zikr_type",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
