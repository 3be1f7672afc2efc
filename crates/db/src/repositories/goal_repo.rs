//! Repository for the `zikr_goals` table.

use sqlx::PgPool;
use zikr_core::goal::DEFAULT_DAILY_TARGET;

use crate::models::goal::Goal;

/// Column list for `zikr_goals` queries.
const COLUMNS: &str = "user_id, daily_target, is_active, created_at, updated_at";

/// Per-user daily targets, created lazily with the default on first read.
pub struct GoalRepo;

impl GoalRepo {
    /// Fetch the user's goal, creating one with the default target on
    /// first access (get-or-default-and-persist).
    pub async fn get_or_create(pool: &PgPool, user_id: &str) -> Result<Goal, sqlx::Error> {
        let query = format!(
            "INSERT INTO zikr_goals (user_id, daily_target) VALUES ($1, $2) \
             ON CONFLICT (user_id) DO NOTHING \
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, Goal>(&query)
            .bind(user_id)
            .bind(DEFAULT_DAILY_TARGET)
            .fetch_optional(pool)
            .await?;

        if let Some(goal) = inserted {
            return Ok(goal);
        }

        let query = format!("SELECT {COLUMNS} FROM zikr_goals WHERE user_id = $1");
        sqlx::query_as::<_, Goal>(&query)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Find without creating.
    pub async fn find(pool: &PgPool, user_id: &str) -> Result<Option<Goal>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM zikr_goals WHERE user_id = $1");
        sqlx::query_as::<_, Goal>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Set (upsert) the daily target. Updating re-activates the goal.
    /// Target validity (`>= 1`) is checked by the caller against the core
    /// rules before this runs.
    pub async fn set_target(
        pool: &PgPool,
        user_id: &str,
        daily_target: i64,
    ) -> Result<Goal, sqlx::Error> {
        let query = format!(
            "INSERT INTO zikr_goals (user_id, daily_target) VALUES ($1, $2) \
             ON CONFLICT (user_id) DO UPDATE SET \
                 daily_target = EXCLUDED.daily_target, \
                 is_active = TRUE, \
                 updated_at = now() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Goal>(&query)
            .bind(user_id)
            .bind(daily_target)
            .fetch_one(pool)
            .await
    }
}
