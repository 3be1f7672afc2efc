//! Repository for the `zikr_streaks` table.
//!
//! The transition logic itself lives in `zikr_core::streak`; this module
//! only loads rows into [`StreakState`] and writes the result back.

use sqlx::PgPool;
use zikr_core::streak::StreakState;

use crate::models::streak::Streak;

/// Column list for `zikr_streaks` queries.
const COLUMNS: &str = "user_id, current_streak, longest_streak, last_completed_date, \
                       is_paused, paused_at, paused_streak, created_at, updated_at";

/// One streak row per user, created lazily.
pub struct StreakRepo;

impl StreakRepo {
    /// Fetch the user's streak, creating a fresh one on first access.
    pub async fn get_or_create(pool: &PgPool, user_id: &str) -> Result<Streak, sqlx::Error> {
        let query = format!(
            "INSERT INTO zikr_streaks (user_id) VALUES ($1) \
             ON CONFLICT (user_id) DO NOTHING \
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, Streak>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;

        if let Some(streak) = inserted {
            return Ok(streak);
        }

        let query = format!("SELECT {COLUMNS} FROM zikr_streaks WHERE user_id = $1");
        sqlx::query_as::<_, Streak>(&query)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Find without creating. Resume uses this: resuming a streak that was
    /// never created is an error, not an auto-heal.
    pub async fn find(pool: &PgPool, user_id: &str) -> Result<Option<Streak>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM zikr_streaks WHERE user_id = $1");
        sqlx::query_as::<_, Streak>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Persist a post-transition state for the user.
    pub async fn save(
        pool: &PgPool,
        user_id: &str,
        state: &StreakState,
    ) -> Result<Streak, sqlx::Error> {
        let query = format!(
            "UPDATE zikr_streaks SET \
                 current_streak = $2, \
                 longest_streak = $3, \
                 last_completed_date = $4, \
                 is_paused = $5, \
                 paused_at = $6, \
                 paused_streak = $7, \
                 updated_at = now() \
             WHERE user_id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Streak>(&query)
            .bind(user_id)
            .bind(state.current_streak)
            .bind(state.longest_streak)
            .bind(state.last_completed_date)
            .bind(state.is_paused)
            .bind(state.paused_at)
            .bind(state.paused_streak)
            .fetch_one(pool)
            .await
    }
}
