//! Repository for the `zikr_daily_records` table.

use sqlx::PgPool;
use zikr_core::types::Timestamp;

use crate::models::daily_record::{DailyRecord, DayTotal};

/// Column list for `zikr_daily_records` queries.
const COLUMNS: &str = "user_id, local_day, zikr_type, count";

/// Day-bucketed aggregate store. One row per (user, local day, type).
pub struct DailyRecordRepo;

impl DailyRecordRepo {
    /// Atomically add `amount` to the (user, day, type) bucket, creating
    /// the row if absent.
    ///
    /// A single `INSERT ... ON CONFLICT DO UPDATE` so concurrent
    /// increments from the same user (rapid taps, batch entries) serialize
    /// inside the database; a create-path race can never surface as a
    /// uniqueness error.
    pub async fn upsert_increment(
        pool: &PgPool,
        user_id: &str,
        local_day: Timestamp,
        zikr_type: &str,
        amount: i64,
    ) -> Result<DailyRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO zikr_daily_records (user_id, local_day, zikr_type, count) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT ON CONSTRAINT uq_zikr_daily_records_user_day_type DO UPDATE SET \
                 count = zikr_daily_records.count + EXCLUDED.count, \
                 updated_at = now() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DailyRecord>(&query)
            .bind(user_id)
            .bind(local_day)
            .bind(zikr_type)
            .bind(amount)
            .fetch_one(pool)
            .await
    }

    /// All records for one local day, largest counts first.
    pub async fn records_for_day(
        pool: &PgPool,
        user_id: &str,
        local_day: Timestamp,
    ) -> Result<Vec<DailyRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM zikr_daily_records \
             WHERE user_id = $1 AND local_day = $2 \
             ORDER BY count DESC, zikr_type"
        );
        sqlx::query_as::<_, DailyRecord>(&query)
            .bind(user_id)
            .bind(local_day)
            .fetch_all(pool)
            .await
    }

    /// All records in the inclusive `[from, to]` day range, oldest first.
    pub async fn records_in_range(
        pool: &PgPool,
        user_id: &str,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<DailyRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM zikr_daily_records \
             WHERE user_id = $1 AND local_day >= $2 AND local_day <= $3 \
             ORDER BY local_day"
        );
        sqlx::query_as::<_, DailyRecord>(&query)
            .bind(user_id)
            .bind(from)
            .bind(to)
            .fetch_all(pool)
            .await
    }

    /// Sum of all counts for one local day across every activity type.
    pub async fn sum_for_day(
        pool: &PgPool,
        user_id: &str,
        local_day: Timestamp,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COALESCE(SUM(count), 0)::BIGINT FROM zikr_daily_records \
             WHERE user_id = $1 AND local_day = $2",
        )
        .bind(user_id)
        .bind(local_day)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Sum of all counts in the inclusive `[from, to]` day range.
    pub async fn sum_in_range(
        pool: &PgPool,
        user_id: &str,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COALESCE(SUM(count), 0)::BIGINT FROM zikr_daily_records \
             WHERE user_id = $1 AND local_day >= $2 AND local_day <= $3",
        )
        .bind(user_id)
        .bind(from)
        .bind(to)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// All-time best day: the local day with the highest summed total.
    /// Earliest day wins ties.
    pub async fn best_day(pool: &PgPool, user_id: &str) -> Result<Option<DayTotal>, sqlx::Error> {
        sqlx::query_as::<_, DayTotal>(
            "SELECT local_day, SUM(count)::BIGINT AS total FROM zikr_daily_records \
             WHERE user_id = $1 \
             GROUP BY local_day \
             ORDER BY total DESC, local_day \
             LIMIT 1",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }

    /// Delete records whose local day is strictly before `cutoff`.
    /// Returns the number of rows removed. Used by the retention job.
    pub async fn delete_older_than(pool: &PgPool, cutoff: Timestamp) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM zikr_daily_records WHERE local_day < $1")
            .bind(cutoff)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
