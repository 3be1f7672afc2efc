//! Periodic cleanup of old daily records.
//!
//! Spawns a background task that deletes rows from `zikr_daily_records`
//! older than the configured retention period. The lifetime ledger and the
//! users table keep the all-time totals, so purging old daily rows loses
//! chart history only. Runs on a fixed interval using `tokio::time::interval`.

use std::time::Duration;

use chrono::Utc;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;
use zikr_db::repositories::DailyRecordRepo;

/// How often the cleanup job runs.
const CLEANUP_INTERVAL: Duration = Duration::from_secs(24 * 3600); // daily

/// Run the daily-record retention cleanup loop.
///
/// Deletes daily rows older than `retention_days`. Runs until `cancel` is
/// triggered.
pub async fn run(pool: PgPool, retention_days: i64, cancel: CancellationToken) {
    tracing::info!(
        retention_days,
        interval_secs = CLEANUP_INTERVAL.as_secs(),
        "Daily-record retention job started"
    );

    let mut interval = tokio::time::interval(CLEANUP_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Daily-record retention job stopping");
                break;
            }
            _ = interval.tick() => {
                let cutoff = Utc::now() - chrono::Duration::days(retention_days);
                match DailyRecordRepo::delete_older_than(&pool, cutoff).await {
                    Ok(deleted) => {
                        if deleted > 0 {
                            tracing::info!(deleted, "Retention: purged old daily rows");
                        } else {
                            tracing::debug!("Retention: no rows to purge");
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Retention: cleanup failed");
                    }
                }
            }
        }
    }
}
