//! Daily streak sweep.
//!
//! Increments drive the streak machine eagerly, but a user who simply
//! stops recording never triggers another update and their stale streak
//! would survive indefinitely. This task walks every known user once per
//! local day and evaluates the just-finished day, so missed days break
//! streaks even for absent users. Evaluating yesterday rather than the
//! fresh day keeps the one-day grace window open for users who only
//! missed a single day.
//!
//! The sweep uses the server's default timezone offset. Per-user offsets
//! are re-applied the next time the user makes a request, so a user in a
//! different zone is at worst swept a few hours early or late, which the
//! one-day grace window absorbs.

use std::time::Duration;

use chrono::{Duration as ChronoDuration, Utc};
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;
use zikr_core::timezone::local_midnight;
use zikr_core::types::Timestamp;
use zikr_db::repositories::UserRepo;

use crate::streaks;

/// How often the sweep wakes up to check for a day rollover.
const SWEEP_INTERVAL: Duration = Duration::from_secs(3600); // hourly

/// Run the daily streak sweep loop until `cancel` is triggered.
pub async fn run(pool: PgPool, offset_minutes: i32, cancel: CancellationToken) {
    tracing::info!(
        offset_minutes,
        interval_secs = SWEEP_INTERVAL.as_secs(),
        "Streak sweep job started"
    );

    let mut interval = tokio::time::interval(SWEEP_INTERVAL);
    let mut last_processed_day: Option<Timestamp> = None;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Streak sweep job stopping");
                break;
            }
            _ = interval.tick() => {
                let today = match local_midnight(Utc::now(), offset_minutes) {
                    Ok(day) => day,
                    Err(e) => {
                        tracing::error!(error = %e, "Streak sweep: bad configured offset");
                        continue;
                    }
                };
                if last_processed_day == Some(today) {
                    continue;
                }

                sweep_all(&pool, today - ChronoDuration::days(1)).await;
                last_processed_day = Some(today);
            }
        }
    }
}

/// Run the goal check for the given day for every known user. Per-user
/// failures are logged and skipped so one bad row cannot stall the sweep.
async fn sweep_all(pool: &PgPool, day: Timestamp) {
    let user_ids = match UserRepo::all_user_ids(pool).await {
        Ok(ids) => ids,
        Err(e) => {
            tracing::error!(error = %e, "Streak sweep: failed to list users");
            return;
        }
    };

    let mut processed = 0u64;
    let mut updated = 0u64;
    let mut broken = 0u64;

    for user_id in &user_ids {
        match streaks::evaluate_day(pool, user_id, day).await {
            Ok(check) => {
                processed += 1;
                if check.streak_changed {
                    updated += 1;
                    if check.streak.current_streak == 0 {
                        broken += 1;
                    }
                }
            }
            Err(e) => {
                tracing::warn!(user_id = %user_id, error = %e, "Streak sweep: user skipped");
            }
        }
    }

    tracing::info!(processed, updated, broken, "Streak sweep finished");
}
