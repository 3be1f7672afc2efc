//! Shared goal-check + streak-update sequence.
//!
//! Every write path (single increment, batch increment, explicit
//! `/streak/check`) ends with the same sequence: resolve today's local
//! day, sum today's records, lazily load the goal, feed the boolean into
//! the streak machine, and persist only if something changed. Extracted
//! here so the handlers and the daily sweep stay in lockstep.

use chrono::Utc;
use serde::Serialize;
use zikr_core::goal;
use zikr_core::timezone::local_midnight;
use zikr_core::types::Timestamp;
use zikr_db::models::streak::Streak;
use zikr_db::repositories::{DailyRecordRepo, GoalRepo, StreakRepo};
use zikr_db::DbPool;

use crate::error::AppResult;

/// Result of a goal-check-and-streak-update pass.
#[derive(Debug, Serialize)]
pub struct StreakCheck {
    pub today_total: i64,
    pub goal_met: bool,
    pub streak: Streak,
    pub streak_changed: bool,
    pub message: &'static str,
}

/// Evaluate today's aggregate against the user's goal and drive the
/// streak machine.
///
/// Concurrent calls for the same user and day are tolerated: after the
/// first successful transition the machine hits its "Already counted
/// today" branch and the state is not written again.
pub async fn evaluate_today(
    pool: &DbPool,
    user_id: &str,
    offset_minutes: i32,
) -> AppResult<StreakCheck> {
    let today = local_midnight(Utc::now(), offset_minutes)?;
    evaluate_day(pool, user_id, today).await
}

/// Evaluate one local day's aggregate against the user's goal. The sweep
/// passes yesterday here; evaluating the just-finished day keeps the
/// grace window intact for users who merely missed a single day.
pub async fn evaluate_day(
    pool: &DbPool,
    user_id: &str,
    today: Timestamp,
) -> AppResult<StreakCheck> {
    let today_total = DailyRecordRepo::sum_for_day(pool, user_id, today).await?;
    let goal = GoalRepo::get_or_create(pool, user_id).await?;
    let goal_met = goal::is_met(today_total, goal.daily_target);

    let row = StreakRepo::get_or_create(pool, user_id).await?;
    let mut state = row.to_state();
    let update = state.update(today, goal_met);

    let streak = if update.streak_changed {
        StreakRepo::save(pool, user_id, &state).await?
    } else {
        row
    };

    Ok(StreakCheck {
        today_total,
        goal_met,
        streak,
        streak_changed: update.streak_changed,
        message: update.message,
    })
}
