//! Handlers for goals, streaks, and the analytics read side.

use axum::extract::{Query, State};
use axum::Json;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use zikr_core::analytics::{build_series, percent_change, series_stats, trend, DayPoint, SeriesStats};
use zikr_core::error::CoreError;
use zikr_core::goal;
use zikr_core::timezone::{local_day_string, local_midnight};
use zikr_db::models::goal::Goal;
use zikr_db::models::streak::Streak;
use zikr_db::models::user::TypeTotal;
use zikr_db::repositories::{DailyRecordRepo, GoalRepo, StreakRepo, UserRepo};

use crate::error::AppResult;
use crate::identity::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::streaks::{self, StreakCheck};

/// Longest chart window served, in days.
const MAX_ANALYTICS_DAYS: i64 = 366;

fn default_days() -> i64 {
    7
}

fn validate_days(days: i64) -> Result<(), CoreError> {
    if !(1..=MAX_ANALYTICS_DAYS).contains(&days) {
        return Err(CoreError::Validation(format!(
            "days must be between 1 and {MAX_ANALYTICS_DAYS}, got {days}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Goal endpoints
// ---------------------------------------------------------------------------

/// DTO for setting the daily target.
#[derive(Debug, Deserialize)]
pub struct SetGoalRequest {
    pub daily_target: i64,
}

/// GET /api/v1/goal
///
/// Returns the user's goal, creating one with the default target on first
/// access.
pub async fn get_goal(
    AuthUser { user_id }: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Goal>>> {
    UserRepo::get_or_create(&state.pool, &user_id).await?;
    let goal = GoalRepo::get_or_create(&state.pool, &user_id).await?;
    Ok(Json(DataResponse { data: goal }))
}

/// POST /api/v1/goal
pub async fn set_goal(
    AuthUser { user_id }: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<SetGoalRequest>,
) -> AppResult<Json<DataResponse<Goal>>> {
    goal::validate_target(input.daily_target)?;

    UserRepo::get_or_create(&state.pool, &user_id).await?;
    let goal = GoalRepo::set_target(&state.pool, &user_id, input.daily_target).await?;

    tracing::info!(user_id = %user_id, daily_target = input.daily_target, "Daily goal updated");

    Ok(Json(DataResponse { data: goal }))
}

// ---------------------------------------------------------------------------
// Streak endpoints
// ---------------------------------------------------------------------------

/// Streak plus the message from the last transition attempt.
#[derive(Debug, Serialize)]
pub struct StreakActionResponse {
    pub message: &'static str,
    pub streak: Streak,
}

/// GET /api/v1/streak
pub async fn get_streak(
    AuthUser { user_id }: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Streak>>> {
    UserRepo::get_or_create(&state.pool, &user_id).await?;
    let streak = StreakRepo::get_or_create(&state.pool, &user_id).await?;
    Ok(Json(DataResponse { data: streak }))
}

/// POST /api/v1/streak/pause
///
/// Freeze the streak: snapshots the current value and stops both goal
/// evaluation and the grace-window clock. 409 if already paused.
pub async fn pause_streak(
    AuthUser { user_id }: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<StreakActionResponse>>> {
    UserRepo::get_or_create(&state.pool, &user_id).await?;
    let row = StreakRepo::get_or_create(&state.pool, &user_id).await?;

    let mut streak_state = row.to_state();
    let message = streak_state.pause(Utc::now())?;
    let streak = StreakRepo::save(&state.pool, &user_id, &streak_state).await?;

    tracing::info!(user_id = %user_id, paused_streak = streak.paused_streak, "Streak paused");

    Ok(Json(DataResponse {
        data: StreakActionResponse { message, streak },
    }))
}

/// POST /api/v1/streak/resume
///
/// Restore the snapshotted streak verbatim. 404 if the streak was never
/// created, 409 if not paused. The last-completed date is deliberately
/// left untouched.
pub async fn resume_streak(
    AuthUser { user_id }: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<StreakActionResponse>>> {
    let row = StreakRepo::find(&state.pool, &user_id)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            entity: "streak",
            user_id: user_id.clone(),
        })?;

    let mut streak_state = row.to_state();
    let message = streak_state.resume()?;
    let streak = StreakRepo::save(&state.pool, &user_id, &streak_state).await?;

    tracing::info!(user_id = %user_id, current_streak = streak.current_streak, "Streak resumed");

    Ok(Json(DataResponse {
        data: StreakActionResponse { message, streak },
    }))
}

/// Query for the explicit streak check.
#[derive(Debug, Deserialize)]
pub struct CheckStreakQuery {
    pub timezone_offset: Option<i32>,
}

/// POST /api/v1/streak/check
///
/// Run the goal check and streak update for today without recording an
/// increment. Idempotent within a day.
pub async fn check_streak(
    AuthUser { user_id }: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<CheckStreakQuery>,
) -> AppResult<Json<DataResponse<StreakCheck>>> {
    let offset = state.resolve_offset(query.timezone_offset);
    UserRepo::get_or_create(&state.pool, &user_id).await?;
    let check = streaks::evaluate_today(&state.pool, &user_id, offset).await?;
    Ok(Json(DataResponse { data: check }))
}

// ---------------------------------------------------------------------------
// Analytics endpoints
// ---------------------------------------------------------------------------

/// Query for the chart endpoint.
#[derive(Debug, Deserialize)]
pub struct AnalyticsQuery {
    #[serde(default = "default_days")]
    pub days: i64,
    pub timezone_offset: Option<i32>,
}

/// The covered date range, rendered in the caller's local calendar.
#[derive(Debug, Serialize)]
pub struct Period {
    pub days: i64,
    pub start_date: String,
    pub end_date: String,
}

/// Today's slice of the chart.
#[derive(Debug, Serialize)]
pub struct TodaySummary {
    pub total: i64,
    pub goal_met: bool,
    pub per_type: Vec<TypeTotal>,
}

/// All-time rollups.
#[derive(Debug, Serialize)]
pub struct AllTimeSummary {
    pub total_count: i64,
    pub best_day: Option<BestDay>,
}

/// The single highest-total day on record.
#[derive(Debug, Serialize)]
pub struct BestDay {
    pub date: String,
    pub count: i64,
}

/// Full analytics payload: chart series, stats, today, goal, streak, and
/// all-time rollups.
#[derive(Debug, Serialize)]
pub struct AnalyticsResponse {
    pub period: Period,
    pub chart_data: Vec<DayPoint>,
    pub stats: SeriesStats,
    pub today: TodaySummary,
    pub goal: Goal,
    pub streak: Streak,
    pub all_time: AllTimeSummary,
    pub per_type: Vec<TypeTotal>,
}

/// GET /api/v1/analytics?days=N&timezone_offset=M
///
/// Read-only: scans the daily store and the lifetime ledger, never
/// mutates counters or streak state (the goal and streak rows are lazily
/// created so the snapshot is always complete).
pub async fn analytics(
    AuthUser { user_id }: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<AnalyticsQuery>,
) -> AppResult<Json<DataResponse<AnalyticsResponse>>> {
    validate_days(query.days)?;
    let offset = state.resolve_offset(query.timezone_offset);

    let today = local_midnight(Utc::now(), offset)?;
    let start = today - Duration::days(query.days - 1);

    let user = UserRepo::get_or_create(&state.pool, &user_id).await?;

    let records = DailyRecordRepo::records_in_range(&state.pool, &user_id, start, today).await?;
    let entries: Vec<_> = records.into_iter().map(Into::into).collect();
    let chart_data = build_series(&entries, start, query.days, offset);
    let stats = series_stats(&chart_data);

    let today_records = DailyRecordRepo::records_for_day(&state.pool, &user_id, today).await?;
    let today_total: i64 = today_records.iter().map(|r| r.count).sum();
    let today_per_type = today_records
        .into_iter()
        .map(|r| TypeTotal {
            zikr_type: r.zikr_type,
            total: r.count,
        })
        .collect();

    let goal = GoalRepo::get_or_create(&state.pool, &user_id).await?;
    let streak = StreakRepo::get_or_create(&state.pool, &user_id).await?;

    let best_day = DailyRecordRepo::best_day(&state.pool, &user_id)
        .await?
        .map(|d| BestDay {
            date: local_day_string(d.local_day, offset),
            count: d.total,
        });
    let per_type = UserRepo::lifetime_totals(&state.pool, &user_id).await?;

    Ok(Json(DataResponse {
        data: AnalyticsResponse {
            period: Period {
                days: query.days,
                start_date: local_day_string(start, offset),
                end_date: local_day_string(today, offset),
            },
            chart_data,
            stats,
            today: TodaySummary {
                total: today_total,
                goal_met: goal::is_met(today_total, goal.daily_target),
                per_type: today_per_type,
            },
            goal,
            streak,
            all_time: AllTimeSummary {
                total_count: user.total_count,
                best_day,
            },
            per_type,
        },
    }))
}

/// Totals for one side of the comparison.
#[derive(Debug, Serialize)]
pub struct PeriodTotal {
    pub total: i64,
    pub start_date: String,
    pub end_date: String,
}

/// Current period vs the immediately preceding one.
#[derive(Debug, Serialize)]
pub struct CompareResponse {
    pub current: PeriodTotal,
    pub previous: PeriodTotal,
    pub difference: i64,
    pub percent_change: f64,
    pub trend: &'static str,
}

/// GET /api/v1/analytics/compare?days=N&timezone_offset=M
///
/// Compares the trailing `days`-day window against the window before it.
/// `percent_change` is 0 when the prior period is empty.
pub async fn compare(
    AuthUser { user_id }: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<AnalyticsQuery>,
) -> AppResult<Json<DataResponse<CompareResponse>>> {
    validate_days(query.days)?;
    let offset = state.resolve_offset(query.timezone_offset);

    let today = local_midnight(Utc::now(), offset)?;
    let period_start = today - Duration::days(query.days - 1);
    let previous_end = period_start - Duration::days(1);
    let previous_start = previous_end - Duration::days(query.days - 1);

    let current_total =
        DailyRecordRepo::sum_in_range(&state.pool, &user_id, period_start, today).await?;
    let previous_total =
        DailyRecordRepo::sum_in_range(&state.pool, &user_id, previous_start, previous_end).await?;

    let difference = current_total - previous_total;

    Ok(Json(DataResponse {
        data: CompareResponse {
            current: PeriodTotal {
                total: current_total,
                start_date: local_day_string(period_start, offset),
                end_date: local_day_string(today, offset),
            },
            previous: PeriodTotal {
                total: previous_total,
                start_date: local_day_string(previous_start, offset),
                end_date: local_day_string(previous_end, offset),
            },
            difference,
            percent_change: percent_change(current_total, previous_total),
            trend: trend(difference),
        },
    }))
}
