//! Handlers for increments, the lifetime summary, and activity types.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use zikr_core::error::CoreError;
use zikr_core::timezone::local_midnight;
use zikr_core::types::Timestamp;
use zikr_core::zikr_type::canonical_name;
use zikr_db::models::streak::Streak;
use zikr_db::models::user::{TypeTotal, ZikrType};
use zikr_db::repositories::{DailyRecordRepo, UserRepo};

use crate::error::AppResult;
use crate::identity::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::streaks;

// ---------------------------------------------------------------------------
// Request DTOs
// ---------------------------------------------------------------------------

fn default_amount() -> i64 {
    1
}

/// DTO for a single increment.
#[derive(Debug, Deserialize)]
pub struct IncrementRequest {
    pub zikr_type: String,
    #[serde(default = "default_amount")]
    pub amount: i64,
    /// Event time; defaults to "now" when omitted.
    pub ts: Option<Timestamp>,
    /// Caller's UTC offset in minutes; falls back to the configured default.
    pub timezone_offset: Option<i32>,
}

/// One entry of a batch increment. Invalid entries are skipped, not
/// rejected, so a partially-bad batch still lands its good entries.
#[derive(Debug, Deserialize)]
pub struct BatchEntry {
    pub zikr_type: Option<String>,
    #[serde(default = "default_amount")]
    pub amount: i64,
    pub ts: Option<Timestamp>,
}

/// DTO for a batch increment.
#[derive(Debug, Deserialize)]
pub struct BatchIncrementRequest {
    pub increments: Vec<BatchEntry>,
    pub timezone_offset: Option<i32>,
}

/// DTO for registering an activity type.
#[derive(Debug, Deserialize)]
pub struct AddTypeRequest {
    pub name: String,
}

// ---------------------------------------------------------------------------
// Response DTOs
// ---------------------------------------------------------------------------

/// Updated totals, goal status, and streak returned after increments.
#[derive(Debug, Serialize)]
pub struct IncrementResponse {
    pub total_count: i64,
    pub per_type: Vec<TypeTotal>,
    pub today_total: i64,
    pub goal_met: bool,
    pub streak: Streak,
    /// Number of entries actually applied (equals 1 for single increments).
    pub applied: usize,
}

/// Lifetime totals ledger contents.
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub total_count: i64,
    pub per_type: Vec<TypeTotal>,
    pub types: Vec<ZikrType>,
}

// ---------------------------------------------------------------------------
// Increment endpoints
// ---------------------------------------------------------------------------

/// POST /api/v1/zikr/increment
///
/// Bucket the event into the caller's local day, atomically bump the
/// daily aggregate and the lifetime ledger, then run the goal check and
/// streak update.
pub async fn increment(
    AuthUser { user_id }: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<IncrementRequest>,
) -> AppResult<Json<DataResponse<IncrementResponse>>> {
    let zikr_type = canonical_name(&input.zikr_type)?;
    if input.amount <= 0 {
        return Err(CoreError::Validation("amount must be > 0".into()).into());
    }

    let offset = state.resolve_offset(input.timezone_offset);
    let local_day = local_midnight(input.ts.unwrap_or_else(Utc::now), offset)?;

    UserRepo::get_or_create(&state.pool, &user_id).await?;
    // Canonical casing so mixed-case spellings share one counter row.
    let zikr_type = UserRepo::resolve_type(&state.pool, &user_id, &zikr_type).await?;
    DailyRecordRepo::upsert_increment(&state.pool, &user_id, local_day, &zikr_type, input.amount)
        .await?;
    let total_count =
        UserRepo::apply_increment(&state.pool, &user_id, &zikr_type, input.amount).await?;

    let check = streaks::evaluate_today(&state.pool, &user_id, offset).await?;
    let per_type = UserRepo::lifetime_totals(&state.pool, &user_id).await?;

    tracing::debug!(
        user_id = %user_id,
        zikr_type = %zikr_type,
        amount = input.amount,
        today_total = check.today_total,
        goal_met = check.goal_met,
        "Applied increment"
    );

    Ok(Json(DataResponse {
        data: IncrementResponse {
            total_count,
            per_type,
            today_total: check.today_total,
            goal_met: check.goal_met,
            streak: check.streak,
            applied: 1,
        },
    }))
}

/// POST /api/v1/zikr/increment/batch
///
/// Apply a list of increments, then run a single combined goal check and
/// streak update. Entries with a missing type or non-positive amount are
/// skipped silently.
pub async fn increment_batch(
    AuthUser { user_id }: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<BatchIncrementRequest>,
) -> AppResult<Json<DataResponse<IncrementResponse>>> {
    if input.increments.is_empty() {
        return Err(CoreError::Validation("increments array required".into()).into());
    }

    let offset = state.resolve_offset(input.timezone_offset);
    UserRepo::get_or_create(&state.pool, &user_id).await?;

    let mut total_count = 0;
    let mut applied = 0;
    for entry in &input.increments {
        let Some(name) = entry.zikr_type.as_deref() else {
            continue;
        };
        let Ok(zikr_type) = canonical_name(name) else {
            continue;
        };
        if entry.amount <= 0 {
            continue;
        }
        let zikr_type = UserRepo::resolve_type(&state.pool, &user_id, &zikr_type).await?;

        let local_day = local_midnight(entry.ts.unwrap_or_else(Utc::now), offset)?;
        DailyRecordRepo::upsert_increment(
            &state.pool,
            &user_id,
            local_day,
            &zikr_type,
            entry.amount,
        )
        .await?;
        total_count =
            UserRepo::apply_increment(&state.pool, &user_id, &zikr_type, entry.amount).await?;
        applied += 1;
    }

    if applied == 0 {
        // Nothing usable in the batch; report the running total unchanged.
        total_count = UserRepo::get_or_create(&state.pool, &user_id).await?.total_count;
    }

    let check = streaks::evaluate_today(&state.pool, &user_id, offset).await?;
    let per_type = UserRepo::lifetime_totals(&state.pool, &user_id).await?;

    tracing::debug!(
        user_id = %user_id,
        applied,
        skipped = input.increments.len() - applied,
        "Applied batch increment"
    );

    Ok(Json(DataResponse {
        data: IncrementResponse {
            total_count,
            per_type,
            today_total: check.today_total,
            goal_met: check.goal_met,
            streak: check.streak,
            applied,
        },
    }))
}

// ---------------------------------------------------------------------------
// Summary & type endpoints
// ---------------------------------------------------------------------------

/// GET /api/v1/zikr/summary
///
/// Lifetime totals: global count, per-type totals sorted descending, and
/// the known activity types.
pub async fn summary(
    AuthUser { user_id }: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<SummaryResponse>>> {
    let user = UserRepo::get_or_create(&state.pool, &user_id).await?;
    let per_type = UserRepo::lifetime_totals(&state.pool, &user_id).await?;
    let types = UserRepo::list_types(&state.pool, &user_id).await?;

    Ok(Json(DataResponse {
        data: SummaryResponse {
            total_count: user.total_count,
            per_type,
            types,
        },
    }))
}

/// GET /api/v1/zikr/types
pub async fn list_types(
    AuthUser { user_id }: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ZikrType>>>> {
    UserRepo::get_or_create(&state.pool, &user_id).await?;
    let types = UserRepo::list_types(&state.pool, &user_id).await?;
    Ok(Json(DataResponse { data: types }))
}

/// POST /api/v1/zikr/types
///
/// Register an activity-type name. Case-insensitive duplicate names are
/// absorbed; the first-seen casing stays canonical.
pub async fn add_type(
    AuthUser { user_id }: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<AddTypeRequest>,
) -> AppResult<Json<DataResponse<Vec<ZikrType>>>> {
    let name = canonical_name(&input.name)?;

    UserRepo::get_or_create(&state.pool, &user_id).await?;
    UserRepo::register_type(&state.pool, &user_id, &name).await?;
    let types = UserRepo::list_types(&state.pool, &user_id).await?;

    Ok(Json(DataResponse { data: types }))
}
