//! Streak row and conversion to the core state machine.

use serde::Serialize;
use sqlx::FromRow;
use zikr_core::streak::StreakState;
use zikr_core::types::Timestamp;

/// Per-user streak row, one per user, created lazily.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Streak {
    pub user_id: String,
    pub current_streak: i64,
    pub longest_streak: i64,
    pub last_completed_date: Option<Timestamp>,
    pub is_paused: bool,
    pub paused_at: Option<Timestamp>,
    pub paused_streak: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Streak {
    /// Lift the persisted row into the pure state machine.
    pub fn to_state(&self) -> StreakState {
        StreakState {
            current_streak: self.current_streak,
            longest_streak: self.longest_streak,
            last_completed_date: self.last_completed_date,
            is_paused: self.is_paused,
            paused_at: self.paused_at,
            paused_streak: self.paused_streak,
        }
    }
}
