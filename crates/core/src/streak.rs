//! Streak state machine.
//!
//! A streak counts consecutive local days on which the user's daily goal
//! was met, with a one-day grace window: exactly one missed day is
//! forgiven provided the goal is met on the following day. Pausing
//! freezes the streak entirely; while paused, time does not count against
//! the user.
//!
//! Transition function, given `days_diff = floor((today - last) / 1 day)`:
//!
//! | last_completed_date | days_diff | goal_met | effect                       |
//! |---------------------|-----------|----------|------------------------------|
//! | (paused)            | any       | any      | no-op                        |
//! | None                | --        | true     | streak = 1                   |
//! | None                | --        | false    | no-op                        |
//! | Some                | <= 0      | any      | no-op (already counted)      |
//! | Some                | 1         | true     | streak += 1                  |
//! | Some                | 1         | false    | no-op                        |
//! | Some                | 2         | true     | streak += 1 (grace)          |
//! | Some                | 2         | false    | reset to 0, last = None      |
//! | Some                | >= 3      | true     | streak = 1 (restart)         |
//! | Some                | >= 3      | false    | reset to 0, last = None      |

use serde::Serialize;

use crate::error::CoreError;
use crate::timezone::days_between;
use crate::types::Timestamp;

/// Mutable streak state for one user.
///
/// `longest_streak` is a high-water mark and never decreases.
/// `paused_streak` snapshots `current_streak` at pause time and is
/// restored verbatim on resume; `last_completed_date` is deliberately left
/// untouched across a pause/resume cycle, so the grace-window clock
/// resumes from wherever it was.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreakState {
    pub current_streak: i64,
    pub longest_streak: i64,
    pub last_completed_date: Option<Timestamp>,
    pub is_paused: bool,
    pub paused_at: Option<Timestamp>,
    pub paused_streak: i64,
}

impl Default for StreakState {
    fn default() -> Self {
        Self {
            current_streak: 0,
            longest_streak: 0,
            last_completed_date: None,
            is_paused: false,
            paused_at: None,
            paused_streak: 0,
        }
    }
}

/// Outcome of a single [`StreakState::update`] call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreakUpdate {
    pub streak_changed: bool,
    pub message: &'static str,
}

impl StreakUpdate {
    fn unchanged(message: &'static str) -> Self {
        Self {
            streak_changed: false,
            message,
        }
    }

    fn changed(message: &'static str) -> Self {
        Self {
            streak_changed: true,
            message,
        }
    }
}

impl StreakState {
    /// Consume a "goal met for today" observation and transition the state.
    ///
    /// `today` must be a local-midnight instant from
    /// [`crate::timezone::local_midnight`]. Safe to call repeatedly on the
    /// same day: after the first successful transition, further calls hit
    /// the `days_diff == 0` branch and are no-ops, which is what makes
    /// concurrent goal checks for the same user tolerable without locking.
    pub fn update(&mut self, today: Timestamp, goal_met: bool) -> StreakUpdate {
        if self.is_paused {
            return StreakUpdate::unchanged("Streak is paused");
        }

        let Some(last) = self.last_completed_date else {
            if goal_met {
                self.current_streak = 1;
                self.longest_streak = self.longest_streak.max(1);
                self.last_completed_date = Some(today);
                return StreakUpdate::changed("Streak started!");
            }
            return StreakUpdate::unchanged("Goal not met");
        };

        match days_between(last, today) {
            // Negative diffs happen when the observed day precedes the
            // last completed one (the daily sweep re-evaluating yesterday
            // after today's goal already counted). Never a reset.
            d if d <= 0 => StreakUpdate::unchanged("Already counted today"),
            1 => {
                if goal_met {
                    self.current_streak += 1;
                    self.longest_streak = self.longest_streak.max(self.current_streak);
                    self.last_completed_date = Some(today);
                    StreakUpdate::changed("Streak continued!")
                } else {
                    StreakUpdate::unchanged("Goal not met today")
                }
            }
            2 => {
                if goal_met {
                    // One missed day forgiven.
                    self.current_streak += 1;
                    self.longest_streak = self.longest_streak.max(self.current_streak);
                    self.last_completed_date = Some(today);
                    StreakUpdate::changed("Streak continued (1 day grace)")
                } else {
                    self.current_streak = 0;
                    self.last_completed_date = None;
                    StreakUpdate::changed("Streak reset (2 days missed)")
                }
            }
            _ => {
                if goal_met {
                    self.current_streak = 1;
                    self.longest_streak = self.longest_streak.max(1);
                    self.last_completed_date = Some(today);
                    StreakUpdate::changed("Streak restarted!")
                } else {
                    self.current_streak = 0;
                    self.last_completed_date = None;
                    StreakUpdate::changed("Streak reset")
                }
            }
        }
    }

    /// Freeze the streak. Fails if already paused.
    pub fn pause(&mut self, now: Timestamp) -> Result<&'static str, CoreError> {
        if self.is_paused {
            return Err(CoreError::Conflict("Already paused".into()));
        }
        self.is_paused = true;
        self.paused_at = Some(now);
        self.paused_streak = self.current_streak;
        Ok("Streak paused")
    }

    /// Unfreeze the streak, restoring the snapshotted value exactly.
    /// Fails if not paused.
    ///
    /// `last_completed_date` is NOT reset here: the grace window picks up
    /// from where it was before the pause.
    pub fn resume(&mut self) -> Result<&'static str, CoreError> {
        if !self.is_paused {
            return Err(CoreError::Conflict("Not paused".into()));
        }
        self.is_paused = false;
        self.current_streak = self.paused_streak;
        self.paused_at = None;
        self.paused_streak = 0;
        Ok("Streak resumed")
    }
}
