//! Daily goal evaluation.

use crate::error::CoreError;

/// Target assigned when a user first touches their goal.
pub const DEFAULT_DAILY_TARGET: i64 = 100;

/// A goal target must be at least one repetition.
pub fn validate_target(daily_target: i64) -> Result<(), CoreError> {
    if daily_target < 1 {
        return Err(CoreError::Validation(
            "dailyTarget must be at least 1".into(),
        ));
    }
    Ok(())
}

/// A day is complete when its aggregate count reaches the target.
pub fn is_met(day_total: i64, daily_target: i64) -> bool {
    day_total >= daily_target
}
