//! Repositories for the zikr tables.
//!
//! Each repository is a unit struct with async methods taking a `&PgPool`.
//! Writes that must be race-safe (the daily upsert-increment, lifetime
//! total bumps, type registration) are single `ON CONFLICT` statements so
//! there is never a read-modify-write window.

mod daily_record_repo;
mod goal_repo;
mod streak_repo;
mod user_repo;

pub use daily_record_repo::DailyRecordRepo;
pub use goal_repo::GoalRepo;
pub use streak_repo::StreakRepo;
pub use user_repo::UserRepo;
