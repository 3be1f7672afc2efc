//! Row models for the zikr tables.
//!
//! Each struct derives `FromRow` for sqlx and `Serialize` where it is
//! returned through the API unchanged.

pub mod daily_record;
pub mod goal;
pub mod streak;
pub mod user;
