//! Request handlers.
//!
//! Handlers delegate to the repositories in `zikr_db` and the pure logic
//! in `zikr_core`, and map errors via [`crate::error::AppError`].

pub mod analytics;
pub mod zikr;
