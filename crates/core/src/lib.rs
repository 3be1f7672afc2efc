//! Pure domain logic for the zikr tracking service.
//!
//! Everything in this crate is I/O-free: timezone bucketing, the streak
//! state machine, goal evaluation, analytics rollup math, and activity-type
//! name normalization. Persistence lives in `zikr-db`, the HTTP surface in
//! `zikr-api`.

pub mod analytics;
pub mod error;
pub mod goal;
pub mod streak;
pub mod timezone;
pub mod types;
pub mod zikr_type;
