//! Daily aggregate row.

use serde::Serialize;
use sqlx::FromRow;
use zikr_core::analytics::DailyEntry;
use zikr_core::types::Timestamp;

/// Cumulative count for one (user, local day, activity type).
///
/// `local_day` is a local-midnight instant in UTC; `count` only ever grows
/// through the atomic upsert-increment.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DailyRecord {
    pub user_id: String,
    pub local_day: Timestamp,
    pub zikr_type: String,
    pub count: i64,
}

impl From<DailyRecord> for DailyEntry {
    fn from(record: DailyRecord) -> Self {
        DailyEntry {
            local_day: record.local_day,
            zikr_type: record.zikr_type,
            count: record.count,
        }
    }
}

/// One row of the best-day aggregation: a local day and its summed total.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DayTotal {
    pub local_day: Timestamp,
    pub total: i64,
}
