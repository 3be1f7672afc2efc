//! Integration tests for the daily accounting repositories.

use chrono::{Duration, TimeZone, Utc};
use sqlx::PgPool;
use zikr_core::goal;
use zikr_core::types::Timestamp;
use zikr_db::repositories::{DailyRecordRepo, GoalRepo, StreakRepo, UserRepo};

const USER: &str = "firebase-uid-test-1";

fn midnight(n: i64) -> Timestamp {
    // Dhaka local midnights (18:00 UTC).
    Utc.with_ymd_and_hms(2025, 3, 1, 18, 0, 0).unwrap() + Duration::days(n)
}

#[sqlx::test(migrations = "./migrations")]
async fn upsert_increment_is_associative(pool: PgPool) {
    UserRepo::get_or_create(&pool, USER).await.unwrap();

    // [3, 2] applied sequentially equals [5] applied once.
    DailyRecordRepo::upsert_increment(&pool, USER, midnight(0), "SubhanAllah", 3)
        .await
        .unwrap();
    let after_two = DailyRecordRepo::upsert_increment(&pool, USER, midnight(0), "SubhanAllah", 2)
        .await
        .unwrap();
    assert_eq!(after_two.count, 5);

    let single = DailyRecordRepo::upsert_increment(&pool, USER, midnight(1), "SubhanAllah", 5)
        .await
        .unwrap();
    assert_eq!(single.count, after_two.count);
}

#[sqlx::test(migrations = "./migrations")]
async fn one_row_per_user_day_type(pool: PgPool) {
    UserRepo::get_or_create(&pool, USER).await.unwrap();

    DailyRecordRepo::upsert_increment(&pool, USER, midnight(0), "SubhanAllah", 1)
        .await
        .unwrap();
    DailyRecordRepo::upsert_increment(&pool, USER, midnight(0), "SubhanAllah", 1)
        .await
        .unwrap();

    let records = DailyRecordRepo::records_for_day(&pool, USER, midnight(0))
        .await
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].count, 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn two_types_meet_goal_and_start_streak(pool: PgPool) {
    // Scenario: 3x SubhanAllah + 2x Alhamdulillah with a target of 5.
    UserRepo::get_or_create(&pool, USER).await.unwrap();
    GoalRepo::set_target(&pool, USER, 5).await.unwrap();

    let today = midnight(0);
    DailyRecordRepo::upsert_increment(&pool, USER, today, "SubhanAllah", 3)
        .await
        .unwrap();
    DailyRecordRepo::upsert_increment(&pool, USER, today, "Alhamdulillah", 2)
        .await
        .unwrap();

    let total = DailyRecordRepo::sum_for_day(&pool, USER, today).await.unwrap();
    let target = GoalRepo::get_or_create(&pool, USER).await.unwrap().daily_target;
    assert!(goal::is_met(total, target));

    let streak = StreakRepo::get_or_create(&pool, USER).await.unwrap();
    let mut state = streak.to_state();
    let update = state.update(today, true);
    assert!(update.streak_changed);
    let saved = StreakRepo::save(&pool, USER, &state).await.unwrap();
    assert_eq!(saved.current_streak, 1);
    assert_eq!(saved.last_completed_date, Some(today));
}

#[sqlx::test(migrations = "./migrations")]
async fn lifetime_ledger_tracks_totals_and_types(pool: PgPool) {
    UserRepo::get_or_create(&pool, USER).await.unwrap();

    let total = UserRepo::apply_increment(&pool, USER, "SubhanAllah", 3)
        .await
        .unwrap();
    assert_eq!(total, 3);
    let total = UserRepo::apply_increment(&pool, USER, "Astaghfirullah", 2)
        .await
        .unwrap();
    assert_eq!(total, 5);

    let per_type = UserRepo::lifetime_totals(&pool, USER).await.unwrap();
    assert_eq!(per_type[0].zikr_type, "SubhanAllah");
    assert_eq!(per_type[0].total, 3);

    // The new type was registered alongside the four defaults.
    let types = UserRepo::list_types(&pool, USER).await.unwrap();
    assert_eq!(types.len(), 5);
    assert!(types.iter().any(|t| t.name == "Astaghfirullah"));
}

#[sqlx::test(migrations = "./migrations")]
async fn type_registration_is_case_insensitive_but_case_preserving(pool: PgPool) {
    UserRepo::get_or_create(&pool, USER).await.unwrap();

    UserRepo::register_type(&pool, USER, "Astaghfirullah").await.unwrap();
    UserRepo::register_type(&pool, USER, "astaghfirullah").await.unwrap();
    UserRepo::register_type(&pool, USER, "ASTAGHFIRULLAH ").await.unwrap();

    let types = UserRepo::list_types(&pool, USER).await.unwrap();
    let matches: Vec<_> = types
        .iter()
        .filter(|t| t.name.eq_ignore_ascii_case("astaghfirullah"))
        .collect();
    assert_eq!(matches.len(), 1);
    // First-seen casing preserved.
    assert_eq!(matches[0].name, "Astaghfirullah");
}

#[sqlx::test(migrations = "./migrations")]
async fn mixed_case_increments_share_one_counter_row(pool: PgPool) {
    UserRepo::get_or_create(&pool, USER).await.unwrap();

    // First-seen casing becomes canonical for every later spelling.
    assert_eq!(
        UserRepo::resolve_type(&pool, USER, "Zikr").await.unwrap(),
        "Zikr"
    );
    assert_eq!(
        UserRepo::resolve_type(&pool, USER, "zikr").await.unwrap(),
        "Zikr"
    );
    assert_eq!(
        UserRepo::resolve_type(&pool, USER, " ZIKR").await.unwrap(),
        "Zikr"
    );

    UserRepo::apply_increment(&pool, USER, "Zikr", 3).await.unwrap();
    UserRepo::apply_increment(&pool, USER, "zikr", 2).await.unwrap();

    let per_type = UserRepo::lifetime_totals(&pool, USER).await.unwrap();
    let rows: Vec<_> = per_type
        .iter()
        .filter(|t| t.zikr_type.eq_ignore_ascii_case("zikr"))
        .collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].zikr_type, "Zikr");
    assert_eq!(rows[0].total, 5);

    // Daily records keyed through the same resolution collapse too.
    for spelling in ["Zikr", "zikr"] {
        let name = UserRepo::resolve_type(&pool, USER, spelling).await.unwrap();
        DailyRecordRepo::upsert_increment(&pool, USER, midnight(0), &name, 1)
            .await
            .unwrap();
    }
    let records = DailyRecordRepo::records_for_day(&pool, USER, midnight(0))
        .await
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].zikr_type, "Zikr");
    assert_eq!(records[0].count, 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn best_day_is_max_aggregation(pool: PgPool) {
    UserRepo::get_or_create(&pool, USER).await.unwrap();

    DailyRecordRepo::upsert_increment(&pool, USER, midnight(0), "SubhanAllah", 10)
        .await
        .unwrap();
    DailyRecordRepo::upsert_increment(&pool, USER, midnight(1), "SubhanAllah", 30)
        .await
        .unwrap();
    DailyRecordRepo::upsert_increment(&pool, USER, midnight(1), "Alhamdulillah", 15)
        .await
        .unwrap();

    let best = DailyRecordRepo::best_day(&pool, USER).await.unwrap().unwrap();
    assert_eq!(best.local_day, midnight(1));
    assert_eq!(best.total, 45);
}

#[sqlx::test(migrations = "./migrations")]
async fn retention_deletes_only_old_records(pool: PgPool) {
    UserRepo::get_or_create(&pool, USER).await.unwrap();

    DailyRecordRepo::upsert_increment(&pool, USER, midnight(0), "SubhanAllah", 1)
        .await
        .unwrap();
    DailyRecordRepo::upsert_increment(&pool, USER, midnight(10), "SubhanAllah", 1)
        .await
        .unwrap();

    let deleted = DailyRecordRepo::delete_older_than(&pool, midnight(10))
        .await
        .unwrap();
    assert_eq!(deleted, 1);

    let remaining = DailyRecordRepo::records_in_range(&pool, USER, midnight(0), midnight(10))
        .await
        .unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].local_day, midnight(10));
}

#[sqlx::test(migrations = "./migrations")]
async fn goal_created_lazily_with_default_target(pool: PgPool) {
    UserRepo::get_or_create(&pool, USER).await.unwrap();

    assert!(GoalRepo::find(&pool, USER).await.unwrap().is_none());
    let created = GoalRepo::get_or_create(&pool, USER).await.unwrap();
    assert_eq!(created.daily_target, goal::DEFAULT_DAILY_TARGET);
    assert!(created.is_active);

    // Second read returns the same row, not a new default.
    GoalRepo::set_target(&pool, USER, 33).await.unwrap();
    let again = GoalRepo::get_or_create(&pool, USER).await.unwrap();
    assert_eq!(again.daily_target, 33);
}
