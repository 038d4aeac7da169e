use chrono::NaiveDate;
use database::{
    bonus_claim::repository::BonusClaimRepositoryTrait,
    counter::{next_sequence, USER_SEQUENCE},
    reward::{
        model::{BonusReward, RewardTier},
        repository::RewardRepositoryTrait,
    },
    student::repository::StudentRepositoryTrait,
    user::{
        model::{DailyClaimUpdate, NewUser},
        repository::UserRepositoryTrait,
    },
    Database,
};
use mongodb::bson::{doc, Document};
use std::sync::Arc;
use utils::{AppConfig, AppError};

/// MongoDB 仓储集成测试
///
/// 需要一个可用的 MongoDB (MONGO_URI)，默认忽略：
/// `cargo test -p database -- --ignored`

async fn fresh_database(name: &str) -> Database {
    let mut config = AppConfig::new_for_test();
    config.mongo_db = format!("{}_{}", config.mongo_db, name);

    let client = mongodb::Client::with_uri_str(&config.mongo_uri)
        .await
        .expect("Failed to connect to MongoDB");
    client
        .database(&config.mongo_db)
        .drop(None)
        .await
        .expect("Failed to drop test database");

    let db = Database::new(Arc::new(config)).await.expect("Failed to connect to database");
    db.init_indexes().await.expect("Failed to create indexes");
    db.seed_catalog(RewardTier::default_catalog(), BonusReward::default_catalog())
        .await
        .expect("Failed to seed catalogs");
    db
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, d).unwrap()
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "needs MongoDB"]
async fn sequences_start_at_one() {
    let db = fresh_database("sequences").await;

    assert_eq!(next_sequence(&db.counters, USER_SEQUENCE).await.unwrap(), 1);
    assert_eq!(next_sequence(&db.counters, USER_SEQUENCE).await.unwrap(), 2);

    let ada = db.create_student("Ada", 20).await.unwrap();
    let bob = db.create_student("Bob", 21).await.unwrap();
    assert_eq!((ada.id, bob.id), (1, 2));
    assert_eq!(db.list_students().await.unwrap().len(), 2);
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "needs MongoDB"]
async fn daily_claim_lands_once_per_guard() {
    let db = fresh_database("daily_claim").await;
    let user = db.create_user(NewUser::named("Jessica")).await.unwrap();
    let update = DailyClaimUpdate {
        coins: 100,
        current_streak: 1,
        claimed_on: day(1),
    };

    let updated = db.apply_daily_claim(user.id, user.guard(), update).await.unwrap().unwrap();
    assert_eq!(updated.coins, 100);
    assert_eq!(updated.last_claim_date, Some(day(1)));

    // stale guard from before the first claim
    assert!(db.apply_daily_claim(user.id, user.guard(), update).await.unwrap().is_none());
    assert_eq!(db.get_user(user.id).await.unwrap().unwrap().coins, 100);

    let next = DailyClaimUpdate {
        coins: 200,
        current_streak: 2,
        claimed_on: day(2),
    };
    let updated = db.apply_daily_claim(user.id, updated.guard(), next).await.unwrap().unwrap();
    assert_eq!((updated.coins, updated.current_streak), (300, 2));
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "needs MongoDB"]
async fn daily_claim_works_for_documents_without_streak_fields() {
    let db = fresh_database("partial_user").await;
    db.users
        .clone_with_type::<Document>()
        .insert_one(doc! { "_id": 3_i64, "name": "Sam" }, None)
        .await
        .unwrap();

    let user = db.get_user(3).await.unwrap().unwrap();
    assert_eq!((user.current_streak, user.last_claim_date), (0, None));

    let update = DailyClaimUpdate {
        coins: 100,
        current_streak: 1,
        claimed_on: day(1),
    };
    let updated = db.apply_daily_claim(3, user.guard(), update).await.unwrap();

    assert_eq!(updated.map(|u| (u.coins, u.current_streak)), Some((100, 1)));
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "needs MongoDB"]
async fn duplicate_bonus_is_already_claimed() {
    let db = fresh_database("bonus_duplicate").await;
    let user = db.create_user(NewUser::named("Jessica")).await.unwrap();

    let credited = db.claim_bonus(user.id, "watch_ad", day(1), 100).await.unwrap();
    assert_eq!(credited.coins, 100);

    let again = db.claim_bonus(user.id, "watch_ad", day(1), 100).await;
    assert!(matches!(again, Err(AppError::AlreadyClaimed(_))));
    assert_eq!(db.get_user(user.id).await.unwrap().unwrap().coins, 100);

    db.claim_bonus(user.id, "watch_ad", day(2), 100).await.unwrap();
    assert_eq!(db.list_claims_on(user.id, day(1)).await.unwrap().len(), 1);
    assert_eq!(db.get_user(user.id).await.unwrap().unwrap().coins, 200);
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "needs MongoDB"]
async fn bonus_for_missing_user_leaves_no_claim() {
    let db = fresh_database("bonus_missing_user").await;

    let result = db.claim_bonus(99, "share_app", day(1), 200).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
    assert!(db.list_claims_on(99, day(1)).await.unwrap().is_empty());
    // the removed claim does not block a later attempt
    let retry = db.claim_bonus(99, "share_app", day(1), 200).await;
    assert!(matches!(retry, Err(AppError::NotFound(_))));
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "needs MongoDB"]
async fn grades_are_upserted_per_subject() {
    let db = fresh_database("grades").await;
    let ada = db.create_student("Ada", 20).await.unwrap();

    db.set_result(ada.id, "math", "B").await.unwrap();
    db.set_result(ada.id, "math", "A").await.unwrap();
    db.set_result(ada.id, "art", "C").await.unwrap();

    let results = db.list_results(ada.id).await.unwrap();
    let pairs: Vec<_> = results.iter().map(|r| (r.subject.as_str(), r.grade.as_str())).collect();
    assert_eq!(pairs, [("art", "C"), ("math", "A")]);
}
