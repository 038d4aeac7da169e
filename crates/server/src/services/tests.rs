use super::Services;
use chrono::NaiveDate;
use database::{
    reward::model::RewardTier,
    seed::seed_defaults,
    user::model::NewUser,
    Storage,
};
use utils::{AppError, StreakPolicy};

const DEMO_USER: i64 = 1;

fn day(n: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, 1).unwrap() + chrono::Duration::days(n as i64)
}

async fn setup(policy: StreakPolicy) -> (Services, Storage) {
    let storage = Storage::in_memory();
    seed_defaults(&storage, true).await.unwrap();

    (Services::new(storage.clone(), policy), storage)
}

async fn coins_of(storage: &Storage, id: i64) -> i64 {
    storage.users.get_user(id).await.unwrap().unwrap().coins
}

#[tokio::test]
async fn next_reward_follows_streak_and_is_idempotent() {
    let (services, storage) = setup(StreakPolicy::Continue).await;

    let first = services.reward.get_next_reward(DEMO_USER, day(0)).await.unwrap();
    let second = services.reward.get_next_reward(DEMO_USER, day(0)).await.unwrap();

    // demo user starts with streak 5
    assert_eq!(first.day_number, 6);
    assert_eq!(first.coins, 600);
    assert_eq!(first, second);
    assert_eq!(coins_of(&storage, DEMO_USER).await, 2450);
}

#[tokio::test]
async fn streak_five_claim_pays_day_six_then_rejects_same_day() {
    let (services, storage) = setup(StreakPolicy::Continue).await;

    let claim = services.reward.claim_daily_reward(DEMO_USER, day(0)).await.unwrap();
    assert_eq!(claim.day_number, 6);
    assert_eq!(claim.coins_added, 600);
    assert_eq!(claim.new_balance, 3050);
    assert_eq!(claim.current_streak, 6);

    let user = storage.users.get_user(DEMO_USER).await.unwrap().unwrap();
    assert_eq!(user.last_claim_date, Some(day(0)));

    let again = services.reward.claim_daily_reward(DEMO_USER, day(0)).await;
    assert!(matches!(again, Err(AppError::AlreadyClaimed(_))));
    assert_eq!(coins_of(&storage, DEMO_USER).await, 3050);
}

#[tokio::test]
async fn consecutive_days_walk_the_cycle() {
    let (services, storage) = setup(StreakPolicy::Continue).await;
    let user = storage.users.create_user(NewUser::named("fresh")).await.unwrap();

    let days = 10;
    let mut expected_coins = 0;
    for n in 0..days {
        let slot = RewardTier::slot_for_streak(n);
        expected_coins += 100 * slot as i64;

        let claim = services.reward.claim_daily_reward(user.id, day(n)).await.unwrap();
        assert_eq!(claim.day_number, slot);
        assert_eq!(claim.current_streak, n + 1);
    }

    let user = storage.users.get_user(user.id).await.unwrap().unwrap();
    assert_eq!(user.current_streak, days);
    // 100+..+700 then 100+200+300
    assert_eq!(user.coins, expected_coins);
    assert_eq!(user.coins, 3400);
}

#[tokio::test]
async fn gap_keeps_streak_by_default() {
    let (services, _) = setup(StreakPolicy::Continue).await;

    services.reward.claim_daily_reward(DEMO_USER, day(0)).await.unwrap();
    let claim = services.reward.claim_daily_reward(DEMO_USER, day(5)).await.unwrap();

    assert_eq!(claim.day_number, 7);
    assert_eq!(claim.current_streak, 7);
}

#[tokio::test]
async fn gap_resets_streak_when_configured() {
    let (services, _) = setup(StreakPolicy::ResetOnGap).await;

    services.reward.claim_daily_reward(DEMO_USER, day(0)).await.unwrap();
    // consecutive day still counts
    let next_day = services.reward.claim_daily_reward(DEMO_USER, day(1)).await.unwrap();
    assert_eq!(next_day.current_streak, 7);

    let preview = services.reward.get_next_reward(DEMO_USER, day(3)).await.unwrap();
    assert_eq!(preview.day_number, 1);

    let claim = services.reward.claim_daily_reward(DEMO_USER, day(3)).await.unwrap();
    assert_eq!(claim.day_number, 1);
    assert_eq!(claim.coins_added, 100);
    assert_eq!(claim.current_streak, 1);
}

#[tokio::test]
async fn never_claimed_user_is_not_a_gap() {
    let (services, _) = setup(StreakPolicy::ResetOnGap).await;

    let claim = services.reward.claim_daily_reward(DEMO_USER, day(0)).await.unwrap();

    assert_eq!(claim.current_streak, 6);
}

#[tokio::test]
async fn claim_after_a_later_claim_is_rejected() {
    let (services, _) = setup(StreakPolicy::Continue).await;

    services.reward.claim_daily_reward(DEMO_USER, day(2)).await.unwrap();
    let earlier = services.reward.claim_daily_reward(DEMO_USER, day(1)).await;

    assert!(matches!(earlier, Err(AppError::AlreadyClaimed(_))));
}

#[tokio::test]
async fn unknown_user_is_not_found() {
    let (services, _) = setup(StreakPolicy::Continue).await;

    assert!(matches!(
        services.reward.get_next_reward(42, day(0)).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        services.reward.claim_daily_reward(42, day(0)).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        services.bonus.claim_bonus(42, "watch_ad", day(0)).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_claims_pay_once() {
    let (services, storage) = setup(StreakPolicy::Continue).await;

    let attempts: Vec<_> = (0..16)
        .map(|_| {
            let services = services.clone();
            tokio::spawn(async move { services.reward.claim_daily_reward(DEMO_USER, day(0)).await })
        })
        .collect();

    let mut succeeded = 0;
    for attempt in attempts {
        match attempt.await.unwrap() {
            Ok(_) => succeeded += 1,
            Err(AppError::AlreadyClaimed(_)) => {}
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    assert_eq!(succeeded, 1);
    assert_eq!(coins_of(&storage, DEMO_USER).await, 3050);
}

#[tokio::test]
async fn unknown_bonus_changes_nothing() {
    let (services, storage) = setup(StreakPolicy::Continue).await;

    let result = services.bonus.claim_bonus(DEMO_USER, "spin_wheel", day(0)).await;

    assert!(matches!(result, Err(AppError::UnknownBonus(_))));
    assert_eq!(coins_of(&storage, DEMO_USER).await, 2450);
}

#[tokio::test]
async fn bonus_once_per_day() {
    let (services, storage) = setup(StreakPolicy::Continue).await;

    let claimed = services.bonus.claim_bonus(DEMO_USER, "share_app", day(0)).await.unwrap();
    assert_eq!(claimed.coins_added, 200);
    assert_eq!(claimed.new_balance, 2650);

    let again = services.bonus.claim_bonus(DEMO_USER, "share_app", day(0)).await;
    assert!(matches!(again, Err(AppError::AlreadyClaimed(_))));
    assert_eq!(coins_of(&storage, DEMO_USER).await, 2650);

    let next_day = services.bonus.claim_bonus(DEMO_USER, "share_app", day(1)).await.unwrap();
    assert_eq!(next_day.new_balance, 2850);
}

#[tokio::test]
async fn bonus_and_daily_reward_are_independent() {
    let (services, _) = setup(StreakPolicy::Continue).await;

    services.bonus.claim_bonus(DEMO_USER, "watch_ad", day(0)).await.unwrap();
    let claim = services.reward.claim_daily_reward(DEMO_USER, day(0)).await.unwrap();

    assert_eq!(claim.new_balance, 2450 + 100 + 600);
}

#[tokio::test]
async fn bonus_listing_marks_todays_claims() {
    let (services, _) = setup(StreakPolicy::Continue).await;

    services.bonus.claim_bonus(DEMO_USER, "rate_app", day(0)).await.unwrap();

    let today = services.bonus.list_bonuses(DEMO_USER, day(0)).await.unwrap();
    let flags: Vec<_> = today.iter().map(|b| (b.bonus_type.as_str(), b.claimed_today)).collect();
    assert_eq!(flags, [("watch_ad", false), ("share_app", false), ("rate_app", true)]);

    let tomorrow = services.bonus.list_bonuses(DEMO_USER, day(1)).await.unwrap();
    assert!(tomorrow.iter().all(|b| !b.claimed_today));
}

#[tokio::test]
async fn student_ids_are_assigned_by_storage() {
    let (services, _) = setup(StreakPolicy::Continue).await;

    let ada = services.student.create_student("Ada".into(), 20).await.unwrap();
    let bob = services.student.create_student("  Bob ".into(), 22).await.unwrap();

    assert_eq!((ada.id, bob.id), (1, 2));
    assert_eq!(bob.name, "Bob");
    assert_eq!(services.student.list_students().await.unwrap().len(), 2);
}

#[tokio::test]
async fn results_require_an_existing_student() {
    let (services, _) = setup(StreakPolicy::Continue).await;
    let ada = services.student.create_student("Ada".into(), 20).await.unwrap();

    let results = services
        .student
        .set_result(ada.id, "math".into(), "A".into())
        .await
        .unwrap();
    assert_eq!(results.len(), 1);

    assert!(matches!(
        services.student.set_result(99, "math".into(), "A".into()).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        services.student.list_results(99).await,
        Err(AppError::NotFound(_))
    ));
}
