use crate::services::user_service::{require_user, user_not_found};
use async_trait::async_trait;
use chrono::NaiveDate;
use database::{
    reward::{model::RewardTier, repository::DynRewardRepository},
    user::{
        model::DailyClaimUpdate,
        repository::DynUserRepository,
    },
};
use std::sync::Arc;
use tracing::{info, warn};
use utils::{AppError, AppResult, StreakPolicy};

pub type DynRewardService = Arc<dyn RewardServiceTrait + Send + Sync>;

/// The tier a user would receive with the next daily claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextReward {
    pub day_number: u32,
    pub coins: i64,
}

/// Outcome of a successful daily claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyClaim {
    pub day_number: u32,
    pub coins_added: i64,
    pub new_balance: i64,
    pub current_streak: u32,
}

#[async_trait]
pub trait RewardServiceTrait {
    /// Pure read, calling it any number of times changes nothing.
    async fn get_next_reward(&self, user_id: i64, today: NaiveDate) -> AppResult<NextReward>;

    async fn claim_daily_reward(&self, user_id: i64, today: NaiveDate) -> AppResult<DailyClaim>;
}

#[derive(Clone)]
pub struct RewardService {
    users: DynUserRepository,
    rewards: DynRewardRepository,
    streak_policy: StreakPolicy,
}

pub(crate) fn already_claimed_today() -> AppError {
    AppError::AlreadyClaimed("You already claimed today's reward".to_string())
}

impl RewardService {
    pub fn new(users: DynUserRepository, rewards: DynRewardRepository, streak_policy: StreakPolicy) -> Self {
        Self {
            users,
            rewards,
            streak_policy,
        }
    }

    async fn tier_for_streak(&self, streak: u32) -> AppResult<RewardTier> {
        let day_number = RewardTier::slot_for_streak(streak);

        self.rewards.get_tier(day_number).await?.ok_or_else(|| {
            AppError::InternalServerErrorWithContext(format!("reward tier for day {} is not configured", day_number))
        })
    }
}

#[async_trait]
impl RewardServiceTrait for RewardService {
    async fn get_next_reward(&self, user_id: i64, today: NaiveDate) -> AppResult<NextReward> {
        let user = require_user(&self.users, user_id).await?;
        let tier = self.tier_for_streak(user.effective_streak(self.streak_policy, today)).await?;

        Ok(NextReward {
            day_number: tier.day_number,
            coins: tier.coins,
        })
    }

    async fn claim_daily_reward(&self, user_id: i64, today: NaiveDate) -> AppResult<DailyClaim> {
        let user = require_user(&self.users, user_id).await?;

        if user.has_claimed_on(today) {
            return Err(already_claimed_today());
        }

        let streak = user.effective_streak(self.streak_policy, today);
        if streak < user.current_streak {
            info!("🔁 user {} missed a day, streak {} reset", user_id, user.current_streak);
        }

        let tier = self.tier_for_streak(streak).await?;
        let update = DailyClaimUpdate {
            coins: tier.coins,
            current_streak: streak.saturating_add(1),
            claimed_on: today,
        };

        match self.users.apply_daily_claim(user_id, user.guard(), update).await? {
            Some(updated) => {
                info!(
                    "🎁 user {} claimed day {} reward: +{} coins, streak {}",
                    user_id, tier.day_number, tier.coins, updated.current_streak
                );

                Ok(DailyClaim {
                    day_number: tier.day_number,
                    coins_added: tier.coins,
                    new_balance: updated.coins,
                    current_streak: updated.current_streak,
                })
            }
            // Someone else changed the user between our read and write.
            None => match self.users.get_user(user_id).await? {
                None => Err(user_not_found(user_id)),
                Some(current) if current.has_claimed_on(today) => Err(already_claimed_today()),
                Some(_) => {
                    warn!("🟡 daily claim for user {} lost a concurrent update", user_id);
                    Err(AppError::Conflict(
                        "The user was updated concurrently, please retry.".to_string(),
                    ))
                }
            },
        }
    }
}
