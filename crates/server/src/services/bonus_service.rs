use crate::services::user_service::require_user;
use async_trait::async_trait;
use chrono::NaiveDate;
use database::{
    bonus_claim::repository::DynBonusClaimRepository, reward::repository::DynRewardRepository,
    user::repository::DynUserRepository,
};
use std::{collections::HashSet, sync::Arc};
use tracing::info;
use utils::{AppError, AppResult};

pub type DynBonusService = Arc<dyn BonusServiceTrait + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BonusClaimed {
    pub bonus_type: String,
    pub coins_added: i64,
    pub new_balance: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BonusStatus {
    pub bonus_type: String,
    pub coins: i64,
    pub claimed_today: bool,
}

#[async_trait]
pub trait BonusServiceTrait {
    async fn claim_bonus(&self, user_id: i64, bonus_type: &str, today: NaiveDate) -> AppResult<BonusClaimed>;

    async fn list_bonuses(&self, user_id: i64, today: NaiveDate) -> AppResult<Vec<BonusStatus>>;
}

#[derive(Clone)]
pub struct BonusService {
    users: DynUserRepository,
    rewards: DynRewardRepository,
    claims: DynBonusClaimRepository,
}

impl BonusService {
    pub fn new(users: DynUserRepository, rewards: DynRewardRepository, claims: DynBonusClaimRepository) -> Self {
        Self { users, rewards, claims }
    }
}

#[async_trait]
impl BonusServiceTrait for BonusService {
    async fn claim_bonus(&self, user_id: i64, bonus_type: &str, today: NaiveDate) -> AppResult<BonusClaimed> {
        require_user(&self.users, user_id).await?;

        let bonus = self
            .rewards
            .get_bonus(bonus_type)
            .await?
            .ok_or_else(|| AppError::UnknownBonus(format!("Invalid bonus type '{}'", bonus_type)))?;

        // The repository re-checks this atomically; the claim itself is
        // what guarantees once per day.
        let user = self.claims.claim_bonus(user_id, &bonus.bonus_type, today, bonus.coins).await?;

        info!("🎉 user {} claimed bonus {}: +{} coins", user_id, bonus.bonus_type, bonus.coins);

        Ok(BonusClaimed {
            bonus_type: bonus.bonus_type,
            coins_added: bonus.coins,
            new_balance: user.coins,
        })
    }

    async fn list_bonuses(&self, user_id: i64, today: NaiveDate) -> AppResult<Vec<BonusStatus>> {
        require_user(&self.users, user_id).await?;

        let claimed: HashSet<String> = self
            .claims
            .list_claims_on(user_id, today)
            .await?
            .into_iter()
            .map(|claim| claim.bonus_type)
            .collect();

        let bonuses = self
            .rewards
            .list_bonuses()
            .await?
            .into_iter()
            .map(|bonus| BonusStatus {
                claimed_today: claimed.contains(&bonus.bonus_type),
                bonus_type: bonus.bonus_type,
                coins: bonus.coins,
            })
            .collect();

        Ok(bonuses)
    }
}
