use crate::{
    reward::model::{BonusReward, RewardTier},
    Database,
};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::FindOptions};
use std::sync::Arc;
use tracing::info;
use utils::AppResult;

pub type DynRewardRepository = Arc<dyn RewardRepositoryTrait + Send + Sync>;

/// Read access to the static reward catalogs.
#[async_trait]
pub trait RewardRepositoryTrait {
    async fn get_tier(&self, day_number: u32) -> AppResult<Option<RewardTier>>;

    async fn get_bonus(&self, bonus_type: &str) -> AppResult<Option<BonusReward>>;

    async fn list_bonuses(&self) -> AppResult<Vec<BonusReward>>;

    /// Writes each catalog only if it is empty. Returns the number of
    /// records inserted.
    async fn seed_catalog(&self, tiers: Vec<RewardTier>, bonuses: Vec<BonusReward>) -> AppResult<usize>;
}

#[async_trait]
impl RewardRepositoryTrait for Database {
    async fn get_tier(&self, day_number: u32) -> AppResult<Option<RewardTier>> {
        let tier = self
            .reward_tiers
            .find_one(doc! { "_id": day_number as i64 }, None)
            .await?;

        Ok(tier)
    }

    async fn get_bonus(&self, bonus_type: &str) -> AppResult<Option<BonusReward>> {
        let bonus = self.bonus_rewards.find_one(doc! { "_id": bonus_type }, None).await?;

        Ok(bonus)
    }

    async fn list_bonuses(&self) -> AppResult<Vec<BonusReward>> {
        let options = FindOptions::builder().sort(doc! { "coins": 1 }).build();
        let bonuses = self.bonus_rewards.find(None, options).await?.try_collect().await?;

        Ok(bonuses)
    }

    async fn seed_catalog(&self, tiers: Vec<RewardTier>, bonuses: Vec<BonusReward>) -> AppResult<usize> {
        let mut inserted = 0;

        if self.reward_tiers.count_documents(None, None).await? == 0 && !tiers.is_empty() {
            inserted += self.reward_tiers.insert_many(tiers, None).await?.inserted_ids.len();
        }

        if self.bonus_rewards.count_documents(None, None).await? == 0 && !bonuses.is_empty() {
            inserted += self.bonus_rewards.insert_many(bonuses, None).await?.inserted_ids.len();
        }

        if inserted > 0 {
            info!("🌱 seeded {} reward catalog entries", inserted);
        }

        Ok(inserted)
    }
}
