use crate::services::reward_service::{DailyClaim, NextReward};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, ToSchema)]
pub struct NextRewardDto {
    pub day_number: u32,
    pub coins: i64,
    pub message: String,
}

impl From<NextReward> for NextRewardDto {
    fn from(reward: NextReward) -> Self {
        Self {
            day_number: reward.day_number,
            coins: reward.coins,
            message: format!("Claim {} coins for Day {}", reward.coins, reward.day_number),
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, ToSchema)]
pub struct ClaimRewardResponse {
    pub message: String,
    pub day_number: u32,
    pub coins_added: i64,
    pub new_balance: i64,
    pub current_streak: u32,
}

impl From<DailyClaim> for ClaimRewardResponse {
    fn from(claim: DailyClaim) -> Self {
        Self {
            message: String::from("Reward claimed successfully!"),
            day_number: claim.day_number,
            coins_added: claim.coins_added,
            new_balance: claim.new_balance,
            current_streak: claim.current_streak,
        }
    }
}
