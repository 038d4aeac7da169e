use crate::services::bonus_service::{BonusClaimed, BonusStatus};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, ToSchema)]
pub struct BonusClaimResponse {
    pub message: String,
    pub bonus_type: String,
    pub coins_added: i64,
    pub new_balance: i64,
}

impl From<BonusClaimed> for BonusClaimResponse {
    fn from(claimed: BonusClaimed) -> Self {
        Self {
            message: format!("Bonus '{}' claimed!", claimed.bonus_type),
            bonus_type: claimed.bonus_type,
            coins_added: claimed.coins_added,
            new_balance: claimed.new_balance,
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, ToSchema)]
pub struct BonusStatusDto {
    pub bonus_type: String,
    pub coins: i64,
    pub claimed_today: bool,
}

impl From<BonusStatus> for BonusStatusDto {
    fn from(status: BonusStatus) -> Self {
        Self {
            bonus_type: status.bonus_type,
            coins: status.coins,
            claimed_today: status.claimed_today,
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, ToSchema)]
pub struct BonusListResponse {
    pub user_id: i64,
    pub bonuses: Vec<BonusStatusDto>,
}
