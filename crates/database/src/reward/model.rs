use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Number of slots before the daily cycle starts over at day 1.
pub const CYCLE_LENGTH: u32 = 7;

/// 每日奖励档位 (day 1..=7)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RewardTier {
    #[serde(rename = "_id")]
    pub day_number: u32,
    pub coins: i64,
}

impl RewardTier {
    /// Slot due for a user who has already claimed `streak` times.
    pub fn slot_for_streak(streak: u32) -> u32 {
        (streak % CYCLE_LENGTH) + 1
    }

    /// Day *n* pays `100 * n` coins.
    pub fn default_catalog() -> Vec<RewardTier> {
        (1..=CYCLE_LENGTH)
            .map(|day_number| RewardTier {
                day_number,
                coins: 100 * day_number as i64,
            })
            .collect()
    }
}

/// 一次性奖励 (watch_ad, share_app, rate_app)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BonusReward {
    #[serde(rename = "_id")]
    pub bonus_type: String,
    pub coins: i64,
}

impl BonusReward {
    pub fn default_catalog() -> Vec<BonusReward> {
        [("watch_ad", 100), ("share_app", 200), ("rate_app", 300)]
            .into_iter()
            .map(|(bonus_type, coins)| BonusReward {
                bonus_type: bonus_type.to_string(),
                coins,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_cycles_after_day_seven() {
        assert_eq!(RewardTier::slot_for_streak(0), 1);
        assert_eq!(RewardTier::slot_for_streak(5), 6);
        assert_eq!(RewardTier::slot_for_streak(6), 7);
        assert_eq!(RewardTier::slot_for_streak(7), 1);
        assert_eq!(RewardTier::slot_for_streak(15), 2);
        assert_eq!(RewardTier::slot_for_streak(u32::MAX), (u32::MAX % 7) + 1);
    }

    #[test]
    fn default_tiers_pay_hundred_per_day() {
        let tiers = RewardTier::default_catalog();
        assert_eq!(tiers.len(), 7);
        assert_eq!(tiers[0], RewardTier { day_number: 1, coins: 100 });
        assert_eq!(tiers[5], RewardTier { day_number: 6, coins: 600 });
        assert_eq!(tiers.iter().map(|t| t.coins).sum::<i64>(), 2800);
    }

    #[test]
    fn default_bonuses() {
        let bonuses = BonusReward::default_catalog();
        let names: Vec<_> = bonuses.iter().map(|b| b.bonus_type.as_str()).collect();
        assert_eq!(names, ["watch_ad", "share_app", "rate_app"]);
        assert_eq!(bonuses[2].coins, 300);
    }
}
