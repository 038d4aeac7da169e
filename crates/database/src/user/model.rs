use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utils::StreakPolicy;
use utoipa::ToSchema;
use validator::Validate;

pub const DEFAULT_ROLE: &str = "Realist";

fn default_role() -> String {
    DEFAULT_ROLE.to_string()
}

/// 用户模型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Storage-assigned numeric id
    #[serde(rename = "_id")]
    pub id: i64,
    pub name: String,
    /// Display only
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default)]
    pub coins: i64,
    #[serde(default)]
    pub gems: i64,
    /// Consecutive daily claims
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default)]
    pub last_claim_date: Option<NaiveDate>,
}

impl User {
    /// `true` once the daily reward for `day` (or a later day) was taken.
    pub fn has_claimed_on(&self, day: NaiveDate) -> bool {
        self.last_claim_date.is_some_and(|last| last >= day)
    }

    /// Streak the next claim builds on. Under `ResetOnGap` a skipped
    /// calendar day drops it to zero.
    pub fn effective_streak(&self, policy: StreakPolicy, today: NaiveDate) -> u32 {
        match (policy, self.last_claim_date) {
            (StreakPolicy::ResetOnGap, Some(last)) if (today - last).num_days() > 1 => 0,
            _ => self.current_streak,
        }
    }

    pub fn guard(&self) -> ClaimGuard {
        ClaimGuard {
            current_streak: self.current_streak,
            last_claim_date: self.last_claim_date,
        }
    }
}

/// Fields for a user created at account setup.
#[derive(Debug, Clone, Validate)]
pub struct NewUser {
    #[validate(length(min = 1, max = 80))]
    pub name: String,
    pub role: String,
    pub coins: i64,
    pub gems: i64,
    pub current_streak: u32,
}

impl NewUser {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: default_role(),
            coins: 0,
            gems: 0,
            current_streak: 0,
        }
    }
}

/// The values a daily claim read before deciding; the write only lands
/// if the stored user still matches them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimGuard {
    pub current_streak: u32,
    pub last_claim_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyClaimUpdate {
    /// Added to the balance
    pub coins: i64,
    /// Replaces the stored streak
    pub current_streak: u32,
    pub claimed_on: NaiveDate,
}

impl DailyClaimUpdate {
    pub fn apply_to(&self, user: &mut User) {
        user.coins += self.coins;
        user.current_streak = self.current_streak;
        user.last_claim_date = Some(self.claimed_on);
    }
}
