use chrono::{DateTime, NaiveDate, Utc};
use database::user::model::User;
use serde::{Deserialize, Serialize};
use utils::StreakPolicy;
use utoipa::ToSchema;

/// Top card of the rewards screen
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, ToSchema)]
pub struct UserSnapshotDto {
    pub id: i64,
    pub name: String,
    pub role: String,
    pub coins: i64,
    pub gems: i64,
    /// Streak the next claim builds on, already reset after a gap under `reset-on-gap`
    pub current_streak: u32,
    pub last_claim_date: Option<NaiveDate>,
    /// `HH:MM:SS` until the daily reward can be claimed, `00:00:00` if it already can
    pub next_reward_in: String,
}

impl UserSnapshotDto {
    pub fn from_user(user: User, now: DateTime<Utc>, streak_policy: StreakPolicy) -> Self {
        let today = now.date_naive();
        let current_streak = user.effective_streak(streak_policy, today);
        let next_reward_in = if user.has_claimed_on(today) {
            utils::until_next_day(now)
        } else {
            String::from("00:00:00")
        };

        Self {
            id: user.id,
            name: user.name,
            role: user.role,
            coins: user.coins,
            gems: user.gems,
            current_streak,
            last_claim_date: user.last_claim_date,
            next_reward_in,
        }
    }
}
