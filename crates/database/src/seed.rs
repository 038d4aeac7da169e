use crate::{
    reward::model::{BonusReward, RewardTier},
    user::model::NewUser,
    Storage,
};
use tracing::info;
use utils::AppResult;

/// The account the demo front end shows on its top card.
pub fn demo_user() -> NewUser {
    NewUser {
        name: "Jessica Parker".to_string(),
        role: "Realist".to_string(),
        coins: 2450,
        gems: 12,
        current_streak: 5,
    }
}

/// Writes the reward catalogs when they are empty and, if asked, the
/// demo user when there are no users yet. Safe to run on every start.
pub async fn seed_defaults(storage: &Storage, seed_demo_user: bool) -> AppResult<()> {
    storage
        .rewards
        .seed_catalog(RewardTier::default_catalog(), BonusReward::default_catalog())
        .await?;

    if seed_demo_user && storage.users.count_users().await? == 0 {
        let user = storage.users.create_user(demo_user()).await?;
        info!("🌱 seeded demo user {} (id {})", user.name, user.id);
    }

    Ok(())
}
