use crate::{
    counter::{next_sequence, USER_SEQUENCE},
    user::model::{ClaimGuard, DailyClaimUpdate, NewUser, User},
    Database,
};
use async_trait::async_trait;
use mongodb::{
    bson::{doc, Bson, Document},
    options::{FindOneAndUpdateOptions, ReturnDocument},
};
use std::sync::Arc;
use tracing::debug;
use utils::AppResult;
use validator::Validate;

pub type DynUserRepository = Arc<dyn UserRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait UserRepositoryTrait {
    async fn get_user(&self, id: i64) -> AppResult<Option<User>>;

    // 账号初始化时创建用户(不对外暴露接口)
    async fn create_user(&self, user: NewUser) -> AppResult<User>;

    async fn count_users(&self) -> AppResult<u64>;

    /// Compare-and-set for a daily claim. Returns the updated user, or
    /// `None` when the user is gone or no longer matches `guard`.
    async fn apply_daily_claim(&self, id: i64, guard: ClaimGuard, update: DailyClaimUpdate)
        -> AppResult<Option<User>>;
}

/// Matches the user only while it still looks the way `guard` saw it.
///
/// `User` fills a missing `current_streak` with 0 and a missing
/// `last_claim_date` with `None`, so those defaults must match absent
/// fields too. `null` already matches a missing field in MongoDB.
pub(crate) fn claim_guard_filter(id: i64, guard: ClaimGuard) -> Document {
    let streak = match guard.current_streak {
        0 => Bson::Document(doc! { "$in": [0_i64, Bson::Null] }),
        n => Bson::Int64(n as i64),
    };

    doc! {
        "_id": id,
        "current_streak": streak,
        "last_claim_date": guard.last_claim_date.map(|d| d.to_string()),
    }
}

#[async_trait]
impl UserRepositoryTrait for Database {
    async fn get_user(&self, id: i64) -> AppResult<Option<User>> {
        let user = self.users.find_one(doc! { "_id": id }, None).await?;

        Ok(user)
    }

    async fn create_user(&self, user: NewUser) -> AppResult<User> {
        user.validate()?;

        let id = next_sequence(&self.counters, USER_SEQUENCE).await?;

        let new_doc = User {
            id,
            name: user.name,
            role: user.role,
            coins: user.coins,
            gems: user.gems,
            current_streak: user.current_streak,
            last_claim_date: None,
        };

        self.users.insert_one(&new_doc, None).await?;

        Ok(new_doc)
    }

    async fn count_users(&self) -> AppResult<u64> {
        let count = self.users.count_documents(None, None).await?;

        Ok(count)
    }

    async fn apply_daily_claim(
        &self,
        id: i64,
        guard: ClaimGuard,
        update: DailyClaimUpdate,
    ) -> AppResult<Option<User>> {
        let filter = claim_guard_filter(id, guard);
        let change = doc! {
            "$inc": { "coins": update.coins },
            "$set": {
                "current_streak": update.current_streak as i64,
                "last_claim_date": update.claimed_on.to_string(),
            },
        };
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let user = self.users.find_one_and_update(filter, change, options).await?;
        if user.is_none() {
            debug!("daily claim guard missed for user {}", id);
        }

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn fresh_guard_also_matches_documents_without_streak_fields() {
        let filter = claim_guard_filter(
            3,
            ClaimGuard {
                current_streak: 0,
                last_claim_date: None,
            },
        );

        assert_eq!(
            filter,
            doc! { "_id": 3_i64, "current_streak": { "$in": [0_i64, Bson::Null] }, "last_claim_date": Bson::Null }
        );
    }

    #[test]
    fn running_streak_is_matched_exactly() {
        let filter = claim_guard_filter(
            1,
            ClaimGuard {
                current_streak: 5,
                last_claim_date: NaiveDate::from_ymd_opt(2024, 7, 1),
            },
        );

        assert_eq!(filter.get_i64("current_streak").unwrap(), 5);
        assert_eq!(filter.get_str("last_claim_date").unwrap(), "2024-07-01");
    }
}
