use crate::{bonus_claim::model::BonusClaim, user::model::User, Database};
use async_trait::async_trait;
use chrono::NaiveDate;
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    error::{ErrorKind, WriteFailure},
    options::{FindOneAndUpdateOptions, ReturnDocument},
};
use std::sync::Arc;
use tracing::{error, warn};
use utils::{AppError, AppResult};

pub type DynBonusClaimRepository = Arc<dyn BonusClaimRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait BonusClaimRepositoryTrait {
    async fn list_claims_on(&self, user_id: i64, day: NaiveDate) -> AppResult<Vec<BonusClaim>>;

    /// Records the claim and credits `coins` as one unit.
    ///
    /// Fails with `AlreadyClaimed` when the user already has this bonus
    /// for `day`, and with `NotFound` when the user does not exist. In
    /// both cases nothing is written.
    async fn claim_bonus(&self, user_id: i64, bonus_type: &str, day: NaiveDate, coins: i64) -> AppResult<User>;
}

pub(crate) fn already_claimed(bonus_type: &str) -> AppError {
    AppError::AlreadyClaimed(format!("You already claimed {} bonus today", bonus_type))
}

pub(crate) fn user_not_found(user_id: i64) -> AppError {
    AppError::NotFound(format!("User with id {} not found.", user_id))
}

fn is_duplicate_key(e: &mongodb::error::Error) -> bool {
    matches!(
        e.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == 11000
    )
}

#[async_trait]
impl BonusClaimRepositoryTrait for Database {
    async fn list_claims_on(&self, user_id: i64, day: NaiveDate) -> AppResult<Vec<BonusClaim>> {
        let filter = doc! { "user_id": user_id, "claimed_date": day.to_string() };
        let claims = self.bonus_claims.find(filter, None).await?.try_collect().await?;

        Ok(claims)
    }

    async fn claim_bonus(&self, user_id: i64, bonus_type: &str, day: NaiveDate, coins: i64) -> AppResult<User> {
        // The unique (user_id, bonus_type, claimed_date) index makes this
        // insert the once-per-day lock.
        let inserted = match self
            .bonus_claims
            .insert_one(BonusClaim::new(user_id, bonus_type, day), None)
            .await
        {
            Ok(result) => result.inserted_id,
            Err(e) if is_duplicate_key(&e) => return Err(already_claimed(bonus_type)),
            Err(e) => return Err(e.into()),
        };

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();
        let credited = self
            .users
            .find_one_and_update(doc! { "_id": user_id }, doc! { "$inc": { "coins": coins } }, options)
            .await;

        match credited {
            Ok(Some(user)) => Ok(user),
            Ok(None) => {
                self.bonus_claims.delete_one(doc! { "_id": inserted }, None).await?;
                warn!("🟡 bonus {} claimed for missing user {}, claim removed", bonus_type, user_id);
                Err(user_not_found(user_id))
            }
            Err(e) => {
                if let Err(rollback) = self.bonus_claims.delete_one(doc! { "_id": inserted }, None).await {
                    error!(
                        "❌ failed to roll back bonus claim {} for user {}: {}",
                        bonus_type, user_id, rollback
                    );
                }
                Err(e.into())
            }
        }
    }
}
