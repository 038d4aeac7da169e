use async_trait::async_trait;
use database::user::{model::User, repository::DynUserRepository};
use std::sync::Arc;
use utils::{AppError, AppResult};

pub type DynUserService = Arc<dyn UserServiceTrait + Send + Sync>;

#[async_trait]
pub trait UserServiceTrait {
    async fn get_user(&self, id: i64) -> AppResult<Option<User>>;
}

#[derive(Clone)]
pub struct UserService {
    repository: DynUserRepository,
}

impl UserService {
    pub fn new(repository: DynUserRepository) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl UserServiceTrait for UserService {
    async fn get_user(&self, id: i64) -> AppResult<Option<User>> {
        let user = self.repository.get_user(id).await?;

        Ok(user)
    }
}

pub(crate) fn user_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("User with id {} not found.", id))
}

/// Loads a user or fails with `NotFound`.
pub(crate) async fn require_user(repository: &DynUserRepository, id: i64) -> AppResult<User> {
    repository.get_user(id).await?.ok_or_else(|| user_not_found(id))
}
