use crate::{
    dtos::{static_dto::ErrorResponse, user_dto::UserSnapshotDto},
    extractors::path_extractor::PathExtractor,
    services::{user_service::user_not_found, Services},
};
use axum::{routing::get, Extension, Json, Router};
use utils::AppResult;

/// 用户余额与连签快照
#[utoipa::path(
    get,
    path = "/user/{id}",
    tag = "user",
    params(
        ("id" = i64, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "Balance and streak snapshot", body = UserSnapshotDto),
        (status = 404, description = "Unknown user", body = ErrorResponse)
    )
)]
pub async fn get_user(
    Extension(services): Extension<Services>,
    PathExtractor(id): PathExtractor<i64>,
) -> AppResult<Json<UserSnapshotDto>> {
    match services.user.get_user(id).await? {
        Some(user) => Ok(Json(UserSnapshotDto::from_user(
            user,
            services.clock.now(),
            services.streak_policy,
        ))),
        None => Err(user_not_found(id)),
    }
}

pub struct UserController;
impl UserController {
    pub fn app() -> Router {
        Router::new().route("/user/:id", get(get_user))
    }
}
