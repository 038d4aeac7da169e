use crate::{
    dtos::{
        reward_dto::{ClaimRewardResponse, NextRewardDto},
        static_dto::ErrorResponse,
    },
    extractors::path_extractor::PathExtractor,
    services::Services,
};
use axum::{
    routing::{get, post},
    Extension, Json, Router,
};
use utils::AppResult;

/// 查询下一次每日奖励
#[utoipa::path(
    get,
    path = "/daily-reward/{id}",
    tag = "reward",
    params(
        ("id" = i64, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "Tier due with the next claim", body = NextRewardDto),
        (status = 404, description = "Unknown user", body = ErrorResponse)
    )
)]
pub async fn get_daily_reward(
    Extension(services): Extension<Services>,
    PathExtractor(id): PathExtractor<i64>,
) -> AppResult<Json<NextRewardDto>> {
    let reward = services.reward.get_next_reward(id, services.clock.today()).await?;

    Ok(Json(reward.into()))
}

/// 领取每日奖励
#[utoipa::path(
    post,
    path = "/claim-reward/{id}",
    tag = "reward",
    params(
        ("id" = i64, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "Reward credited", body = ClaimRewardResponse),
        (status = 400, description = "Already claimed today", body = ErrorResponse),
        (status = 404, description = "Unknown user", body = ErrorResponse)
    )
)]
pub async fn claim_reward(
    Extension(services): Extension<Services>,
    PathExtractor(id): PathExtractor<i64>,
) -> AppResult<Json<ClaimRewardResponse>> {
    let claim = services.reward.claim_daily_reward(id, services.clock.today()).await?;

    Ok(Json(claim.into()))
}

pub struct RewardController;
impl RewardController {
    pub fn app() -> Router {
        Router::new()
            .route("/daily-reward/:id", get(get_daily_reward))
            .route("/claim-reward/:id", post(claim_reward))
    }
}
