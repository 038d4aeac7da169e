use crate::{
    dtos::{
        bonus_dto::{BonusClaimResponse, BonusListResponse},
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

#[utoipa::path(
    get,
    path = "/bonus/{id}",
    tag = "bonus",
    params(
        ("id" = i64, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "Bonus catalog with today's claim state", body = BonusListResponse),
        (status = 404, description = "Unknown user", body = ErrorResponse)
    )
)]
pub async fn list_bonuses(
    Extension(services): Extension<Services>,
    PathExtractor(id): PathExtractor<i64>,
) -> AppResult<Json<BonusListResponse>> {
    let bonuses = services.bonus.list_bonuses(id, services.clock.today()).await?;

    Ok(Json(BonusListResponse {
        user_id: id,
        bonuses: bonuses.into_iter().map(Into::into).collect(),
    }))
}

/// 领取一次性奖励 (watch_ad, share_app, rate_app)
#[utoipa::path(
    post,
    path = "/bonus/{id}/{bonus_type}",
    tag = "bonus",
    params(
        ("id" = i64, Path, description = "User id"),
        ("bonus_type" = String, Path, description = "Bonus name, e.g. watch_ad")
    ),
    responses(
        (status = 200, description = "Bonus credited", body = BonusClaimResponse),
        (status = 400, description = "Bonus already claimed today", body = ErrorResponse),
        (status = 404, description = "Unknown user or bonus", body = ErrorResponse)
    )
)]
pub async fn claim_bonus(
    Extension(services): Extension<Services>,
    PathExtractor((id, bonus_type)): PathExtractor<(i64, String)>,
) -> AppResult<Json<BonusClaimResponse>> {
    let claimed = services
        .bonus
        .claim_bonus(id, &bonus_type, services.clock.today())
        .await?;

    Ok(Json(claimed.into()))
}

pub struct BonusController;
impl BonusController {
    pub fn app() -> Router {
        Router::new()
            .route("/bonus/:id", get(list_bonuses))
            .route("/bonus/:id/:bonus_type", post(claim_bonus))
    }
}
