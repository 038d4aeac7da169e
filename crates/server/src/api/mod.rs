pub mod bonus_controller;
pub mod reward_controller;
pub mod student_controller;
pub mod user_controller;

use crate::dtos::static_dto::IndexResponse;
use axum::{routing::get, Json, Router};

/// 系统健康检查
///
/// Service banner plus the public routes.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is running", body = IndexResponse)
    ),
    tag = "system"
)]
pub async fn index() -> Json<IndexResponse> {
    Json(IndexResponse {
        message: String::from("Daily Rewards API is running 🚀"),
        routes: [
            "/user/<user_id>",
            "/daily-reward/<user_id>",
            "/claim-reward/<user_id>",
            "/bonus/<user_id>",
            "/bonus/<user_id>/<bonus_type>",
            "/students",
            "/students/<student_id>",
            "/results/<student_id>",
        ]
        .into_iter()
        .map(String::from)
        .collect(),
    })
}

pub fn app() -> Router {
    Router::new()
        .route("/", get(index))
        .merge(user_controller::UserController::app())
        .merge(reward_controller::RewardController::app())
        .merge(bonus_controller::BonusController::app())
        .merge(student_controller::StudentController::app())
}
