use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Daily Rewards API",
        description = "Daily streak rewards, one-off bonuses and a small student registry",
        version = "1.0.0"
    ),
    paths(
        crate::api::index,
        crate::api::user_controller::get_user,
        crate::api::reward_controller::get_daily_reward,
        crate::api::reward_controller::claim_reward,
        crate::api::bonus_controller::list_bonuses,
        crate::api::bonus_controller::claim_bonus,
        crate::api::student_controller::create_student,
        crate::api::student_controller::list_students,
        crate::api::student_controller::get_student,
        crate::api::student_controller::add_result,
        crate::api::student_controller::get_results,
    ),
    components(
        schemas(
            crate::dtos::static_dto::ErrorResponse,
            crate::dtos::static_dto::IndexResponse,
            crate::dtos::user_dto::UserSnapshotDto,
            crate::dtos::reward_dto::NextRewardDto,
            crate::dtos::reward_dto::ClaimRewardResponse,
            crate::dtos::bonus_dto::BonusClaimResponse,
            crate::dtos::bonus_dto::BonusStatusDto,
            crate::dtos::bonus_dto::BonusListResponse,
            crate::dtos::student_dto::CreateStudentDto,
            crate::dtos::student_dto::AddResultDto,
            crate::dtos::student_dto::StudentDto,
            crate::dtos::student_dto::StudentResultsDto,
        )
    ),
    tags(
        (name = "system", description = "Health check"),
        (name = "user", description = "Balance and streak"),
        (name = "reward", description = "Daily streak reward"),
        (name = "bonus", description = "Once-a-day bonuses"),
        (name = "student", description = "Student registry and grades")
    )
)]
pub struct ApiDoc;
