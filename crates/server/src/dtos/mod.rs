pub mod bonus_dto;
pub mod reward_dto;
pub mod static_dto;
pub mod student_dto;
pub mod user_dto;
