use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    UnknownBonus(String),

    #[error("{0}")]
    AlreadyClaimed(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    InternalServerErrorWithContext(String),

    #[error("{}", validation_message(.0))]
    ValidationError(#[from] validator::ValidationErrors),

    #[error(transparent)]
    AxumJsonRejection(#[from] JsonRejection),

    /// `/user/abc` and friends: no such resource
    #[error("The requested resource does not exist on this server!")]
    AxumPathRejection(#[from] PathRejection),

    #[error(transparent)]
    MongoError(#[from] mongodb::error::Error),

    #[error(transparent)]
    AnyhowError(#[from] anyhow::Error),
}

/// First custom message of any failed rule, else validator's own text.
fn validation_message(errors: &validator::ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by_key(|(field, _)| *field);

    fields
        .iter()
        .flat_map(|(_, errs)| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| errors.to_string())
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) | AppError::UnknownBonus(_) | AppError::AxumPathRejection(_) => {
                StatusCode::NOT_FOUND
            }
            AppError::AlreadyClaimed(_)
            | AppError::BadRequest(_)
            | AppError::ValidationError(_)
            | AppError::AxumJsonRejection(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InternalServerErrorWithContext(_) | AppError::MongoError(_) | AppError::AnyhowError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) | AppError::AxumPathRejection(_) => "NOT_FOUND",
            AppError::UnknownBonus(_) => "UNKNOWN_BONUS",
            AppError::AlreadyClaimed(_) => "ALREADY_CLAIMED",
            AppError::BadRequest(_) | AppError::AxumJsonRejection(_) => "BAD_REQUEST",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::Conflict(_) => "CONFLICT",
            AppError::InternalServerErrorWithContext(_) | AppError::MongoError(_) | AppError::AnyhowError(_) => {
                "INTERNAL_ERROR"
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // 内部错误只记录日志，不把细节暴露给客户端
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("🔴 internal error: {:?}", self);
            String::from("Something went wrong, please try again later.")
        } else {
            self.to_string()
        };

        let body = Json(json!({
            "message": message,
            "code": self.code(),
        }));

        (status, body).into_response()
    }
}
