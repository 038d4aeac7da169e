use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of every error response
#[derive(Clone, Serialize, Deserialize, Debug, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
    /// Machine readable code, e.g. `ALREADY_CLAIMED`
    pub code: String,
}

#[derive(Clone, Serialize, Deserialize, Debug, ToSchema)]
pub struct IndexResponse {
    pub message: String,
    pub routes: Vec<String>,
}
