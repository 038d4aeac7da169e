use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Student {
    #[serde(rename = "_id")]
    pub id: i64,
    pub name: String,
    pub age: u32,
}

/// Grade of one student in one subject; setting it again overwrites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StudentResult {
    pub student_id: i64,
    pub subject: String,
    pub grade: String,
}
