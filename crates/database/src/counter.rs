use mongodb::{
    bson::doc,
    options::{FindOneAndUpdateOptions, ReturnDocument},
    Collection,
};
use serde::{Deserialize, Serialize};
use utils::{AppError, AppResult};

pub const USER_SEQUENCE: &str = "user";
pub const STUDENT_SEQUENCE: &str = "student";

/// Named monotonically increasing sequence, one document per name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Counter {
    #[serde(rename = "_id")]
    pub name: String,
    pub seq: i64,
}

/// Atomically bumps the sequence and returns the new value. The first
/// call for a name returns 1.
pub async fn next_sequence(counters: &Collection<Counter>, name: &str) -> AppResult<i64> {
    let options = FindOneAndUpdateOptions::builder()
        .upsert(true)
        .return_document(ReturnDocument::After)
        .build();

    let counter = counters
        .find_one_and_update(doc! { "_id": name }, doc! { "$inc": { "seq": 1_i64 } }, options)
        .await?
        .ok_or_else(|| AppError::InternalServerErrorWithContext(format!("sequence {} was not upserted", name)))?;

    Ok(counter.seq)
}
