use chrono::NaiveDate;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// One bonus taken by one user on one calendar day. Never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusClaim {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: i64,
    pub bonus_type: String,
    pub claimed_date: NaiveDate,
}

impl BonusClaim {
    pub fn new(user_id: i64, bonus_type: &str, claimed_date: NaiveDate) -> Self {
        Self {
            id: None,
            user_id,
            bonus_type: bonus_type.to_string(),
            claimed_date,
        }
    }

    pub fn matches(&self, user_id: i64, bonus_type: &str, day: NaiveDate) -> bool {
        self.user_id == user_id && self.bonus_type == bonus_type && self.claimed_date == day
    }
}
