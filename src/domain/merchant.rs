use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::EntityId;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Merchant {
    pub id: EntityId,
    pub name: String,
    /// Short code customers dial or type to pay this merchant.
    pub merchant_code: String,
    pub phone_number: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
