use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::EntityId;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StaffRole {
    Admin,
    Supervisor,
    Operator,
    Auditor,
}

/// Back-office user operating the console.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    pub id: EntityId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: StaffRole,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub last_login_at: Option<DateTime<Utc>>,
}
