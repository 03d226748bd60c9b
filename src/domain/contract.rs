use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::types::EntityId;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContractStatus {
    #[default]
    Draft,
    Active,
    Expired,
    Terminated,
    #[serde(other)]
    Unknown,
}

/// Commercial agreement between the bank and a merchant.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: EntityId,
    pub merchant_id: EntityId,
    pub reference: String,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Commission charged on each transaction, in basis points.
    #[serde(default)]
    pub commission_bps: u32,
    #[serde(default)]
    pub status: ContractStatus,
}
