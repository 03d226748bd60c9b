use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::contract::{Contract, ContractStatus};
use crate::domain::resource::{Resource, ResourceKind};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_contract_dates"))]
pub struct ContractForm {
    #[validate(length(min = 1, max = 64))]
    pub reference: String,
    pub start_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// At most 100%.
    #[validate(range(max = 10_000))]
    pub commission_bps: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ContractStatus>,
}

fn validate_contract_dates(form: &ContractForm) -> Result<(), ValidationError> {
    match form.end_date {
        Some(end) if end < form.start_date => Err(ValidationError::new("end_before_start")),
        _ => Ok(()),
    }
}

impl Resource for Contract {
    const KIND: ResourceKind = ResourceKind::Contract;

    type Form = ContractForm;
}
