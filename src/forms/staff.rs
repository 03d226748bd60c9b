use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::resource::{Resource, ResourceKind};
use crate::domain::staff::{Staff, StaffRole};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StaffForm {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    pub role: StaffRole,
    pub active: bool,
}

impl Resource for Staff {
    const KIND: ResourceKind = ResourceKind::Staff;

    type Form = StaffForm;
}
