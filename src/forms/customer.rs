use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::customer::{Customer, CustomerStatus};
use crate::domain::resource::{Resource, ResourceKind};
use crate::forms::{serialize_phone_e164, validate_phone_number};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Customer onboarding and profile edit payload.
pub struct CustomerForm {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[serde(serialize_with = "serialize_phone_e164")]
    #[validate(custom(function = "validate_phone_number"))]
    pub phone_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email)]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 4, max = 32))]
    pub national_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CustomerStatus>,
}

impl Resource for Customer {
    const KIND: ResourceKind = ResourceKind::Customer;

    type Form = CustomerForm;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> CustomerForm {
        CustomerForm {
            first_name: "Amina".into(),
            last_name: "Juma".into(),
            phone_number: "+255712345678".into(),
            email: Some("amina@example.com".into()),
            national_id: None,
            status: None,
        }
    }

    #[test]
    fn accepts_valid_customer() {
        assert!(form().validate().is_ok());
    }

    #[test]
    fn rejects_bad_email_and_phone() {
        let mut bad = form();
        bad.email = Some("not-an-email".into());
        bad.phone_number = "12".into();
        let errors = bad.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("phone_number"));
    }

    #[test]
    fn serializes_camel_case_without_empty_options() {
        let json = serde_json::to_value(form()).unwrap();
        assert_eq!(json["firstName"], "Amina");
        assert_eq!(json["phoneNumber"], "+255712345678");
        assert!(json.get("nationalId").is_none());
    }

    #[test]
    fn phone_number_is_sent_in_e164() {
        let mut spaced = form();
        spaced.phone_number = "+255 712 345 678".into();
        assert!(spaced.validate().is_ok());

        let json = serde_json::to_value(spaced).unwrap();
        assert_eq!(json["phoneNumber"], "+255712345678");
    }
}
