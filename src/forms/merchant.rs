use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::merchant::Merchant;
use crate::domain::resource::{Resource, ResourceKind};
use crate::forms::{serialize_phone_e164, validate_phone_number};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MerchantForm {
    #[validate(length(min = 1, max = 150))]
    pub name: String,
    #[validate(length(min = 3, max = 12))]
    pub merchant_code: String,
    #[serde(serialize_with = "serialize_phone_e164")]
    #[validate(custom(function = "validate_phone_number"))]
    pub phone_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email)]
    pub email: Option<String>,
    pub active: bool,
}

impl Resource for Merchant {
    const KIND: ResourceKind = ResourceKind::Merchant;

    type Form = MerchantForm;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> MerchantForm {
        MerchantForm {
            name: "Duka la Mama".into(),
            merchant_code: "DLM001".into(),
            phone_number: "+255 713 000 111".into(),
            email: None,
            active: true,
        }
    }

    #[test]
    fn accepts_valid_merchant() {
        assert!(form().validate().is_ok());
    }

    #[test]
    fn rejects_short_code_and_bad_contacts() {
        let mut bad = form();
        bad.merchant_code = "D1".into();
        bad.phone_number = "000000000".into();
        bad.email = Some("duka@".into());

        let errors = bad.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("merchant_code"));
        assert!(fields.contains_key("phone_number"));
        assert!(fields.contains_key("email"));
    }

    #[test]
    fn serializes_camel_case_payload() {
        let json = serde_json::to_value(form()).unwrap();
        assert_eq!(json["merchantCode"], "DLM001");
        assert_eq!(json["phoneNumber"], "+255713000111");
        assert!(json.get("email").is_none());
    }
}
