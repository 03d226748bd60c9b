//! Validated payloads sent to the create and update endpoints.

use serde::Serializer;
use validator::ValidationError;

use crate::domain::types::normalize_phone_to_e164;

pub mod contract;
pub mod customer;
pub mod merchant;
pub mod staff;

/// Accepts international numbers such as `+255 712 345 678`.
pub(crate) fn validate_phone_number(value: &str) -> Result<(), ValidationError> {
    normalize_phone_to_e164(value)
        .map(|_| ())
        .map_err(|_| ValidationError::new("phone_number"))
}

/// Writes a phone number in E.164 form; values that do not parse are sent as typed.
pub(crate) fn serialize_phone_e164<S: Serializer>(
    value: &str,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match normalize_phone_to_e164(value) {
        Ok(normalized) => serializer.serialize_str(&normalized),
        Err(_) => serializer.serialize_str(value),
    }
}
