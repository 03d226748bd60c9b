//! Conventional list/get/create/update/delete operations over backend resources.

use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::resource::ResourceKind;
use crate::domain::types::TypeConstraintError;
use crate::fetcher::FetchError;

pub mod resources;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Invalid value: {0}")]
    TypeConstraint(#[from] TypeConstraintError),

    #[error("Listing {0} requires a parent id")]
    MissingParent(ResourceKind),

    #[error("Not authorized")]
    Unauthorized,

    #[error("Entity not found")]
    NotFound,

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error(transparent)]
    Fetch(FetchError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<FetchError> for ServiceError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Status { status: 401 | 403, .. } => ServiceError::Unauthorized,
            FetchError::Status { status: 404, .. } => ServiceError::NotFound,
            FetchError::Decode(message) => ServiceError::Decode(message),
            other => ServiceError::Fetch(other),
        }
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_http_statuses() {
        let status = |status| FetchError::Status {
            status,
            message: String::new(),
        };
        assert!(matches!(ServiceError::from(status(401)), ServiceError::Unauthorized));
        assert!(matches!(ServiceError::from(status(403)), ServiceError::Unauthorized));
        assert!(matches!(ServiceError::from(status(404)), ServiceError::NotFound));
        assert!(matches!(
            ServiceError::from(status(500)),
            ServiceError::Fetch(FetchError::Status { status: 500, .. })
        ));
    }

    #[test]
    fn missing_parent_names_the_resource() {
        assert_eq!(
            ServiceError::MissingParent(ResourceKind::Contract).to_string(),
            "Listing contracts requires a parent id"
        );
    }
}
