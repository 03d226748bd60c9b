//! Catalogue of the backend REST resources managed from the console.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::Serialize;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::domain::types::{EntityId, TypeConstraintError};

/// Every collection exposed by the back-office API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Customer,
    Merchant,
    Staff,
    /// Contracts live under a merchant: `/merchants/{id}/contracts`.
    Contract,
    PaymentIntegration,
    Charge,
    UssdMenu,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 7] = [
        ResourceKind::Customer,
        ResourceKind::Merchant,
        ResourceKind::Staff,
        ResourceKind::Contract,
        ResourceKind::PaymentIntegration,
        ResourceKind::Charge,
        ResourceKind::UssdMenu,
    ];

    /// Name used on the command line and in logs.
    pub const fn name(self) -> &'static str {
        match self {
            ResourceKind::Customer => "customers",
            ResourceKind::Merchant => "merchants",
            ResourceKind::Staff => "staff",
            ResourceKind::Contract => "contracts",
            ResourceKind::PaymentIntegration => "payment-integrations",
            ResourceKind::Charge => "charges",
            ResourceKind::UssdMenu => "ussd-menus",
        }
    }

    /// Resource this one is nested under, if any.
    pub const fn parent(self) -> Option<ResourceKind> {
        match self {
            ResourceKind::Contract => Some(ResourceKind::Merchant),
            _ => None,
        }
    }

    /// Collection endpoint, or `None` when a nested resource has no parent id.
    ///
    /// A parent id passed to a top-level resource is ignored.
    pub fn collection_path(self, parent: Option<EntityId>) -> Option<String> {
        match self.parent() {
            Some(parent_kind) => {
                parent.map(|id| format!("/{}/{id}/{}", parent_kind.name(), self.name()))
            }
            None => Some(format!("/{}", self.name())),
        }
    }

    pub fn member_path(self, parent: Option<EntityId>, id: EntityId) -> Option<String> {
        self.collection_path(parent)
            .map(|collection| format!("{collection}/{id}"))
    }
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ResourceKind {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        ResourceKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| TypeConstraintError::InvalidValue(format!("unknown resource `{s}`")))
    }
}

/// A typed backend entity together with the form used to create or edit it.
pub trait Resource: DeserializeOwned + Send + 'static {
    const KIND: ResourceKind;

    type Form: Serialize + Validate + Send + Sync;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_level_paths() {
        assert_eq!(
            ResourceKind::Customer.collection_path(None).as_deref(),
            Some("/customers")
        );
        let id = EntityId::new(9).unwrap();
        assert_eq!(
            ResourceKind::UssdMenu.member_path(None, id).as_deref(),
            Some("/ussd-menus/9")
        );
    }

    #[test]
    fn nested_paths_require_parent() {
        assert_eq!(ResourceKind::Contract.collection_path(None), None);

        let merchant = EntityId::new(3).unwrap();
        let contract = EntityId::new(11).unwrap();
        assert_eq!(
            ResourceKind::Contract
                .collection_path(Some(merchant))
                .as_deref(),
            Some("/merchants/3/contracts")
        );
        assert_eq!(
            ResourceKind::Contract
                .member_path(Some(merchant), contract)
                .as_deref(),
            Some("/merchants/3/contracts/11")
        );
    }

    #[test]
    fn parses_names() {
        for kind in ResourceKind::ALL {
            assert_eq!(kind.name().parse::<ResourceKind>(), Ok(kind));
        }
        assert_eq!(
            "Payment_Integrations".parse::<ResourceKind>(),
            Ok(ResourceKind::PaymentIntegration)
        );
        assert!("accounts".parse::<ResourceKind>().is_err());
    }
}
