//! Session identity attached to every backend request.

use std::sync::Arc;

pub mod storage;

use storage::{MemoryTokenStorage, TokenStorage, keys};

pub const APP_ID_HEADER: &str = "X-App-ID";
pub const APP_VERSION_HEADER: &str = "X-App-Version";
pub const TWO_FACTOR_HEADER: &str = "X-2FA-Token";
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Identity of the console build, sent with every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppIdentity {
    pub app_id: String,
    pub app_version: String,
}

impl AppIdentity {
    pub fn new(app_id: impl Into<String>, app_version: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            app_version: app_version.into(),
        }
    }
}

/// Bearer and second-factor tokens plus the app identity.
///
/// Tokens are read from the storage on each call, so a sign-in through one
/// context is visible to every fetcher sharing the same storage.
#[derive(Clone)]
pub struct AuthContext {
    identity: AppIdentity,
    storage: Arc<dyn TokenStorage>,
}

impl AuthContext {
    pub fn new(identity: AppIdentity, storage: Arc<dyn TokenStorage>) -> Self {
        Self { identity, storage }
    }

    /// Context backed by process memory only.
    pub fn in_memory(identity: AppIdentity) -> Self {
        Self::new(identity, Arc::new(MemoryTokenStorage::new()))
    }

    pub fn identity(&self) -> &AppIdentity {
        &self.identity
    }

    pub fn token(&self) -> Option<String> {
        self.storage
            .get(keys::ACCESS_TOKEN)
            .filter(|token| !token.is_empty())
    }

    pub fn two_factor_token(&self) -> Option<String> {
        self.storage
            .get(keys::TWO_FACTOR_TOKEN)
            .filter(|token| !token.is_empty())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn sign_in(&self, token: &str) {
        self.storage.set(keys::ACCESS_TOKEN, token.trim());
        log::info!("Stored access token for {}", self.identity.app_id);
    }

    pub fn set_two_factor_token(&self, token: &str) {
        self.storage.set(keys::TWO_FACTOR_TOKEN, token.trim());
    }

    /// Forgets both tokens.
    pub fn sign_out(&self) {
        self.storage.remove(keys::ACCESS_TOKEN);
        self.storage.remove(keys::TWO_FACTOR_TOKEN);
        log::info!("Cleared tokens for {}", self.identity.app_id);
    }

    /// Headers for one request.
    ///
    /// The app identity and the 2FA header (empty when unset) are always
    /// present; `Authorization` only when `include_auth` and a token is stored.
    pub fn headers(&self, include_auth: bool) -> Vec<(&'static str, String)> {
        let mut headers = vec![
            (APP_ID_HEADER, self.identity.app_id.clone()),
            (APP_VERSION_HEADER, self.identity.app_version.clone()),
            (TWO_FACTOR_HEADER, self.two_factor_token().unwrap_or_default()),
        ];

        if include_auth {
            if let Some(token) = self.token() {
                headers.push((AUTHORIZATION_HEADER, format!("Bearer {token}")));
            }
        }

        headers
    }
}

impl std::fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthContext")
            .field("identity", &self.identity)
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
