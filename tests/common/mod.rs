use std::time::Duration;

use backoffice_console::auth::{AppIdentity, AuthContext};
use backoffice_console::fetcher::http::HttpFetcher;
use mockito::ServerGuard;

pub const APP_ID: &str = "backoffice-console";
pub const APP_VERSION: &str = "2.3.1";

/// Mock backend serving the API under `/api/v1`.
pub struct TestBackend {
    pub server: ServerGuard,
    pub auth: AuthContext,
}

impl TestBackend {
    pub async fn start() -> Self {
        let server = mockito::Server::new_async().await;
        let auth = AuthContext::in_memory(AppIdentity::new(APP_ID, APP_VERSION));
        Self { server, auth }
    }

    pub fn base_url(&self) -> String {
        format!("{}/api/v1", self.server.url())
    }

    pub fn fetcher(&self) -> HttpFetcher {
        HttpFetcher::new(&self.base_url(), self.auth.clone(), Duration::from_secs(5))
            .expect("valid base url")
    }
}
