//! Client library for the digital-banking back-office API.
//!
//! List views are driven by [`controller::PaginationController`], which keeps
//! page, size, sort and search state for one endpoint and loads rows through a
//! [`fetcher::Fetcher`]. [`fetcher::http::HttpFetcher`] is the production
//! fetcher; it signs requests with the [`auth::AuthContext`].

pub mod auth;
pub mod controller;
pub mod domain;
pub mod fetcher;
pub mod forms;
pub mod models;
pub mod pagination;
pub mod services;

use std::sync::Arc;

use crate::auth::AuthContext;
use crate::auth::storage::{FileTokenStorage, MemoryTokenStorage, TokenStorage};
use crate::fetcher::FetchResult;
use crate::fetcher::http::HttpFetcher;
use crate::models::config::ConsoleConfig;

/// Builds the auth context described by the configuration.
pub fn auth_context(config: &ConsoleConfig) -> AuthContext {
    let storage: Arc<dyn TokenStorage> = match &config.token_path {
        Some(path) => Arc::new(FileTokenStorage::open(path)),
        None => Arc::new(MemoryTokenStorage::new()),
    };
    AuthContext::new(config.identity(), storage)
}

/// Builds the HTTP fetcher for the configured backend.
pub fn http_fetcher(config: &ConsoleConfig, auth: AuthContext) -> FetchResult<HttpFetcher> {
    HttpFetcher::new(&config.api_base_url, auth, config.request_timeout())
}
