//! Configuration model loaded from external sources.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::auth::AppIdentity;
use crate::domain::types::{PageSize, SortSpec};

/// Prefix of environment variables overriding file settings, e.g.
/// `BACKOFFICE_API_BASE_URL`.
pub const ENV_PREFIX: &str = "BACKOFFICE";

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Clone, Debug, Deserialize)]
/// Settings shared by the console commands.
pub struct ConsoleConfig {
    pub api_base_url: String,
    pub app_id: String,
    pub app_version: String,
    /// File holding the persisted session tokens; in-memory when unset.
    #[serde(default)]
    pub token_path: Option<PathBuf>,
    #[serde(default)]
    pub page_size: PageSize,
    #[serde(default)]
    pub default_sort: SortSpec,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl ConsoleConfig {
    /// Layers `{dir}/default.*`, optional `{dir}/{app_env}.*` and
    /// `BACKOFFICE_*` environment variables.
    pub fn load(config_dir: &Path, app_env: &str) -> Result<Self, ConfigError> {
        let default_file = config_dir.join("default");
        let env_file = config_dir.join(app_env);

        Config::builder()
            .add_source(File::with_name(&default_file.to_string_lossy()))
            .add_source(File::with_name(&env_file.to_string_lossy()).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()
    }

    pub fn identity(&self) -> AppIdentity {
        AppIdentity::new(&self.app_id, &self.app_version)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
