//! User configuration.
//!
//! Settings live in `config.json` under the branch-wrangler config directory.
//! A missing file means defaults; the tool never writes it back.

use crate::core::classifier::DetachedHeadScope;
use crate::core::dirs::{expand_home, get_config_directory};
use crate::core::error::{Result, WranglerError};
use crate::core::git::DEFAULT_REMOTE;
use crate::core::ttl_cache::DEFAULT_TTL;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WranglerConfig {
    /// Checked in order for "already merged" detection
    pub base_branches: Vec<String>,
    pub remote_name: String,
    pub github_token_path: PathBuf,
    pub cache_ttl_secs: u64,
    pub request_timeout_secs: u64,
    pub detached_head_scope: DetachedHeadScope,
}

impl Default for WranglerConfig {
    fn default() -> Self {
        Self {
            base_branches: vec![
                "main".to_string(),
                "master".to_string(),
                "develop".to_string(),
            ],
            remote_name: DEFAULT_REMOTE.to_string(),
            github_token_path: PathBuf::from("~/.github-token"),
            cache_ttl_secs: DEFAULT_TTL.as_secs(),
            request_timeout_secs: 15,
            detached_head_scope: DetachedHeadScope::default(),
        }
    }
}

impl WranglerConfig {
    pub fn default_path() -> Result<PathBuf> {
        Ok(get_config_directory()?.join("config.json"))
    }

    /// Load from `path`, or from the default location when `None`
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_file = match path {
            Some(path) => path.to_path_buf(),
            None => Self::default_path()?,
        };

        if !config_file.exists() {
            log::debug!(
                "No config file at {}, using defaults",
                config_file.display()
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&config_file)
            .map_err(|e| WranglerError::config_read_failed(&config_file, e))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| WranglerError::config_parse_failed(&config_file, e))?;

        log::debug!("Loaded config from {}", config_file.display());
        Ok(config)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn token_path(&self) -> PathBuf {
        expand_home(&self.github_token_path)
    }
}
