//! Centralized initialization for commands that run a reconciliation pass.
//!
//! [`ReconcileInit`] performs the setup every pass shares: locate the git
//! repository, load configuration, work out which remote service to talk to,
//! and wrap it in the TTL cache.
//!
//! # Initialization Steps
//! 1. **Git repository validation**: Ensure we're in a valid git repository
//! 2. **Configuration**: Load `config.json`, apply command-line overrides
//! 3. **Remote selection**: GitHub when the remote URL is a GitHub one and
//!    `--offline` was not given, otherwise an offline remote
//! 4. **Classifier**: Base branches and detached-HEAD scope from config

use crate::core::{
    classifier::Classifier,
    config::WranglerConfig,
    error::{Result, WranglerError},
    git::GitRepo,
    github::{resolve_token, GitHubClient, OfflineRemote, RepositoryIdentity},
    ports::RemoteRepositoryPort,
    remote_cache::CachingRemote,
};
use std::env;
use std::path::PathBuf;

pub type RemoteHandle = CachingRemote<Box<dyn RemoteRepositoryPort>>;

/// Options every reconciling command accepts
#[derive(Debug, Clone, Default)]
pub struct ReconcileOptions {
    pub config_path: Option<PathBuf>,
    pub base_branches: Option<Vec<String>>,
    pub offline: bool,
}

/// Ready-to-run classifier plus the configuration it was built from
pub struct ReconcileContext {
    pub classifier: Classifier<GitRepo, RemoteHandle>,
    pub config: WranglerConfig,
}

pub struct ReconcileInit;

impl ReconcileInit {
    /// Initialize against the repository containing the current directory
    pub fn initialize(options: ReconcileOptions) -> Result<ReconcileContext> {
        // Step 1: Check if we're in a git repository
        let current_dir = env::current_dir()?;
        let git_repo = GitRepo::open(&current_dir).map_err(|_| WranglerError::NotInGitRepo)?;

        // Step 2: Configuration and overrides
        let mut config = WranglerConfig::load(options.config_path.as_deref())?;
        if let Some(bases) = options.base_branches {
            config.base_branches = bases;
        }
        let git_repo = git_repo.with_remote(config.remote_name.clone());

        // Step 3: Remote service
        let remote = Self::select_remote(&git_repo, &config, options.offline);
        let remote = CachingRemote::new(remote, config.cache_ttl());

        // Step 4: Classifier
        log::debug!(
            "Initialized reconciliation with base branches {:?}",
            config.base_branches
        );
        let classifier = Classifier::new(git_repo, remote, config.base_branches.clone())
            .with_detached_scope(config.detached_head_scope);

        Ok(ReconcileContext { classifier, config })
    }

    fn select_remote(
        git_repo: &GitRepo,
        config: &WranglerConfig,
        offline: bool,
    ) -> Box<dyn RemoteRepositoryPort> {
        if offline {
            return Box::new(OfflineRemote::new("offline mode requested"));
        }

        let identity = match git_repo
            .remote_url()
            .and_then(|url| RepositoryIdentity::from_remote_url(&url))
        {
            Ok(identity) => identity,
            Err(e) => {
                log::debug!("Pull request lookups disabled: {e}");
                return Box::new(OfflineRemote::new(e.to_string()));
            }
        };

        let token = resolve_token(Some(&config.token_path()));
        if token.is_none() {
            log::warn!("No GitHub token found; using unauthenticated requests");
        }

        log::debug!(
            "Using GitHub repository {}/{}",
            identity.owner,
            identity.name
        );
        Box::new(GitHubClient::new(identity, token, config.request_timeout()))
    }
}
