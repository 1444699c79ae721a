//! GitHub implementation of the remote repository port.
//!
//! [`GitHubClient`] answers pull-request and branch-existence questions
//! through the GitHub REST API using a blocking `ureq` agent with a bounded
//! per-request timeout. [`OfflineRemote`] stands in when the repository has no
//! GitHub remote: every query fails, and the classifier falls back to git
//! status on its own.
//!
//! # Public API
//! - [`RepositoryIdentity`]: `owner/name` parsed from a remote URL
//! - [`GitHubClient`]: Live client
//! - [`OfflineRemote`]: Always-unavailable remote

use crate::core::{
    error::{Result, WranglerError},
    ports::RemoteRepositoryPort,
    state::{PullRequest, PullRequestState},
};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("branch-wrangler/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryIdentity {
    pub owner: String,
    pub name: String,
}

impl RepositoryIdentity {
    /// Parse `git@github.com:o/r.git`, `https://github.com/o/r` or
    /// `ssh://git@github.com/o/r.git`
    pub fn from_remote_url(url: &str) -> Result<Self> {
        let trimmed = url.trim();
        let path = ["git@github.com:", "https://github.com/", "ssh://git@github.com/"]
            .iter()
            .find_map(|prefix| trimmed.strip_prefix(prefix))
            .ok_or_else(|| WranglerError::not_a_github_remote(trimmed))?;

        let path = path.trim_end_matches('/');
        let path = path.strip_suffix(".git").unwrap_or(path);

        match path.split('/').collect::<Vec<_>>().as_slice() {
            [owner, name] if !owner.is_empty() && !name.is_empty() => Ok(Self {
                owner: owner.to_string(),
                name: name.to_string(),
            }),
            _ => Err(WranglerError::not_a_github_remote(trimmed)),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiPullRequest {
    number: u64,
    title: String,
    state: PullRequestState,
    #[serde(default)]
    draft: bool,
    #[serde(default)]
    merged: bool,
    merged_at: Option<String>,
    html_url: String,
}

impl From<ApiPullRequest> for PullRequest {
    fn from(pr: ApiPullRequest) -> Self {
        PullRequest {
            number: pr.number,
            title: pr.title,
            state: pr.state,
            draft: pr.draft,
            // The list endpoint omits `merged`; `merged_at` is always present.
            merged: pr.merged || pr.merged_at.is_some(),
            url: pr.html_url,
        }
    }
}

pub struct GitHubClient {
    agent: ureq::Agent,
    api_url: String,
    identity: RepositoryIdentity,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(identity: RepositoryIdentity, token: Option<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            agent,
            api_url: DEFAULT_API_URL.to_string(),
            identity,
            token,
        }
    }

    /// Point the client at a different API root, e.g. GitHub Enterprise
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn identity(&self) -> &RepositoryIdentity {
        &self.identity
    }

    /// Repository endpoint with each segment percent-encoded, so branch
    /// names containing `#`, `%`, `?` or `/` stay one path segment
    fn repo_url(&self, segments: &[&str]) -> Result<String> {
        let mut url = Url::parse(&self.api_url)
            .map_err(|e| WranglerError::remote_transport(&self.api_url, e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| {
                WranglerError::remote_transport(&self.api_url, "API URL cannot take a path")
            })?
            .pop_if_empty()
            .extend(
                ["repos", self.identity.owner.as_str(), self.identity.name.as_str()]
                    .into_iter()
                    .chain(segments.iter().copied()),
            );
        Ok(url.into())
    }

    fn request(&self, url: &str) -> ureq::Request {
        let request = self
            .agent
            .get(url)
            .set("User-Agent", USER_AGENT)
            .set("Accept", "application/vnd.github+json")
            .set("X-GitHub-Api-Version", "2022-11-28");
        match &self.token {
            Some(token) => request.set("Authorization", &format!("Bearer {token}")),
            None => request,
        }
    }

    fn read_body(url: &str, response: ureq::Response) -> Result<String> {
        let mut body = String::new();
        response
            .into_reader()
            .read_to_string(&mut body)
            .map_err(|e| WranglerError::remote_transport(url, e.to_string()))?;
        Ok(body)
    }
}

fn map_ureq_error(url: &str, error: ureq::Error) -> WranglerError {
    match error {
        ureq::Error::Status(status, _) => WranglerError::remote_status(url, status),
        ureq::Error::Transport(transport) => {
            WranglerError::remote_transport(url, transport.to_string())
        }
    }
}

/// Extract the `rel="next"` target from a `Link` header
fn next_page_url(link: &str) -> Option<String> {
    link.split(',').find_map(|part| {
        let mut pieces = part.split(';');
        let target = pieces.next()?.trim();
        let is_next = pieces.any(|p| p.trim() == "rel=\"next\"");
        if is_next {
            target
                .strip_prefix('<')
                .and_then(|t| t.strip_suffix('>'))
                .map(str::to_string)
        } else {
            None
        }
    })
}

impl RemoteRepositoryPort for GitHubClient {
    fn pull_requests_for_branch(&self, branch: &str) -> Result<Vec<PullRequest>> {
        let first_url = self.repo_url(&["pulls"])?;
        let head = format!("{}:{}", self.identity.owner, branch);

        let mut pulls = Vec::new();
        let mut response = self
            .request(&first_url)
            .query("head", &head)
            .query("state", "all")
            .query("per_page", "100")
            .call()
            .map_err(|e| map_ureq_error(&first_url, e))?;
        let mut url = first_url;

        loop {
            let next = response.header("link").and_then(next_page_url);
            let body = Self::read_body(&url, response)?;
            let page: Vec<ApiPullRequest> =
                serde_json::from_str(&body).map_err(|e| WranglerError::remote_decode(&url, e))?;
            pulls.extend(page.into_iter().map(PullRequest::from));

            match next {
                Some(next_url) => {
                    response = self
                        .request(&next_url)
                        .call()
                        .map_err(|e| map_ureq_error(&next_url, e))?;
                    url = next_url;
                }
                None => break,
            }
        }

        log::debug!("GitHub returned {} pull requests for '{branch}'", pulls.len());
        Ok(pulls)
    }

    fn remote_branch_exists(&self, branch: &str) -> Result<bool> {
        let url = self.repo_url(&["branches", branch])?;
        match self.request(&url).call() {
            Ok(_) => Ok(true),
            Err(ureq::Error::Status(404, _)) => Ok(false),
            Err(e) => Err(map_ureq_error(&url, e)),
        }
    }
}

/// A remote that is never reachable
#[derive(Debug, Clone)]
pub struct OfflineRemote {
    reason: String,
}

impl OfflineRemote {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl RemoteRepositoryPort for OfflineRemote {
    fn pull_requests_for_branch(&self, _branch: &str) -> Result<Vec<PullRequest>> {
        Err(WranglerError::remote_unavailable(&self.reason))
    }

    fn remote_branch_exists(&self, _branch: &str) -> Result<bool> {
        Err(WranglerError::remote_unavailable(&self.reason))
    }
}

/// `GITHUB_TOKEN`, else the first line of `token_path`, else nothing
pub fn resolve_token(token_path: Option<&Path>) -> Option<String> {
    if let Ok(token) = std::env::var("GITHUB_TOKEN") {
        if !token.trim().is_empty() {
            return Some(token.trim().to_string());
        }
    }

    let path = token_path?;
    match std::fs::read_to_string(path) {
        Ok(content) => content
            .lines()
            .next()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string),
        Err(e) => {
            log::debug!("No GitHub token at '{}': {e}", path.display());
            None
        }
    }
}
