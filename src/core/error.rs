//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`WranglerError`] which covers every failure mode of a
//! reconciliation pass. It uses `thiserror` for ergonomic error definitions and
//! includes constructors for the common failure scenarios.
//!
//! # Public API
//! - [`WranglerError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, WranglerError>`
//!
//! # Error Categories
//! - **Local facts**: Repository not found, git2 library errors, unreadable refs
//! - **Remote queries**: HTTP status and transport failures, unavailable remote.
//!   These are absorbed by the classifier and never abort a pass.
//! - **Configuration**: Unreadable or malformed config files
//! - **Selection**: Unknown filter names and state names

use std::path::PathBuf;
use thiserror::Error;

/// Domain-specific error types for branch-wrangler
#[derive(Error, Debug)]
pub enum WranglerError {
    // Local repository errors
    #[error("Not in a git repository")]
    NotInGitRepo,

    #[error("Git repository error: {0}")]
    GitRepo(#[from] git2::Error),

    #[error("Branch name is not valid UTF-8")]
    InvalidUtf8BranchName,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to list branches: {source}")]
    ListBranchesFailed { source: Box<WranglerError> },

    #[error("Failed to classify branch '{branch}': {source}")]
    ClassifyFailed {
        branch: String,
        source: Box<WranglerError>,
    },

    #[error("Failed to delete branch '{branch}': {message}")]
    BranchDeleteFailed { branch: String, message: String },

    #[error("git command failed: {message}")]
    GitCommandFailed { message: String },

    // Remote query errors
    #[error("Remote '{remote}' has no URL configured")]
    RemoteUrlMissing { remote: String },

    #[error("Not a GitHub repository URL: {url}")]
    NotAGitHubRemote { url: String },

    #[error("Remote repository unavailable: {reason}")]
    RemoteUnavailable { reason: String },

    #[error("Remote request to {url} failed with status {status}")]
    RemoteStatus { url: String, status: u16 },

    #[error("Remote request to {url} failed: {message}")]
    RemoteTransport { url: String, message: String },

    #[error("Failed to decode remote response from {url}: {source}")]
    RemoteDecode {
        url: String,
        source: serde_json::Error,
    },

    // Configuration errors
    #[error("Could not find config directory")]
    ConfigDirectoryNotFound,

    #[error("Failed to read config file '{path}': {source}")]
    ConfigReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ConfigParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    // Selection errors
    #[error("Unknown filter '{name}'. Available filters: {available}")]
    UnknownFilter { name: String, available: String },

    #[error("Unknown branch state '{value}'")]
    UnknownState { value: String },

    // JSON serialization errors
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results using WranglerError
pub type Result<T> = std::result::Result<T, WranglerError>;

impl WranglerError {
    /// Wrap a failure to enumerate local branches
    pub fn list_branches_failed(source: WranglerError) -> Self {
        Self::ListBranchesFailed {
            source: Box::new(source),
        }
    }

    /// Wrap a local-fact failure for a single branch
    pub fn classify_failed(branch: impl Into<String>, source: WranglerError) -> Self {
        Self::ClassifyFailed {
            branch: branch.into(),
            source: Box::new(source),
        }
    }

    /// Create a branch delete failed error
    pub fn branch_delete_failed(branch: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BranchDeleteFailed {
            branch: branch.into(),
            message: message.into(),
        }
    }

    /// Create a git command failed error
    pub fn git_command_failed(message: impl Into<String>) -> Self {
        Self::GitCommandFailed {
            message: message.into(),
        }
    }

    /// Create a remote url missing error
    pub fn remote_url_missing(remote: impl Into<String>) -> Self {
        Self::RemoteUrlMissing {
            remote: remote.into(),
        }
    }

    /// Create a not-a-GitHub-remote error
    pub fn not_a_github_remote(url: impl Into<String>) -> Self {
        Self::NotAGitHubRemote { url: url.into() }
    }

    /// Create a remote unavailable error
    pub fn remote_unavailable(reason: impl Into<String>) -> Self {
        Self::RemoteUnavailable {
            reason: reason.into(),
        }
    }

    /// Create a remote status error
    pub fn remote_status(url: impl Into<String>, status: u16) -> Self {
        Self::RemoteStatus {
            url: url.into(),
            status,
        }
    }

    /// Create a remote transport error
    pub fn remote_transport(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RemoteTransport {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a remote decode error
    pub fn remote_decode(url: impl Into<String>, source: serde_json::Error) -> Self {
        Self::RemoteDecode {
            url: url.into(),
            source,
        }
    }

    /// Create a config read failed error
    pub fn config_read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ConfigReadFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a config parse failed error
    pub fn config_parse_failed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::ConfigParseFailed {
            path: path.into(),
            source,
        }
    }

    /// Create an unknown filter error listing the names that do exist
    pub fn unknown_filter(name: impl Into<String>, available: &[&str]) -> Self {
        Self::UnknownFilter {
            name: name.into(),
            available: available.join(", "),
        }
    }

    /// Create an unknown state error
    pub fn unknown_state(value: impl Into<String>) -> Self {
        Self::UnknownState {
            value: value.into(),
        }
    }

    /// True for errors raised by a remote repository query
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::RemoteUnavailable { .. }
                | Self::RemoteStatus { .. }
                | Self::RemoteTransport { .. }
                | Self::RemoteDecode { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WranglerError::NotInGitRepo;
        assert_eq!(err.to_string(), "Not in a git repository");
    }

    #[test]
    fn test_classify_failed_names_branch() {
        let inner = WranglerError::git_command_failed("bad object");
        let err = WranglerError::classify_failed("feature-x", inner);
        assert_eq!(
            err.to_string(),
            "Failed to classify branch 'feature-x': git command failed: bad object"
        );
    }

    #[test]
    fn test_list_branches_failed() {
        let inner = WranglerError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let err = WranglerError::list_branches_failed(inner);
        assert!(err.to_string().starts_with("Failed to list branches"));
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_remote_status_error() {
        let err = WranglerError::remote_status("https://api.github.com/x", 403);
        assert_eq!(
            err.to_string(),
            "Remote request to https://api.github.com/x failed with status 403"
        );
        assert!(err.is_remote());
    }

    #[test]
    fn test_local_errors_are_not_remote() {
        assert!(!WranglerError::NotInGitRepo.is_remote());
        assert!(!WranglerError::git_command_failed("x").is_remote());
    }

    #[test]
    fn test_unknown_filter_lists_available() {
        let err = WranglerError::unknown_filter("Nope", &["Stale", "PR"]);
        assert_eq!(
            err.to_string(),
            "Unknown filter 'Nope'. Available filters: Stale, PR"
        );
    }

    #[test]
    fn test_config_parse_failed() {
        let path = PathBuf::from("/test/config.json");
        let json_err = serde_json::from_str::<serde_json::Value>("{ invalid json").unwrap_err();
        let err = WranglerError::config_parse_failed(&path, json_err);
        assert!(err.to_string().contains("/test/config.json"));
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_config_read_failed() {
        let path = PathBuf::from("/test/config.json");
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = WranglerError::config_read_failed(&path, io_err);
        assert!(err.to_string().contains("/test/config.json"));
        assert!(err.to_string().contains("access denied"));
    }
}
