//! Capability interfaces the reconciliation core depends on.
//!
//! The classifier never talks to git or to the code-review service directly.
//! It sees the local repository through [`VersionControlPort`] and the remote
//! service through [`RemoteRepositoryPort`], so both can be swapped for
//! in-memory doubles in tests.

use crate::core::{
    error::Result,
    state::{CurrentHead, LocalBranch, PullRequest},
};

/// Local version-control facts. Failures here are load-bearing and abort the
/// branch being classified.
pub trait VersionControlPort {
    fn list_branches(&self) -> Result<Vec<LocalBranch>>;

    fn current_head(&self) -> Result<CurrentHead>;

    /// Commits reachable from `local` but not `remote_ref`, and vice versa
    fn ahead_behind(&self, local: &str, remote_ref: &str) -> Result<(usize, usize)>;

    fn commit_count(&self, branch: &str) -> Result<usize>;

    /// Whether the remote-tracking ref for `branch` still exists locally
    fn remote_ref_exists(&self, branch: &str) -> Result<bool>;

    /// Whether `branch` is reachable from `base`. A missing base is `false`.
    fn is_ancestor_of(&self, branch: &str, base: &str) -> Result<bool>;
}

/// Remote code-review service. Failures here are best-effort and recovered
/// by the classifier.
pub trait RemoteRepositoryPort {
    /// Pull requests headed at `branch`, in the order the service returns them
    fn pull_requests_for_branch(&self, branch: &str) -> Result<Vec<PullRequest>>;

    fn remote_branch_exists(&self, branch: &str) -> Result<bool>;
}

impl<T: VersionControlPort + ?Sized> VersionControlPort for &T {
    fn list_branches(&self) -> Result<Vec<LocalBranch>> {
        (**self).list_branches()
    }

    fn current_head(&self) -> Result<CurrentHead> {
        (**self).current_head()
    }

    fn ahead_behind(&self, local: &str, remote_ref: &str) -> Result<(usize, usize)> {
        (**self).ahead_behind(local, remote_ref)
    }

    fn commit_count(&self, branch: &str) -> Result<usize> {
        (**self).commit_count(branch)
    }

    fn remote_ref_exists(&self, branch: &str) -> Result<bool> {
        (**self).remote_ref_exists(branch)
    }

    fn is_ancestor_of(&self, branch: &str, base: &str) -> Result<bool> {
        (**self).is_ancestor_of(branch, base)
    }
}

impl<T: RemoteRepositoryPort + ?Sized> RemoteRepositoryPort for Box<T> {
    fn pull_requests_for_branch(&self, branch: &str) -> Result<Vec<PullRequest>> {
        (**self).pull_requests_for_branch(branch)
    }

    fn remote_branch_exists(&self, branch: &str) -> Result<bool> {
        (**self).remote_branch_exists(branch)
    }
}
