//! Cached access to the remote repository.
//!
//! [`CachingRemote`] decorates any [`RemoteRepositoryPort`] with a
//! [`TtlCache`] per operation, keyed by branch name. It is itself a
//! `RemoteRepositoryPort`, so the classifier does not know whether it is
//! talking to the service or to the cache.

use crate::core::{
    error::Result,
    ports::RemoteRepositoryPort,
    state::PullRequest,
    ttl_cache::{Clock, SystemClock, TtlCache},
};
use std::sync::Arc;
use std::time::Duration;

pub struct CachingRemote<R> {
    inner: R,
    pull_requests: TtlCache<String, Vec<PullRequest>>,
    branch_exists: TtlCache<String, bool>,
}

impl<R: RemoteRepositoryPort> CachingRemote<R> {
    pub fn new(inner: R, ttl: Duration) -> Self {
        Self::with_clock(inner, ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(inner: R, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner,
            pull_requests: TtlCache::with_clock(ttl, Arc::clone(&clock)),
            branch_exists: TtlCache::with_clock(ttl, clock),
        }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    pub fn cached_pull_requests(&self, branch: &str) -> Option<Vec<PullRequest>> {
        self.pull_requests.get(&branch.to_string())
    }

    pub fn cached_branch_exists(&self, branch: &str) -> Option<bool> {
        self.branch_exists.get(&branch.to_string())
    }

    /// Seed the pull request answer for `branch`
    pub fn put_pull_requests(&self, branch: impl Into<String>, prs: Vec<PullRequest>) {
        self.pull_requests.put(branch.into(), prs)
    }

    /// Seed the branch-existence answer for `branch`
    pub fn put_branch_exists(&self, branch: impl Into<String>, exists: bool) {
        self.branch_exists.put(branch.into(), exists)
    }

    pub fn cached_entries(&self) -> usize {
        self.pull_requests.len() + self.branch_exists.len()
    }
}

fn cached<V, F>(cache: &TtlCache<String, V>, operation: &str, branch: &str, fetch: F) -> Result<V>
where
    V: Clone,
    F: FnOnce() -> Result<V>,
{
    let mut fetched = false;
    let response = cache.get_or_try_fetch(branch.to_string(), || {
        fetched = true;
        fetch()
    });

    match &response {
        Ok(_) if fetched => log::debug!("Remote cache miss for {operation}:{branch}, fetched"),
        Ok(_) => log::debug!("Remote cache hit for {operation}:{branch}"),
        Err(e) => log::debug!("Remote fetch for {operation}:{branch} failed, not cached: {e}"),
    }
    response
}

impl<R: RemoteRepositoryPort> RemoteRepositoryPort for CachingRemote<R> {
    fn pull_requests_for_branch(&self, branch: &str) -> Result<Vec<PullRequest>> {
        cached(&self.pull_requests, "pr", branch, || {
            self.inner.pull_requests_for_branch(branch)
        })
    }

    fn remote_branch_exists(&self, branch: &str) -> Result<bool> {
        cached(&self.branch_exists, "branch", branch, || {
            self.inner.remote_branch_exists(branch)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::WranglerError;
    use crate::core::state::PullRequestState;
    use crate::core::ttl_cache::{ManualClock, DEFAULT_TTL};
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;

    #[derive(Default)]
    struct CountingRemote {
        prs: HashMap<String, Vec<PullRequest>>,
        failing: RefCell<Vec<String>>,
        pr_calls: Cell<usize>,
        exists_calls: Cell<usize>,
    }

    impl RemoteRepositoryPort for CountingRemote {
        fn pull_requests_for_branch(&self, branch: &str) -> Result<Vec<PullRequest>> {
            self.pr_calls.set(self.pr_calls.get() + 1);
            if self.failing.borrow().iter().any(|b| b == branch) {
                return Err(WranglerError::remote_status("https://api.test/pulls", 502));
            }
            Ok(self.prs.get(branch).cloned().unwrap_or_default())
        }

        fn remote_branch_exists(&self, _branch: &str) -> Result<bool> {
            self.exists_calls.set(self.exists_calls.get() + 1);
            Ok(true)
        }
    }

    fn pr(number: u64) -> PullRequest {
        PullRequest {
            number,
            title: format!("PR {number}"),
            state: PullRequestState::Open,
            draft: false,
            merged: false,
            url: format!("https://github.com/o/r/pull/{number}"),
        }
    }

    #[test]
    fn test_repeated_reads_hit_remote_once() {
        let mut remote = CountingRemote::default();
        remote.prs.insert("feature".to_string(), vec![pr(1), pr(2)]);
        let cached = CachingRemote::new(remote, DEFAULT_TTL);

        let first = cached.pull_requests_for_branch("feature").unwrap();
        let second = cached.pull_requests_for_branch("feature").unwrap();

        assert_eq!(first, second);
        assert_eq!(cached.inner().pr_calls.get(), 1);
    }

    #[test]
    fn test_read_after_ttl_refetches_once() {
        let clock = ManualClock::new();
        let cached = CachingRemote::with_clock(
            CountingRemote::default(),
            Duration::from_secs(900),
            Arc::new(clock.clone()),
        );

        cached.pull_requests_for_branch("feature").unwrap();
        clock.advance(Duration::from_secs(901));
        cached.pull_requests_for_branch("feature").unwrap();
        cached.pull_requests_for_branch("feature").unwrap();

        assert_eq!(cached.inner().pr_calls.get(), 2);
    }

    #[test]
    fn test_operations_are_cached_separately() {
        let cached = CachingRemote::new(CountingRemote::default(), DEFAULT_TTL);

        cached.pull_requests_for_branch("feature").unwrap();
        assert!(cached.remote_branch_exists("feature").unwrap());
        assert!(cached.remote_branch_exists("feature").unwrap());

        assert_eq!(cached.inner().pr_calls.get(), 1);
        assert_eq!(cached.inner().exists_calls.get(), 1);
        assert_eq!(cached.cached_entries(), 2);
        assert_eq!(cached.cached_branch_exists("feature"), Some(true));
        assert_eq!(cached.cached_branch_exists("other"), None);
    }

    #[test]
    fn test_errors_are_retried_not_cached() {
        let remote = CountingRemote::default();
        remote.failing.borrow_mut().push("flaky".to_string());
        let cached = CachingRemote::new(remote, DEFAULT_TTL);

        assert!(cached.pull_requests_for_branch("flaky").is_err());
        assert!(cached.pull_requests_for_branch("flaky").is_err());

        assert_eq!(cached.inner().pr_calls.get(), 2);
        assert_eq!(cached.cached_entries(), 0);
    }

    #[test]
    fn test_put_seeds_the_cache() {
        let cached = CachingRemote::new(CountingRemote::default(), DEFAULT_TTL);
        cached.put_pull_requests("seeded", vec![pr(9)]);
        cached.put_branch_exists("seeded", false);

        let prs = cached.pull_requests_for_branch("seeded").unwrap();
        assert_eq!(prs[0].number, 9);
        assert!(!cached.remote_branch_exists("seeded").unwrap());
        assert_eq!(cached.inner().pr_calls.get(), 0);
        assert_eq!(cached.inner().exists_calls.get(), 0);
    }
}
