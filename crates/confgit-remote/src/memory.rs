//! In-memory remote for unit tests.
//!
//! [`InMemoryRemote`] is a scriptable [`ConfigRemote`]: tests seed branches
//! with file trees, advance or break them mid-test, and assert on fetch and
//! materialization call counts. The reference cache's entire contract (TTL
//! gate, stale fallback, checkout skip) is observable through those
//! counters without any network or real repository.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use confgit_types::CommitId;
use confgit_vfs::{InMemoryFilesystem, ReadonlyFilesystem};

use crate::auth::AuthMethod;
use crate::error::{RemoteError, RemoteResult};
use crate::transport::ConfigRemote;
use crate::types::{FetchOutcome, RefSpec};

/// A scriptable in-memory remote.
pub struct InMemoryRemote {
    url: String,
    state: Mutex<RemoteState>,
    fetch_calls: AtomicUsize,
    materialize_calls: AtomicUsize,
}

#[derive(Default)]
struct RemoteState {
    /// What the remote currently serves, keyed by fully-qualified ref name.
    branches: BTreeMap<String, CommitId>,
    trees: HashMap<CommitId, Arc<InMemoryFilesystem>>,
    /// References observed by the last successful fetch.
    tracked: BTreeMap<String, CommitId>,
    fail_fetch: bool,
    fail_materialize: bool,
    fetch_delay: Option<Duration>,
}

impl InMemoryRemote {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            state: Mutex::new(RemoteState::default()),
            fetch_calls: AtomicUsize::new(0),
            materialize_calls: AtomicUsize::new(0),
        }
    }

    /// Create or advance a branch to a tree built from `files`
    /// (path, contents) pairs. Returns the commit id of the new head.
    pub fn set_branch(&self, environment: &str, files: &[(&str, &str)]) -> CommitId {
        let mut sorted: Vec<(&str, &str)> = files.to_vec();
        sorted.sort_by_key(|(path, _)| *path);

        let mut fs = InMemoryFilesystem::new();
        let mut digest: Vec<u8> = Vec::new();
        for (path, contents) in &sorted {
            fs.insert(path, contents).expect("test tree path");
            digest.extend_from_slice(path.as_bytes());
            digest.push(0);
            digest.extend_from_slice(&(contents.len() as u64).to_le_bytes());
            digest.extend_from_slice(contents.as_bytes());
        }
        let commit = CommitId::from_bytes(&digest);

        let mut state = self.state.lock().expect("lock poisoned");
        state.trees.insert(commit, Arc::new(fs));
        state
            .branches
            .insert(format!("refs/heads/{environment}"), commit);
        commit
    }

    /// Delete a branch from the remote.
    pub fn remove_branch(&self, environment: &str) {
        let mut state = self.state.lock().expect("lock poisoned");
        state.branches.remove(&format!("refs/heads/{environment}"));
    }

    /// Make subsequent fetches fail until cleared.
    pub fn set_failing_fetch(&self, failing: bool) {
        self.state.lock().expect("lock poisoned").fail_fetch = failing;
    }

    /// Make subsequent materializations fail until cleared.
    pub fn set_failing_materialize(&self, failing: bool) {
        self.state.lock().expect("lock poisoned").fail_materialize = failing;
    }

    /// Delay every fetch by `delay` (simulated network latency).
    pub fn set_fetch_delay(&self, delay: Option<Duration>) {
        self.state.lock().expect("lock poisoned").fetch_delay = delay;
    }

    /// Number of fetch attempts observed (including failed ones).
    pub fn fetch_count(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    /// Number of materialization attempts observed.
    pub fn materialize_count(&self) -> usize {
        self.materialize_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConfigRemote for InMemoryRemote {
    fn url(&self) -> &str {
        &self.url
    }

    async fn fetch_references(
        &self,
        refspec: &RefSpec,
        _auth: &AuthMethod,
    ) -> RemoteResult<FetchOutcome> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);

        let (delay, failing) = {
            let state = self.state.lock().expect("lock poisoned");
            (state.fetch_delay, state.fail_fetch)
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if failing {
            return Err(RemoteError::Transport {
                url: self.url.clone(),
                reason: "injected fetch failure".into(),
            });
        }

        let mut state = self.state.lock().expect("lock poisoned");
        let observed: BTreeMap<String, CommitId> = state
            .branches
            .iter()
            .filter(|(name, _)| refspec.matches(name))
            .map(|(name, commit)| (name.clone(), *commit))
            .collect();
        if observed == state.tracked {
            return Ok(FetchOutcome::UpToDate);
        }
        state.tracked = observed;
        Ok(FetchOutcome::Updated)
    }

    async fn list_references(&self) -> RemoteResult<BTreeMap<String, CommitId>> {
        Ok(self.state.lock().expect("lock poisoned").tracked.clone())
    }

    async fn materialize(&self, commit: &CommitId) -> RemoteResult<Arc<dyn ReadonlyFilesystem>> {
        self.materialize_calls.fetch_add(1, Ordering::SeqCst);

        let state = self.state.lock().expect("lock poisoned");
        if state.fail_materialize {
            return Err(RemoteError::Transport {
                url: self.url.clone(),
                reason: "injected materialize failure".into(),
            });
        }
        match state.trees.get(commit) {
            Some(tree) => Ok(Arc::clone(tree) as Arc<dyn ReadonlyFilesystem>),
            None => Err(RemoteError::UnknownCommit { commit: *commit }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remote() -> InMemoryRemote {
        let r = InMemoryRemote::new("mem://config");
        r.set_branch("master", &[("default.jsonnet", "{}")]);
        r.set_branch("test", &[("default.jsonnet", "{\"env\":\"test\"}")]);
        r
    }

    #[tokio::test]
    async fn fetch_then_list() {
        let r = remote();
        let outcome = r
            .fetch_references(&RefSpec::all_branches(), &AuthMethod::Anonymous)
            .await
            .unwrap();
        assert_eq!(outcome, FetchOutcome::Updated);

        let refs = r.list_references().await.unwrap();
        assert_eq!(refs.len(), 2);
        assert!(refs.contains_key("refs/heads/master"));
        assert!(refs.contains_key("refs/heads/test"));
    }

    #[tokio::test]
    async fn list_before_fetch_is_empty() {
        let r = remote();
        assert!(r.list_references().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn second_fetch_is_up_to_date() {
        let r = remote();
        let spec = RefSpec::all_branches();
        r.fetch_references(&spec, &AuthMethod::Anonymous).await.unwrap();
        let outcome = r.fetch_references(&spec, &AuthMethod::Anonymous).await.unwrap();
        assert_eq!(outcome, FetchOutcome::UpToDate);
        assert_eq!(r.fetch_count(), 2);
    }

    #[tokio::test]
    async fn advancing_a_branch_changes_its_commit() {
        let r = remote();
        let spec = RefSpec::all_branches();
        r.fetch_references(&spec, &AuthMethod::Anonymous).await.unwrap();
        let before = r.list_references().await.unwrap()["refs/heads/master"];

        r.set_branch("master", &[("default.jsonnet", "{\"v\":2}")]);
        let outcome = r.fetch_references(&spec, &AuthMethod::Anonymous).await.unwrap();
        assert_eq!(outcome, FetchOutcome::Updated);
        let after = r.list_references().await.unwrap()["refs/heads/master"];
        assert_ne!(before, after);
    }

    #[tokio::test]
    async fn materialize_known_commit() {
        let r = remote();
        let commit = r.set_branch("master", &[("app.jsonnet", "{\"a\":1}")]);
        let fs = r.materialize(&commit).await.unwrap();
        assert_eq!(fs.read_to_string("app.jsonnet").unwrap(), "{\"a\":1}");
        assert_eq!(r.materialize_count(), 1);
    }

    #[tokio::test]
    async fn materialize_unknown_commit() {
        let r = remote();
        let err = r.materialize(&CommitId::null()).await.unwrap_err();
        assert!(matches!(err, RemoteError::UnknownCommit { .. }));
    }

    #[tokio::test]
    async fn injected_fetch_failure() {
        let r = remote();
        r.set_failing_fetch(true);
        let err = r
            .fetch_references(&RefSpec::all_branches(), &AuthMethod::Anonymous)
            .await
            .unwrap_err();
        assert!(matches!(err, RemoteError::Transport { .. }));
        // Failed attempts still count.
        assert_eq!(r.fetch_count(), 1);
    }

    #[tokio::test]
    async fn refspec_filters_observed_refs() {
        let r = remote();
        r.fetch_references(&RefSpec::new("refs/heads/master"), &AuthMethod::Anonymous)
            .await
            .unwrap();
        let refs = r.list_references().await.unwrap();
        assert_eq!(refs.len(), 1);
        assert!(refs.contains_key("refs/heads/master"));
    }
}
