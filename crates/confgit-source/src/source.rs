//! The environment-scoped reference cache.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Mutex;

use confgit_remote::{ConfigRemote, RemoteError};
use confgit_vfs::{ReadonlyFile, ReadonlyFilesystem};

use crate::error::{SourceError, SourceResult};
use crate::names;
use crate::options::SourceOptions;
use crate::snapshot::{Checkout, RefSnapshot};

/// The very first fetch tolerates cold-start latency (empty local storage,
/// full reference download) by extending the per-attempt deadline.
const FIRST_FETCH_TIMEOUT_FACTOR: u32 = 10;

/// A read-through cache of one remote's branch references.
///
/// One instance per remote URL. All consistency state lives behind a single
/// mutex: the freshness check, the fetch, the reference bookkeeping, and the
/// checkout all run under it, so concurrent callers observing a stale TTL
/// collapse onto one remote round-trip and a checkout can never race a
/// fetch that is rewriting the reference data it depends on.
///
/// Fetch and checkout both await remote I/O while holding the lock; callers
/// bound that with their own deadline and may cancel by dropping the future,
/// which releases the lock at the pending await point.
pub struct ConfigSource {
    remote: Arc<dyn ConfigRemote>,
    options: SourceOptions,
    state: Mutex<SourceState>,
}

struct SourceState {
    /// Active environment. A single selection per source instance; switching
    /// applies to subsequent calls on this instance.
    environment: String,
    /// True once any fetch has successfully updated reference data. Never
    /// reverts; gates the stale-fallback policy.
    initialized: bool,
    /// Time of the last fetch attempt, successful or not.
    last_sync: Option<Instant>,
    /// Fully-qualified reference name → snapshot.
    snapshots: HashMap<String, RefSnapshot>,
}

impl ConfigSource {
    pub fn new(remote: Arc<dyn ConfigRemote>, options: SourceOptions) -> Self {
        let environment = options.environment.clone();
        Self {
            remote,
            options,
            state: Mutex::new(SourceState {
                environment,
                initialized: false,
                last_sync: None,
                snapshots: HashMap::new(),
            }),
        }
    }

    /// Select `environment` and return its materialized filesystem,
    /// fetching and checking out as the consistency policy requires.
    pub async fn filesystem_for(
        &self,
        environment: &str,
    ) -> SourceResult<Arc<dyn ReadonlyFilesystem>> {
        names::validate_environment_name(environment)?;
        let mut state = self.state.lock().await;
        state.environment = environment.to_string();
        self.filesystem_locked(&mut state).await
    }

    /// The materialized filesystem for the currently selected environment.
    pub async fn filesystem(&self) -> SourceResult<Arc<dyn ReadonlyFilesystem>> {
        let mut state = self.state.lock().await;
        self.filesystem_locked(&mut state).await
    }

    /// Open the file backing a logical namespace in the current
    /// environment: namespace `"default"` resolves to `"default.<ext>"` at
    /// the tree root.
    pub async fn open_namespace(&self, namespace: &str) -> SourceResult<Box<dyn ReadonlyFile>> {
        let path = self.namespace_path(namespace);
        let filesystem = self.filesystem().await?;
        filesystem
            .open(&path)
            .map_err(|source| SourceError::FileNotFound { path, source })
    }

    /// The currently selected environment name. Accessor only.
    pub async fn environment(&self) -> String {
        self.state.lock().await.environment.clone()
    }

    /// Short names of every known environment, sorted. Refreshes reference
    /// data first under the same policy as [`filesystem`].
    ///
    /// [`filesystem`]: ConfigSource::filesystem
    pub async fn environments(&self) -> SourceResult<Vec<String>> {
        let mut state = self.state.lock().await;
        self.sync_references(&mut state).await?;
        let mut environments: Vec<String> = state
            .snapshots
            .keys()
            .filter_map(|name| names::environment_name(name))
            .map(str::to_string)
            .collect();
        environments.sort();
        Ok(environments)
    }

    /// The filename a namespace resolves to.
    pub fn namespace_path(&self, namespace: &str) -> String {
        format!("{namespace}.{}", self.options.file_extension)
    }

    /// Identity of the remote this source reads from.
    pub fn remote_url(&self) -> &str {
        self.remote.url()
    }

    async fn filesystem_locked(
        &self,
        state: &mut SourceState,
    ) -> SourceResult<Arc<dyn ReadonlyFilesystem>> {
        self.sync_references(state).await?;

        let environment = state.environment.clone();
        let ref_name = names::branch_ref(&environment);
        let snapshot = state
            .snapshots
            .get(&ref_name)
            .ok_or_else(|| SourceError::EnvironmentNotFound {
                environment: environment.clone(),
            })?;

        // Checkout only when the local materialization is provably stale.
        if let Some(checkout) = snapshot.current_checkout() {
            return Ok(Arc::clone(&checkout.filesystem));
        }

        let commit = snapshot.remote_commit;
        let filesystem =
            self.remote
                .materialize(&commit)
                .await
                .map_err(|source| SourceError::CheckoutFailed {
                    environment: environment.clone(),
                    commit,
                    source,
                })?;
        tracing::info!(
            environment = %environment,
            commit = %commit.short_hex(),
            "checked out environment"
        );

        if let Some(snapshot) = state.snapshots.get_mut(&ref_name) {
            snapshot.checkout = Some(Checkout {
                commit,
                filesystem: Arc::clone(&filesystem),
            });
        }
        Ok(filesystem)
    }

    /// Refresh reference data when the TTL has lapsed.
    ///
    /// Must run under the state lock: the TTL re-check and the snapshot
    /// replacement are one critical section. A cold cache bypasses the TTL
    /// gate entirely so a failed first fetch reports as a fetch failure on
    /// every call until one succeeds.
    async fn sync_references(&self, state: &mut SourceState) -> SourceResult<()> {
        if state.initialized {
            if let Some(last_sync) = state.last_sync {
                if last_sync.elapsed() < self.options.fetch_ttl {
                    return Ok(());
                }
            }
        }

        let deadline = if state.initialized {
            self.options.fetch_timeout
        } else {
            self.options.fetch_timeout * FIRST_FETCH_TIMEOUT_FACTOR
        };

        let fetched = match tokio::time::timeout(
            deadline,
            self.remote
                .fetch_references(&self.options.refspec, &self.options.auth),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(RemoteError::TimedOut { after: deadline }),
        };
        let refreshed = match fetched {
            Ok(outcome) => self.remote.list_references().await.map(|refs| (outcome, refs)),
            Err(err) => Err(err),
        };

        // Attempted fetches count against the TTL, throttling retries
        // during an outage to one per window.
        state.last_sync = Some(Instant::now());

        match refreshed {
            Ok((outcome, refs)) => {
                // Wholesale replacement: a new map is published, existing
                // checkouts carried over for references that survived.
                // References deleted on the remote drop out here.
                let mut next = HashMap::with_capacity(refs.len());
                for (name, remote_commit) in refs {
                    let checkout = state
                        .snapshots
                        .get(&name)
                        .and_then(|s| s.checkout.clone());
                    next.insert(name, RefSnapshot::advanced_to(remote_commit, checkout));
                }
                state.snapshots = next;
                state.initialized = true;
                tracing::debug!(
                    url = %self.remote.url(),
                    outcome = ?outcome,
                    references = state.snapshots.len(),
                    "reference fetch succeeded"
                );
                Ok(())
            }
            Err(err) if state.initialized => {
                tracing::warn!(
                    url = %self.remote.url(),
                    error = %err,
                    "fetch failed, serving last known reference data"
                );
                Ok(())
            }
            Err(source) => Err(SourceError::FetchFailed {
                url: self.remote.url().to_string(),
                source,
            }),
        }
    }
}

impl std::fmt::Debug for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigSource")
            .field("remote", &self.remote.url())
            .field("fetch_ttl", &self.options.fetch_ttl)
            .field("fetch_timeout", &self.options.fetch_timeout)
            .finish()
    }
}
