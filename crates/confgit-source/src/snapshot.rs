use std::sync::Arc;

use confgit_types::CommitId;
use confgit_vfs::ReadonlyFilesystem;

/// A materialized tree paired with the commit it was produced from.
///
/// Pairing the two in one value is what upholds the cache invariant: a
/// snapshot either has no local materialization at all, or it has a
/// filesystem *and* knows exactly which commit that filesystem represents.
#[derive(Clone)]
pub struct Checkout {
    pub commit: CommitId,
    pub filesystem: Arc<dyn ReadonlyFilesystem>,
}

/// The cache's record of one branch reference.
///
/// `remote_commit` is refreshed wholesale on every successful fetch; the
/// checkout is replaced (never mutated) when the branch is materialized.
/// A checkout from a superseded commit stays valid for handles already
/// returned to callers.
#[derive(Clone)]
pub struct RefSnapshot {
    /// Head commit observed by the last successful fetch.
    pub remote_commit: CommitId,
    /// Locally materialized state, if any.
    pub checkout: Option<Checkout>,
}

impl RefSnapshot {
    /// A freshly observed reference with no local materialization yet.
    pub fn new(remote_commit: CommitId) -> Self {
        Self {
            remote_commit,
            checkout: None,
        }
    }

    /// Carry an existing checkout under a refreshed remote head.
    pub fn advanced_to(remote_commit: CommitId, checkout: Option<Checkout>) -> Self {
        Self {
            remote_commit,
            checkout,
        }
    }

    /// Whether the local materialization matches the remote head (no
    /// checkout needed).
    pub fn is_current(&self) -> bool {
        self.current_checkout().is_some()
    }

    /// The checkout, but only when it matches the remote head.
    pub fn current_checkout(&self) -> Option<&Checkout> {
        self.checkout
            .as_ref()
            .filter(|c| c.commit == self.remote_commit)
    }
}

impl std::fmt::Debug for RefSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefSnapshot")
            .field("remote_commit", &self.remote_commit)
            .field(
                "local_commit",
                &self.checkout.as_ref().map(|c| c.commit),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use confgit_vfs::InMemoryFilesystem;

    fn tree() -> Arc<dyn ReadonlyFilesystem> {
        Arc::new(InMemoryFilesystem::new())
    }

    #[test]
    fn fresh_snapshot_is_not_current() {
        let snapshot = RefSnapshot::new(CommitId::from_bytes(b"head"));
        assert!(!snapshot.is_current());
        assert!(snapshot.current_checkout().is_none());
    }

    #[test]
    fn matching_checkout_is_current() {
        let head = CommitId::from_bytes(b"head");
        let snapshot = RefSnapshot::advanced_to(
            head,
            Some(Checkout {
                commit: head,
                filesystem: tree(),
            }),
        );
        assert!(snapshot.is_current());
    }

    #[test]
    fn advanced_head_makes_checkout_stale() {
        let old = CommitId::from_bytes(b"old");
        let new = CommitId::from_bytes(b"new");
        let snapshot = RefSnapshot::advanced_to(
            new,
            Some(Checkout {
                commit: old,
                filesystem: tree(),
            }),
        );
        assert!(!snapshot.is_current());
        // The stale checkout is still carried; only its currency changed.
        assert!(snapshot.checkout.is_some());
    }

    #[test]
    fn debug_shows_both_commits() {
        let head = CommitId::from_bytes(b"head");
        let snapshot = RefSnapshot::new(head);
        let debug = format!("{snapshot:?}");
        assert!(debug.contains("remote_commit"));
        assert!(debug.contains("local_commit"));
    }
}
