use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;

use confgit_types::CommitId;
use confgit_vfs::ReadonlyFilesystem;

use crate::auth::AuthMethod;
use crate::error::RemoteResult;
use crate::types::{FetchOutcome, RefSpec};

/// Capability interface onto a remote configuration repository.
///
/// Implementations must be thread-safe (`Send + Sync`); one instance serves
/// every concurrent caller of the reference cache. All three operations must
/// be cancel-safe: callers impose deadlines by wrapping the returned futures
/// and may drop them at any await point.
#[async_trait]
pub trait ConfigRemote: Send + Sync {
    /// Human-readable identity of the remote (URL or equivalent).
    fn url(&self) -> &str;

    /// Contact the remote and refresh the tracked reference data for every
    /// reference matching `refspec`.
    ///
    /// A remote with nothing new reports [`FetchOutcome::UpToDate`] as
    /// success. The credential is passed through verbatim.
    async fn fetch_references(
        &self,
        refspec: &RefSpec,
        auth: &AuthMethod,
    ) -> RemoteResult<FetchOutcome>;

    /// The reference → commit mapping observed by the last successful fetch,
    /// keyed by fully-qualified reference name (e.g. `refs/heads/master`).
    ///
    /// Reads tracked state only; never contacts the network.
    async fn list_references(&self) -> RemoteResult<BTreeMap<String, CommitId>>;

    /// Materialize the tree for a commit as a read-only filesystem.
    ///
    /// This is the expensive operation the cache avoids whenever the
    /// locally materialized commit already matches the remote head.
    async fn materialize(&self, commit: &CommitId) -> RemoteResult<Arc<dyn ReadonlyFilesystem>>;
}
