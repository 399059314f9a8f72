//! Directory-backed remote for development.
//!
//! [`DirRemote`] treats a local directory as a configuration repository:
//! each top-level subdirectory is a branch, its contents are that branch's
//! tree. A fetch rescans the directory and derives a content hash per
//! branch, so an unchanged branch keeps its commit id and the reference
//! cache skips re-materialization exactly as it would against a real
//! remote. This is what the CLI serves from; it is not a persistence layer.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use walkdir::WalkDir;

use confgit_types::CommitId;
use confgit_vfs::{InMemoryFilesystem, ReadonlyFilesystem};

use crate::auth::AuthMethod;
use crate::error::{RemoteError, RemoteResult};
use crate::transport::ConfigRemote;
use crate::types::{FetchOutcome, RefSpec};

/// A local directory acting as a remote.
pub struct DirRemote {
    url: String,
    root: PathBuf,
    state: Mutex<DirState>,
}

#[derive(Default)]
struct DirState {
    refs: BTreeMap<String, CommitId>,
    trees: HashMap<CommitId, Arc<InMemoryFilesystem>>,
}

impl DirRemote {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            url: format!("dir://{}", root.display()),
            root,
            state: Mutex::new(DirState::default()),
        }
    }
}

#[async_trait]
impl ConfigRemote for DirRemote {
    fn url(&self) -> &str {
        &self.url
    }

    async fn fetch_references(
        &self,
        refspec: &RefSpec,
        _auth: &AuthMethod,
    ) -> RemoteResult<FetchOutcome> {
        let root = self.root.clone();
        let url = self.url.clone();
        let spec = refspec.clone();

        // The scan is synchronous filesystem work; keep it off the runtime.
        let scanned = tokio::task::spawn_blocking(move || scan_branches(&root, &url, &spec))
            .await
            .map_err(|e| RemoteError::Transport {
                url: self.url.clone(),
                reason: format!("scan task failed: {e}"),
            })??;

        let mut state = self.state.lock().expect("lock poisoned");
        if scanned.refs == state.refs {
            return Ok(FetchOutcome::UpToDate);
        }
        tracing::debug!(
            url = %self.url,
            branches = scanned.refs.len(),
            "directory scan observed new reference data"
        );
        state.refs = scanned.refs;
        state.trees.extend(scanned.trees);
        Ok(FetchOutcome::Updated)
    }

    async fn list_references(&self) -> RemoteResult<BTreeMap<String, CommitId>> {
        Ok(self.state.lock().expect("lock poisoned").refs.clone())
    }

    async fn materialize(&self, commit: &CommitId) -> RemoteResult<Arc<dyn ReadonlyFilesystem>> {
        let state = self.state.lock().expect("lock poisoned");
        match state.trees.get(commit) {
            Some(tree) => Ok(Arc::clone(tree) as Arc<dyn ReadonlyFilesystem>),
            None => Err(RemoteError::UnknownCommit { commit: *commit }),
        }
    }
}

struct ScannedBranches {
    refs: BTreeMap<String, CommitId>,
    trees: HashMap<CommitId, Arc<InMemoryFilesystem>>,
}

fn scan_branches(root: &Path, url: &str, refspec: &RefSpec) -> RemoteResult<ScannedBranches> {
    if !root.is_dir() {
        return Err(RemoteError::Transport {
            url: url.to_string(),
            reason: format!("not a directory: {}", root.display()),
        });
    }

    let mut refs = BTreeMap::new();
    let mut trees = HashMap::new();

    for entry in std::fs::read_dir(root)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let branch = entry.file_name().to_string_lossy().into_owned();
        let ref_name = format!("refs/heads/{branch}");
        if !refspec.matches(&ref_name) {
            continue;
        }
        let (commit, tree) = scan_tree(&entry.path())?;
        refs.insert(ref_name, commit);
        trees.insert(commit, Arc::new(tree));
    }

    Ok(ScannedBranches { refs, trees })
}

/// Load one branch directory and derive its content-addressed commit id.
fn scan_tree(branch_dir: &Path) -> RemoteResult<(CommitId, InMemoryFilesystem)> {
    let mut files: Vec<(String, Vec<u8>)> = Vec::new();
    for entry in WalkDir::new(branch_dir).min_depth(1) {
        let entry = entry.map_err(|e| RemoteError::Io(std::io::Error::other(e)))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(branch_dir)
            .map_err(|e| RemoteError::Io(std::io::Error::other(e)))?
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        let contents = std::fs::read(entry.path())?;
        files.push((relative, contents));
    }
    files.sort_by(|(a, _), (b, _)| a.cmp(b));

    let mut fs = InMemoryFilesystem::new();
    let mut digest: Vec<u8> = Vec::new();
    for (path, contents) in &files {
        fs.insert(path, contents)?;
        digest.extend_from_slice(path.as_bytes());
        digest.push(0);
        digest.extend_from_slice(&(contents.len() as u64).to_le_bytes());
        digest.extend_from_slice(contents);
    }
    Ok((CommitId::from_bytes(&digest), fs))
}
