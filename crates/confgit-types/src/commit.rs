use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Identifier of a commit on the remote.
///
/// A `CommitId` names a point-in-time state of a branch. For a real
/// version-control remote it is the commit hash the remote reports; for the
/// directory-backed development remote it is derived from the tree contents,
/// so an unchanged tree keeps its id across rescans.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CommitId([u8; 20]);

impl CommitId {
    /// Derive a `CommitId` from raw content. Identical content always
    /// produces the same id.
    pub fn from_bytes(data: &[u8]) -> Self {
        let hash = blake3::hash(data);
        let mut id = [0u8; 20];
        id.copy_from_slice(&hash.as_bytes()[..20]);
        Self(id)
    }

    /// Wrap a pre-computed 20-byte hash.
    pub fn from_hash(hash: [u8; 20]) -> Self {
        Self(hash)
    }

    /// The null commit id (all zeros). Represents "no commit".
    pub const fn null() -> Self {
        Self([0u8; 20])
    }

    /// Returns `true` if this is the null commit id.
    pub fn is_null(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// The raw 20-byte hash.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Hex-encoded string representation.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Short hex representation (first 8 characters).
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..4])
    }

    /// Parse from a hex string.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        if bytes.len() != 20 {
            return Err(TypeError::InvalidLength {
                expected: 20,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 20];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CommitId({})", self.short_hex())
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<[u8; 20]> for CommitId {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl From<CommitId> for [u8; 20] {
    fn from(id: CommitId) -> Self {
        id.0
    }
}
