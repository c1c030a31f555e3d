use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque provider-native identifier for one node in the document tree.
///
/// Identifiers mean nothing to the gateway beyond equality; only the
/// provider that minted one can resolve it back to a node.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for DocumentId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentKind {
    File,
    Directory,
}

impl DocumentKind {
    pub fn is_dir(&self) -> bool {
        matches!(self, DocumentKind::Directory)
    }
}

/// Owning uid/gid pair, as far as the provider reports one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ownership {
    pub uid: u32,
    pub gid: u32,
}

/// Unix-style permission bits, as far as the provider reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permissions {
    pub mode: u32,
}

/// Raw stat-like metadata a provider may optionally expose per node.
/// Absence is normal, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawStat {
    pub uid: u32,
    pub gid: u32,
    pub mode: u32,
}
