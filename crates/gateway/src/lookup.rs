use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use common::document::{DocumentKind, Ownership, Permissions};
use common::path::ScopedPath;
use common::store::DocumentNode;

/// Point-in-time metadata snapshot of a looked-up path.
///
/// Produced fresh on every lookup, never cached by the gateway. Ownership
/// and permission bits are present only when the provider exposes raw stat
/// metadata; `target` is reserved for backends with symlinks and stays
/// `None` here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupRecord {
    pub looked_up: ScopedPath,
    pub kind: DocumentKind,
    pub modified_at: DateTime<Utc>,
    pub ownership: Option<Ownership>,
    pub permissions: Option<Permissions>,
    pub size: u64,
    pub target: Option<ScopedPath>,
}

impl LookupRecord {
    /// Project a resolved node's raw state into the structured record.
    pub fn project(looked_up: ScopedPath, node: &DocumentNode) -> Self {
        let kind = if node.is_dir() {
            DocumentKind::Directory
        } else {
            DocumentKind::File
        };
        Self {
            looked_up,
            kind,
            modified_at: node.modified_at,
            ownership: node.stat.map(|stat| Ownership {
                uid: stat.uid,
                gid: stat.gid,
            }),
            permissions: node.stat.map(|stat| Permissions { mode: stat.mode }),
            size: node.size,
            target: None,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }
}
