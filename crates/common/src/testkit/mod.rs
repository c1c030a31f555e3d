//! Shared helpers for standing up provider instances in tests.
#![allow(dead_code)]

use crate::document::DocumentId;
use crate::grants::{MemoryGrantProvider, PermissionGrant};
use crate::path::ScopedPath;
use crate::store::MemoryDocumentStore;

/// A fresh, empty pair of memory providers.
pub fn providers() -> (MemoryGrantProvider, MemoryDocumentStore) {
    (MemoryGrantProvider::new(), MemoryDocumentStore::new())
}

/// Create a provider root and grant permission on it at `path`, the way the
/// external permission flow would. Returns the native root id.
pub fn grant_tree(
    store: &MemoryDocumentStore,
    grants: &MemoryGrantProvider,
    path: ScopedPath,
) -> DocumentId {
    let root_id = store.create_root(path.name());
    grants
        .grant(PermissionGrant { root_id, path })
        .expect("granting on a memory provider");
    root_id
}
