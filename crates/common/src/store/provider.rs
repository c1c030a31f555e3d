use std::fmt::Debug;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncRead, AsyncWrite};

use crate::document::{DocumentId, DocumentKind, Ownership, Permissions, RawStat};

/// Byte-input stream for one document, positioned at offset 0.
pub type DocumentReader = Box<dyn AsyncRead + Send + Unpin>;

/// Byte-output stream for one document. Written bytes are only guaranteed
/// durable once the writer has been shut down; callers own the close on
/// every exit path.
pub type DocumentWriter = Box<dyn AsyncWrite + Send + Unpin>;

/// Point-in-time snapshot of one node in the provider's tree.
///
/// A snapshot is only meaningful for the duration of the operation that
/// produced it; the provider may mutate or delete the node at any time, and
/// later calls against a stale id must fail rather than crash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentNode {
    pub id: DocumentId,
    pub name: String,
    pub kind: DocumentKind,
    pub size: u64,
    pub modified_at: DateTime<Utc>,
    pub readable: bool,
    pub writable: bool,
    /// Raw stat-like metadata, when the provider exposes it.
    pub stat: Option<RawStat>,
}

impl DocumentNode {
    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }

    pub fn is_file(&self) -> bool {
        !self.kind.is_dir()
    }
}

/// The storage provider boundary.
///
/// Given a native identifier a provider can stat the node, walk to children
/// by exact name, list them, create and delete children, open byte streams
/// and rewrite node metadata. The gateway consumes this trait and nothing
/// else about the backend.
#[async_trait]
pub trait DocumentStore: Send + Sync + Debug + Clone + 'static {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Stat a node. `Ok(None)` when the id no longer resolves, e.g. the
    /// node was deleted or renamed out from under the caller.
    async fn node(&self, id: DocumentId) -> Result<Option<DocumentNode>, Self::Error>;

    /// Find a direct child by exact name.
    async fn child(
        &self,
        parent: DocumentId,
        name: &str,
    ) -> Result<Option<DocumentNode>, Self::Error>;

    /// List direct children in provider order.
    async fn children(&self, parent: DocumentId) -> Result<Vec<DocumentNode>, Self::Error>;

    /// Create a child under `parent`. The returned snapshot reports the name
    /// the provider actually assigned, which callers must not assume equals
    /// the requested one.
    async fn create_child(
        &self,
        parent: DocumentId,
        name: &str,
        kind: DocumentKind,
    ) -> Result<DocumentNode, Self::Error>;

    /// Delete a node and everything beneath it.
    ///
    /// # Returns
    /// * `Ok(true)` - the node is gone
    /// * `Ok(false)` - the provider reported failure without raising one
    async fn delete(&self, id: DocumentId) -> Result<bool, Self::Error>;

    /// Open a read stream over a file node.
    async fn open_read(&self, id: DocumentId) -> Result<DocumentReader, Self::Error>;

    /// Open a write stream over a file node, replacing its content once the
    /// stream is shut down.
    async fn open_write(&self, id: DocumentId) -> Result<DocumentWriter, Self::Error>;

    /// Rewrite the node's modification instant. `Ok(false)` when the
    /// provider refuses without raising.
    async fn set_modified_at(
        &self,
        id: DocumentId,
        modified_at: DateTime<Utc>,
    ) -> Result<bool, Self::Error>;

    /// Rewrite the node's permission bits, where supported.
    async fn set_permissions(
        &self,
        id: DocumentId,
        permissions: Permissions,
    ) -> Result<bool, Self::Error>;

    /// Rewrite the node's ownership, where supported.
    async fn set_ownership(
        &self,
        id: DocumentId,
        ownership: Ownership,
    ) -> Result<bool, Self::Error>;
}
