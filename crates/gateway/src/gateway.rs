use async_trait::async_trait;
use chrono::{DateTime, Utc};

use common::document::{Ownership, Permissions};
use common::path::ScopedPath;
use common::store::{DocumentReader, DocumentWriter};

use crate::error::GatewayError;
use crate::lookup::LookupRecord;

/// The storage gateway capability.
///
/// One implementation of this trait exists per backend family; callers
/// depend on the trait alone and address everything by [`ScopedPath`].
/// Implementations hold no mutable state of their own and re-resolve every
/// call from scratch against the externally-mutable backend.
#[async_trait]
pub trait PathGateway: Send + Sync {
    /// Create a file at `path`, materializing missing parent directories.
    ///
    /// # Returns
    /// * `Ok(true)` - the file was created
    /// * `Ok(false)` - a file already exists at the path, untouched
    async fn create_file(&self, path: &ScopedPath) -> Result<bool, GatewayError>;

    /// Create a directory at `path`, materializing missing parents.
    ///
    /// # Returns
    /// * `Ok(true)` - the directory was created
    /// * `Ok(false)` - a directory already exists at the path
    async fn create_dir(&self, path: &ScopedPath) -> Result<bool, GatewayError>;

    /// Child paths of the directory at `path`, in provider listing order.
    async fn list_files(&self, path: &ScopedPath) -> Result<Vec<ScopedPath>, GatewayError>;

    /// Whether a node exists at `path`. A path no grant covers is simply
    /// absent, not an error.
    async fn exists(&self, path: &ScopedPath) -> Result<bool, GatewayError>;

    /// Delete the node at `path` and everything beneath it.
    async fn delete(&self, path: &ScopedPath) -> Result<(), GatewayError>;

    /// Whether the node at `path` can be read. Missing permission or an
    /// absent node both yield `false`.
    async fn can_read(&self, path: &ScopedPath) -> Result<bool, GatewayError>;

    /// Whether the node at `path` can be written.
    async fn can_write(&self, path: &ScopedPath) -> Result<bool, GatewayError>;

    /// Stat the node at `path`. The path must resolve to a readable node.
    async fn lookup(&self, path: &ScopedPath) -> Result<LookupRecord, GatewayError>;

    /// Stat every child of the directory at `path`, in listing order. Any
    /// single child failure fails the whole call.
    async fn lookup_files(&self, path: &ScopedPath) -> Result<Vec<LookupRecord>, GatewayError>;

    /// Open a byte-input stream over the file at `path`, positioned at
    /// offset 0.
    async fn read(&self, path: &ScopedPath) -> Result<DocumentReader, GatewayError>;

    /// Open a byte-output stream over the file at `path`, materializing
    /// missing parents and the file itself if absent. The caller owns the
    /// stream and must shut it down on every exit path.
    async fn write(&self, path: &ScopedPath) -> Result<DocumentWriter, GatewayError>;

    /// Rewrite the modification instant of the node at `path`.
    async fn set_modified_at(
        &self,
        path: &ScopedPath,
        modified_at: DateTime<Utc>,
    ) -> Result<bool, GatewayError>;

    /// Rewrite the permission bits of the node at `path`.
    async fn set_permissions(
        &self,
        path: &ScopedPath,
        permissions: Permissions,
    ) -> Result<bool, GatewayError>;

    /// Rewrite the ownership of the node at `path`.
    async fn set_ownership(
        &self,
        path: &ScopedPath,
        ownership: Ownership,
    ) -> Result<bool, GatewayError>;

    /// Symlinks. Backends without them fail unconditionally.
    async fn create_symlink(
        &self,
        link: &ScopedPath,
        target: &ScopedPath,
    ) -> Result<(), GatewayError>;
}
