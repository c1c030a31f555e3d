use async_trait::async_trait;
use chrono::{DateTime, Utc};

use common::document::{DocumentKind, Ownership, Permissions};
use common::grants::{GrantMatch, GrantProvider};
use common::path::ScopedPath;
use common::store::{DocumentNode, DocumentReader, DocumentStore, DocumentWriter};

use crate::error::GatewayError;
use crate::gateway::PathGateway;
use crate::lookup::LookupRecord;
use crate::resolve::{resolve, DocHandle, ResolveError};

/// Gateway over a grant-scoped document store.
///
/// Every operation resolves the path from scratch: ask the grant provider
/// for the most specific covering grant, walk the store from the grant root
/// down to the target, act on the resulting handle, and translate failures
/// into [`GatewayError`]. No handles or lookups are cached; the backend owns
/// all state and may mutate it between calls.
#[derive(Debug, Clone)]
pub struct DocStoreGateway<G, S> {
    grants: G,
    store: S,
}

impl<G, S> DocStoreGateway<G, S>
where
    G: GrantProvider,
    S: DocumentStore,
{
    pub fn new(grants: G, store: S) -> Self {
        Self { grants, store }
    }

    pub fn grants(&self) -> &G {
        &self.grants
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    async fn match_permission(&self, path: &ScopedPath) -> Result<GrantMatch, ResolveError> {
        let matched = self
            .grants
            .match_permission(path)
            .await
            .map_err(ResolveError::provider)?;
        match matched {
            Some(grant_match) => Ok(grant_match),
            None => {
                tracing::debug!("no permission grant matches {}", path);
                Err(ResolveError::MissingPermission)
            }
        }
    }

    async fn find_handle(
        &self,
        path: &ScopedPath,
        create_missing: bool,
    ) -> Result<DocHandle, ResolveError> {
        let grant_match = self.match_permission(path).await?;
        resolve(&self.store, &grant_match, create_missing).await
    }

    /// Create the leaf of `path` with the requested kind, materializing the
    /// parent chain first. Write-class failures throughout.
    async fn create_document(
        &self,
        path: &ScopedPath,
        kind: DocumentKind,
    ) -> Result<DocumentNode, GatewayError> {
        let grant_match = self
            .match_permission(path)
            .await
            .map_err(|error| as_write_error(path, error))?;
        let Some((leaf, parent_segments)) = grant_match.missing_segments.split_last() else {
            return Err(GatewayError::write_message(
                path,
                "cannot create entries at a grant root",
            ));
        };

        let parent_match = GrantMatch {
            grant: grant_match.grant.clone(),
            missing_segments: parent_segments.to_vec(),
        };
        let parent = resolve(&self.store, &parent_match, true)
            .await
            .map_err(|error| as_write_error(path, error))?
            .into_node()
            .ok_or_else(|| {
                GatewayError::write_message(path, "parent directories could not be materialized")
            })?;
        if !parent.is_dir() {
            return Err(GatewayError::write_message(
                path,
                "parent exists, but is not a directory",
            ));
        }

        // The existence check and the create are two provider round trips;
        // a concurrent create in between surfaces here instead of silently
        // adopting the other caller's node.
        let existing = self
            .store
            .child(parent.id, leaf)
            .await
            .map_err(|error| GatewayError::write(path, error))?;
        if existing.is_some() {
            return Err(GatewayError::write_message(path, "path already exists"));
        }

        let created = self
            .store
            .create_child(parent.id, leaf, kind)
            .await
            .map_err(|error| GatewayError::write(path, error))?;
        if created.name != *leaf {
            tracing::warn!(
                "create at {} returned a renamed node: {:?}",
                path,
                created.name
            );
            return Err(GatewayError::write_message(
                path,
                format!(
                    "unexpected name change: wanted {:?}, got {:?}",
                    leaf, created.name
                ),
            ));
        }
        Ok(created)
    }
}

#[async_trait]
impl<G, S> PathGateway for DocStoreGateway<G, S>
where
    G: GrantProvider,
    S: DocumentStore,
{
    async fn create_file(&self, path: &ScopedPath) -> Result<bool, GatewayError> {
        let handle = self
            .find_handle(path, false)
            .await
            .map_err(|error| as_write_error(path, error))?;
        tracing::debug!("create_file(): {} -> {:?}", path, handle);
        if let Some(node) = handle.node() {
            if node.is_file() {
                return Ok(false);
            }
            return Err(GatewayError::write_message(
                path,
                "path exists, but is not a file",
            ));
        }
        self.create_document(path, DocumentKind::File).await?;
        Ok(true)
    }

    async fn create_dir(&self, path: &ScopedPath) -> Result<bool, GatewayError> {
        let handle = self
            .find_handle(path, false)
            .await
            .map_err(|error| as_write_error(path, error))?;
        tracing::debug!("create_dir(): {} -> {:?}", path, handle);
        if let Some(node) = handle.node() {
            if node.is_dir() {
                return Ok(false);
            }
            return Err(GatewayError::write_message(
                path,
                "path exists, but is not a directory",
            ));
        }
        self.create_document(path, DocumentKind::Directory).await?;
        Ok(true)
    }

    async fn list_files(&self, path: &ScopedPath) -> Result<Vec<ScopedPath>, GatewayError> {
        let handle = self
            .find_handle(path, false)
            .await
            .map_err(|error| as_read_error(path, error))?;
        tracing::debug!("list_files(): {} -> {:?}", path, handle);
        let node = handle
            .into_node()
            .ok_or_else(|| GatewayError::read_message(path, "path does not exist"))?;
        if !node.is_dir() {
            return Err(GatewayError::read_message(path, "path is not a directory"));
        }
        let children = self
            .store
            .children(node.id)
            .await
            .map_err(|error| GatewayError::read(path, error))?;
        Ok(children
            .into_iter()
            .map(|child| path.child(child.name))
            .collect())
    }

    async fn exists(&self, path: &ScopedPath) -> Result<bool, GatewayError> {
        match self.find_handle(path, false).await {
            Ok(handle) => {
                tracing::debug!("exists(): {} -> {}", path, handle.exists());
                Ok(handle.exists())
            }
            Err(ResolveError::MissingPermission) => Ok(false),
            Err(error) => Err(as_read_error(path, error)),
        }
    }

    async fn delete(&self, path: &ScopedPath) -> Result<(), GatewayError> {
        let handle = self
            .find_handle(path, false)
            .await
            .map_err(|error| as_write_error(path, error))?;
        tracing::debug!("delete(): {} -> {:?}", path, handle);
        let node = handle
            .into_node()
            .ok_or_else(|| GatewayError::write_message(path, "path does not exist"))?;
        let deleted = self
            .store
            .delete(node.id)
            .await
            .map_err(|error| GatewayError::write(path, error))?;
        if !deleted {
            tracing::warn!("delete({}) reported failure without raising", path);
            return Err(GatewayError::write_message(
                path,
                "provider delete returned false",
            ));
        }
        Ok(())
    }

    async fn can_read(&self, path: &ScopedPath) -> Result<bool, GatewayError> {
        match self.find_handle(path, false).await {
            Ok(handle) => Ok(handle.node().map(|node| node.readable).unwrap_or(false)),
            Err(ResolveError::MissingPermission) => Ok(false),
            Err(error) => Err(as_read_error(path, error)),
        }
    }

    async fn can_write(&self, path: &ScopedPath) -> Result<bool, GatewayError> {
        match self.find_handle(path, false).await {
            Ok(handle) => Ok(handle.node().map(|node| node.writable).unwrap_or(false)),
            Err(ResolveError::MissingPermission) => Ok(false),
            Err(error) => Err(as_read_error(path, error)),
        }
    }

    async fn lookup(&self, path: &ScopedPath) -> Result<LookupRecord, GatewayError> {
        let handle = self
            .find_handle(path, false)
            .await
            .map_err(|error| as_read_error(path, error))?;
        let node = handle
            .into_node()
            .ok_or_else(|| GatewayError::read_message(path, "path does not exist"))?;
        if !node.readable {
            return Err(GatewayError::read_message(path, "path is not readable"));
        }
        let record = LookupRecord::project(path.clone(), &node);
        tracing::debug!("lookup(): {} -> {:?}", path, record);
        Ok(record)
    }

    async fn lookup_files(&self, path: &ScopedPath) -> Result<Vec<LookupRecord>, GatewayError> {
        let children = self.list_files(path).await?;
        let mut records = Vec::with_capacity(children.len());
        for child in children {
            // One lookup per child; a single failure fails the whole call,
            // attributed to the listed directory.
            let record = self
                .lookup(&child)
                .await
                .map_err(|error| GatewayError::read(path, error))?;
            records.push(record);
        }
        tracing::debug!("lookup_files(): {} -> {} entries", path, records.len());
        Ok(records)
    }

    async fn read(&self, path: &ScopedPath) -> Result<DocumentReader, GatewayError> {
        let handle = self
            .find_handle(path, false)
            .await
            .map_err(|error| as_read_error(path, error))?;
        tracing::debug!("read(): {} -> {:?}", path, handle);
        let node = handle
            .into_node()
            .ok_or_else(|| GatewayError::read_message(path, "path does not exist"))?;
        if !node.readable {
            return Err(GatewayError::read_message(path, "path is not readable"));
        }
        self.store
            .open_read(node.id)
            .await
            .map_err(|error| GatewayError::read(path, error))
    }

    async fn write(&self, path: &ScopedPath) -> Result<DocumentWriter, GatewayError> {
        let handle = self
            .find_handle(path, false)
            .await
            .map_err(|error| as_write_error(path, error))?;
        tracing::debug!("write(): {} -> {:?}", path, handle);
        let node = match handle.into_node() {
            Some(node) => {
                if !node.writable {
                    return Err(GatewayError::write_message(path, "path is not writable"));
                }
                node
            }
            None => self.create_document(path, DocumentKind::File).await?,
        };
        self.store
            .open_write(node.id)
            .await
            .map_err(|error| GatewayError::write(path, error))
    }

    async fn set_modified_at(
        &self,
        path: &ScopedPath,
        modified_at: DateTime<Utc>,
    ) -> Result<bool, GatewayError> {
        let handle = self
            .find_handle(path, false)
            .await
            .map_err(|error| as_write_error(path, error))?;
        tracing::debug!("set_modified_at(): {} -> {:?}", path, handle);
        let node = handle
            .into_node()
            .ok_or_else(|| GatewayError::write_message(path, "path does not exist"))?;
        self.store
            .set_modified_at(node.id, modified_at)
            .await
            .map_err(|error| GatewayError::write(path, error))
    }

    async fn set_permissions(
        &self,
        path: &ScopedPath,
        permissions: Permissions,
    ) -> Result<bool, GatewayError> {
        let handle = self
            .find_handle(path, false)
            .await
            .map_err(|error| as_write_error(path, error))?;
        tracing::debug!("set_permissions(): {} -> {:?}", path, handle);
        let node = handle
            .into_node()
            .ok_or_else(|| GatewayError::write_message(path, "path does not exist"))?;
        self.store
            .set_permissions(node.id, permissions)
            .await
            .map_err(|error| GatewayError::write(path, error))
    }

    async fn set_ownership(
        &self,
        path: &ScopedPath,
        ownership: Ownership,
    ) -> Result<bool, GatewayError> {
        let handle = self
            .find_handle(path, false)
            .await
            .map_err(|error| as_write_error(path, error))?;
        tracing::debug!("set_ownership(): {} -> {:?}", path, handle);
        let node = handle
            .into_node()
            .ok_or_else(|| GatewayError::write_message(path, "path does not exist"))?;
        self.store
            .set_ownership(node.id, ownership)
            .await
            .map_err(|error| GatewayError::write(path, error))
    }

    async fn create_symlink(
        &self,
        link: &ScopedPath,
        target: &ScopedPath,
    ) -> Result<(), GatewayError> {
        tracing::debug!(
            "create_symlink(): {} -> {} rejected, backend has no symlinks",
            link,
            target
        );
        Err(GatewayError::Unsupported {
            operation: "create_symlink",
        })
    }
}

fn as_read_error(path: &ScopedPath, error: ResolveError) -> GatewayError {
    match error {
        ResolveError::MissingPermission => {
            GatewayError::read(path, GatewayError::missing_permission(path))
        }
        other => GatewayError::read(path, other),
    }
}

fn as_write_error(path: &ScopedPath, error: ResolveError) -> GatewayError {
    match error {
        ResolveError::MissingPermission => {
            GatewayError::write(path, GatewayError::missing_permission(path))
        }
        other => GatewayError::write(path, other),
    }
}
