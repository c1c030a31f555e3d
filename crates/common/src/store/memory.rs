use std::collections::HashMap;
use std::io::Cursor;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tokio::io::AsyncWrite;

use super::provider::{DocumentNode, DocumentReader, DocumentStore, DocumentWriter};
use crate::document::{DocumentId, DocumentKind, Ownership, Permissions, RawStat};

/// In-memory document store.
///
/// Serves as the reference backend for gateway tests. Besides the
/// [`DocumentStore`] contract it exposes provider-side controls (root
/// creation, readable/writable flags, name mangling) that simulate the
/// external mutations and misbehaviors a real backend is allowed to show.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    inner: Arc<Mutex<MemoryStoreInner>>,
}

#[derive(Debug, Default)]
struct MemoryStoreInner {
    nodes: HashMap<DocumentId, NodeState>,
    /// When set, created children get a provider-decorated name instead of
    /// the requested one, the way some backends deduplicate on collision.
    mangle_created_names: bool,
}

#[derive(Debug)]
struct NodeState {
    name: String,
    kind: DocumentKind,
    parent: Option<DocumentId>,
    /// Child ids in creation order; listing order is defined by this.
    children: Vec<DocumentId>,
    data: Bytes,
    modified_at: DateTime<Utc>,
    readable: bool,
    writable: bool,
    stat: Option<RawStat>,
}

impl NodeState {
    fn new(name: String, kind: DocumentKind, parent: Option<DocumentId>) -> Self {
        Self {
            name,
            kind,
            parent,
            children: Vec::new(),
            data: Bytes::new(),
            modified_at: Utc::now(),
            readable: true,
            writable: true,
            stat: None,
        }
    }

    fn snapshot(&self, id: DocumentId) -> DocumentNode {
        DocumentNode {
            id,
            name: self.name.clone(),
            kind: self.kind,
            size: self.data.len() as u64,
            modified_at: self.modified_at,
            readable: self.readable,
            writable: self.writable,
            stat: self.stat,
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryStoreError {
    #[error("document {0} not found")]
    NotFound(DocumentId),
    #[error("document {0} is not a directory")]
    NotADirectory(DocumentId),
    #[error("document {0} is not a file")]
    NotAFile(DocumentId),
    #[error("document {0} is not readable")]
    NotReadable(DocumentId),
    #[error("document {0} is not writable")]
    NotWritable(DocumentId),
    #[error("{0:?} already exists under {1}")]
    AlreadyExists(String, DocumentId),
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached root directory and return its native id. Roots are
    /// what permission grants point at; they have no parent and refuse
    /// deletion.
    pub fn create_root(&self, name: impl Into<String>) -> DocumentId {
        let id = DocumentId::generate();
        let mut inner = self.inner.lock();
        inner
            .nodes
            .insert(id, NodeState::new(name.into(), DocumentKind::Directory, None));
        id
    }

    /// Flip the provider-side readable flag on a node.
    pub fn set_readable(&self, id: DocumentId, readable: bool) -> Result<(), MemoryStoreError> {
        let mut inner = self.inner.lock();
        let node = inner.nodes.get_mut(&id).ok_or(MemoryStoreError::NotFound(id))?;
        node.readable = readable;
        Ok(())
    }

    /// Flip the provider-side writable flag on a node.
    pub fn set_writable(&self, id: DocumentId, writable: bool) -> Result<(), MemoryStoreError> {
        let mut inner = self.inner.lock();
        let node = inner.nodes.get_mut(&id).ok_or(MemoryStoreError::NotFound(id))?;
        node.writable = writable;
        Ok(())
    }

    /// Make subsequent creates return a decorated name, simulating a
    /// backend that renames on creation.
    pub fn set_name_mangling(&self, mangle: bool) {
        self.inner.lock().mangle_created_names = mangle;
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    type Error = MemoryStoreError;

    async fn node(&self, id: DocumentId) -> Result<Option<DocumentNode>, Self::Error> {
        let inner = self.inner.lock();
        Ok(inner.nodes.get(&id).map(|state| state.snapshot(id)))
    }

    async fn child(
        &self,
        parent: DocumentId,
        name: &str,
    ) -> Result<Option<DocumentNode>, Self::Error> {
        let inner = self.inner.lock();
        let state = inner
            .nodes
            .get(&parent)
            .ok_or(MemoryStoreError::NotFound(parent))?;
        if !state.kind.is_dir() {
            return Err(MemoryStoreError::NotADirectory(parent));
        }
        for child_id in &state.children {
            if let Some(child) = inner.nodes.get(child_id) {
                if child.name == name {
                    return Ok(Some(child.snapshot(*child_id)));
                }
            }
        }
        Ok(None)
    }

    async fn children(&self, parent: DocumentId) -> Result<Vec<DocumentNode>, Self::Error> {
        let inner = self.inner.lock();
        let state = inner
            .nodes
            .get(&parent)
            .ok_or(MemoryStoreError::NotFound(parent))?;
        if !state.kind.is_dir() {
            return Err(MemoryStoreError::NotADirectory(parent));
        }
        Ok(state
            .children
            .iter()
            .filter_map(|child_id| inner.nodes.get(child_id).map(|c| c.snapshot(*child_id)))
            .collect())
    }

    async fn create_child(
        &self,
        parent: DocumentId,
        name: &str,
        kind: DocumentKind,
    ) -> Result<DocumentNode, Self::Error> {
        let mut inner = self.inner.lock();
        let parent_state = inner
            .nodes
            .get(&parent)
            .ok_or(MemoryStoreError::NotFound(parent))?;
        if !parent_state.kind.is_dir() {
            return Err(MemoryStoreError::NotADirectory(parent));
        }
        let duplicate = parent_state.children.iter().any(|child_id| {
            inner
                .nodes
                .get(child_id)
                .is_some_and(|child| child.name == name)
        });
        if duplicate {
            return Err(MemoryStoreError::AlreadyExists(name.to_string(), parent));
        }

        let assigned_name = if inner.mangle_created_names {
            format!("{} (1)", name)
        } else {
            name.to_string()
        };
        let id = DocumentId::generate();
        let state = NodeState::new(assigned_name, kind, Some(parent));
        let snapshot = state.snapshot(id);
        inner.nodes.insert(id, state);
        inner
            .nodes
            .get_mut(&parent)
            .expect("parent checked above")
            .children
            .push(id);
        tracing::debug!("created {:?} {} under {}", kind, snapshot.name, parent);
        Ok(snapshot)
    }

    async fn delete(&self, id: DocumentId) -> Result<bool, Self::Error> {
        let mut inner = self.inner.lock();
        let state = inner.nodes.get(&id).ok_or(MemoryStoreError::NotFound(id))?;
        let parent = match state.parent {
            Some(parent) => parent,
            // Roots are the anchor of a grant; refuse without raising.
            None => return Ok(false),
        };

        let mut doomed = vec![id];
        let mut index = 0;
        while index < doomed.len() {
            let next = doomed[index];
            if let Some(state) = inner.nodes.get(&next) {
                doomed.extend(state.children.iter().copied());
            }
            index += 1;
        }
        for doomed_id in &doomed {
            inner.nodes.remove(doomed_id);
        }
        if let Some(parent_state) = inner.nodes.get_mut(&parent) {
            parent_state.children.retain(|child_id| *child_id != id);
        }
        Ok(true)
    }

    async fn open_read(&self, id: DocumentId) -> Result<DocumentReader, Self::Error> {
        let inner = self.inner.lock();
        let state = inner.nodes.get(&id).ok_or(MemoryStoreError::NotFound(id))?;
        if state.kind.is_dir() {
            return Err(MemoryStoreError::NotAFile(id));
        }
        if !state.readable {
            return Err(MemoryStoreError::NotReadable(id));
        }
        Ok(Box::new(Cursor::new(state.data.clone())))
    }

    async fn open_write(&self, id: DocumentId) -> Result<DocumentWriter, Self::Error> {
        let inner = self.inner.lock();
        let state = inner.nodes.get(&id).ok_or(MemoryStoreError::NotFound(id))?;
        if state.kind.is_dir() {
            return Err(MemoryStoreError::NotAFile(id));
        }
        if !state.writable {
            return Err(MemoryStoreError::NotWritable(id));
        }
        Ok(Box::new(MemoryDocWriter {
            inner: self.inner.clone(),
            id,
            buf: Vec::new(),
            committed: false,
        }))
    }

    async fn set_modified_at(
        &self,
        id: DocumentId,
        modified_at: DateTime<Utc>,
    ) -> Result<bool, Self::Error> {
        let mut inner = self.inner.lock();
        let node = inner.nodes.get_mut(&id).ok_or(MemoryStoreError::NotFound(id))?;
        node.modified_at = modified_at;
        Ok(true)
    }

    async fn set_permissions(
        &self,
        id: DocumentId,
        permissions: Permissions,
    ) -> Result<bool, Self::Error> {
        let mut inner = self.inner.lock();
        let node = inner.nodes.get_mut(&id).ok_or(MemoryStoreError::NotFound(id))?;
        let stat = node.stat.get_or_insert(RawStat {
            uid: 0,
            gid: 0,
            mode: 0,
        });
        stat.mode = permissions.mode;
        Ok(true)
    }

    async fn set_ownership(
        &self,
        id: DocumentId,
        ownership: Ownership,
    ) -> Result<bool, Self::Error> {
        let mut inner = self.inner.lock();
        let node = inner.nodes.get_mut(&id).ok_or(MemoryStoreError::NotFound(id))?;
        let stat = node.stat.get_or_insert(RawStat {
            uid: 0,
            gid: 0,
            mode: 0,
        });
        stat.uid = ownership.uid;
        stat.gid = ownership.gid;
        Ok(true)
    }
}

/// Buffering writer over one file node. Bytes land in the store when the
/// writer is shut down; a writer dropped without shutdown commits nothing.
struct MemoryDocWriter {
    inner: Arc<Mutex<MemoryStoreInner>>,
    id: DocumentId,
    buf: Vec<u8>,
    committed: bool,
}

impl AsyncWrite for MemoryDocWriter {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<Result<usize, std::io::Error>> {
        let writer = self.get_mut();
        writer.buf.extend_from_slice(buf);
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
    ) -> Poll<Result<(), std::io::Error>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
    ) -> Poll<Result<(), std::io::Error>> {
        let writer = self.get_mut();
        if !writer.committed {
            let mut inner = writer.inner.lock();
            match inner.nodes.get_mut(&writer.id) {
                Some(node) => {
                    node.data = Bytes::from(std::mem::take(&mut writer.buf));
                    node.modified_at = Utc::now();
                    writer.committed = true;
                }
                // Node vanished mid-write; the stream fails instead of
                // resurrecting it.
                None => {
                    return Poll::Ready(Err(std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        format!("document {} no longer exists", writer.id),
                    )))
                }
            }
        }
        Poll::Ready(Ok(()))
    }
}
