use common::document::{DocumentId, DocumentKind};
use common::grants::GrantMatch;
use common::store::{DocumentNode, DocumentStore};

/// Resolution failure, before translation into the calling operation's
/// error class.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// No grant covers the requested path. Expected, not exceptional.
    #[error("no permission grant covers the path")]
    MissingPermission,
    #[error("grant root {0} no longer exists")]
    GrantRootVanished(DocumentId),
    /// An intermediate segment exists but cannot be descended through.
    #[error("segment {0:?} exists but is not a directory")]
    NotADirectory(String),
    #[error(transparent)]
    Provider(anyhow::Error),
}

impl ResolveError {
    pub(crate) fn provider<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Provider(anyhow::Error::new(error))
    }
}

/// Exclusive handle on one resolved tree node.
///
/// Deliberately not `Clone`: a handle is produced by one resolution, consumed
/// by the operation that asked for it, and discarded. Caching one across
/// calls would go stale the moment the backend mutates.
#[derive(Debug)]
pub struct DocHandle {
    node: Option<DocumentNode>,
}

impl DocHandle {
    pub fn present(node: DocumentNode) -> Self {
        Self { node: Some(node) }
    }

    /// Handle on a path that resolved cleanly but has no node behind it.
    /// Exists so callers can run exists/create checks against paths that are
    /// not there yet.
    pub fn absent() -> Self {
        Self { node: None }
    }

    pub fn exists(&self) -> bool {
        self.node.is_some()
    }

    pub fn node(&self) -> Option<&DocumentNode> {
        self.node.as_ref()
    }

    pub fn into_node(self) -> Option<DocumentNode> {
        self.node
    }
}

/// Walk from the grant root down the missing segments to the target.
///
/// With `create_missing` set, absent intermediate segments are materialized
/// as directories on the way down (deep writes depend on this). Without it,
/// an absent segment short-circuits into an absent handle. Resolving a match
/// with zero missing segments yields the grant root itself and never creates
/// anything.
pub async fn resolve<S: DocumentStore>(
    store: &S,
    grant_match: &GrantMatch,
    create_missing: bool,
) -> Result<DocHandle, ResolveError> {
    let root_id = grant_match.grant.root_id;
    let mut current = store
        .node(root_id)
        .await
        .map_err(ResolveError::provider)?
        .ok_or(ResolveError::GrantRootVanished(root_id))?;

    for segment in &grant_match.missing_segments {
        if !current.is_dir() {
            return Err(ResolveError::NotADirectory(current.name.clone()));
        }
        let found = store
            .child(current.id, segment)
            .await
            .map_err(ResolveError::provider)?;
        current = match found {
            Some(node) => node,
            None if create_missing => {
                tracing::debug!("materializing directory {:?} under {}", segment, current.id);
                store
                    .create_child(current.id, segment, DocumentKind::Directory)
                    .await
                    .map_err(ResolveError::provider)?
            }
            None => return Ok(DocHandle::absent()),
        };
    }
    Ok(DocHandle::present(current))
}
