use std::fmt::Debug;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::document::DocumentId;
use crate::path::ScopedPath;

/// A tree-scoped authorization: the provider-native identifier of a root
/// node, plus the abstract path that root was granted for. Everything at or
/// beneath the path is reachable through the root identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionGrant {
    pub root_id: DocumentId,
    pub path: ScopedPath,
}

/// The outcome of matching a path against the grant set: the chosen grant
/// and the segments between its root and the requested target, in
/// root-to-leaf order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantMatch {
    pub grant: PermissionGrant,
    pub missing_segments: Vec<String>,
}

impl GrantMatch {
    /// Reconstruct the path this match was produced for. The grant path
    /// extended by the missing segments is always exactly the requested
    /// target.
    pub fn target(&self) -> ScopedPath {
        let mut path = self.grant.path.clone();
        for segment in &self.missing_segments {
            path = path.child(segment.clone());
        }
        path
    }
}

/// Pick the most specific grant covering `path`: among all grants whose path
/// is a prefix of the target, the one with the most segments wins. `None` is
/// the expected outcome for paths no grant covers.
pub fn match_permission(grants: &[PermissionGrant], path: &ScopedPath) -> Option<GrantMatch> {
    grants
        .iter()
        .filter(|grant| grant.path.is_prefix_of(path))
        .max_by_key(|grant| grant.path.segments().len())
        .map(|grant| GrantMatch {
            grant: grant.clone(),
            missing_segments: grant
                .path
                .segments_below(path)
                .unwrap_or_default()
                .to_vec(),
        })
}

/// Read-only view of the currently granted tree-scoped permissions.
///
/// Grant state is owned and mutated elsewhere (a permission-request flow the
/// gateway never invokes); consumers of this trait only observe the current
/// set.
#[async_trait]
pub trait GrantProvider: Send + Sync + Debug + Clone + 'static {
    type Error: std::error::Error + Send + Sync + 'static;

    /// The current grant set, in no particular order.
    async fn grants(&self) -> Result<Vec<PermissionGrant>, Self::Error>;

    /// Resolve `path` against the current grant set.
    ///
    /// # Returns
    /// * `Ok(Some(m))` - the most specific covering grant, with
    ///   `m.target() == *path`
    /// * `Ok(None)` - no grant covers the path
    /// * `Err(Self::Error)` - the grant set could not be read
    async fn match_permission(
        &self,
        path: &ScopedPath,
    ) -> Result<Option<GrantMatch>, Self::Error> {
        Ok(match_permission(&self.grants().await?, path))
    }
}
