use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use super::provider::{GrantProvider, PermissionGrant};
use crate::path::ScopedPath;

/// In-memory grant provider backed by a plain list.
///
/// The `grant`/`revoke` methods stand in for the external permission flow
/// that manages grant state in a real deployment; the gateway itself only
/// ever calls the read side.
#[derive(Debug, Clone, Default)]
pub struct MemoryGrantProvider {
    inner: Arc<RwLock<Vec<PermissionGrant>>>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryGrantProviderError {
    #[error("memory grant provider error: {0}")]
    Internal(String),
}

impl MemoryGrantProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a grant, replacing any existing grant for the same path.
    pub fn grant(&self, grant: PermissionGrant) -> Result<(), MemoryGrantProviderError> {
        let mut grants = self.inner.write().map_err(|e| {
            MemoryGrantProviderError::Internal(format!("failed to acquire write lock: {}", e))
        })?;
        grants.retain(|existing| existing.path != grant.path);
        grants.push(grant);
        Ok(())
    }

    /// Drop the grant for `path`, reporting whether one was present.
    pub fn revoke(&self, path: &ScopedPath) -> Result<bool, MemoryGrantProviderError> {
        let mut grants = self.inner.write().map_err(|e| {
            MemoryGrantProviderError::Internal(format!("failed to acquire write lock: {}", e))
        })?;
        let before = grants.len();
        grants.retain(|existing| existing.path != *path);
        Ok(grants.len() != before)
    }
}

#[async_trait]
impl GrantProvider for MemoryGrantProvider {
    type Error = MemoryGrantProviderError;

    async fn grants(&self) -> Result<Vec<PermissionGrant>, Self::Error> {
        let grants = self.inner.read().map_err(|e| {
            MemoryGrantProviderError::Internal(format!("failed to acquire read lock: {}", e))
        })?;
        Ok(grants.clone())
    }
}
