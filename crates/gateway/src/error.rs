use common::path::ScopedPath;

/// Failure taxonomy for gateway operations.
///
/// Every provider failure surfaces as exactly one of these, carrying the
/// abstract path the operation was called with and the causing error for
/// diagnostics. Nothing is retried inside the gateway.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// No granted root covers the path. Expected for unmanaged paths;
    /// existence and capability checks convert it to `false`, everything
    /// else wraps it into its own failure class.
    #[error("no permission grant covers {path}")]
    MissingPermission { path: ScopedPath },
    #[error("read failed at {path}: {source}")]
    Read {
        path: ScopedPath,
        #[source]
        source: anyhow::Error,
    },
    #[error("write failed at {path}: {source}")]
    Write {
        path: ScopedPath,
        #[source]
        source: anyhow::Error,
    },
    #[error("unsupported operation: {operation}")]
    Unsupported { operation: &'static str },
}

impl GatewayError {
    pub fn missing_permission(path: &ScopedPath) -> Self {
        Self::MissingPermission { path: path.clone() }
    }

    pub fn read(path: &ScopedPath, cause: impl Into<anyhow::Error>) -> Self {
        Self::Read {
            path: path.clone(),
            source: cause.into(),
        }
    }

    pub fn read_message(path: &ScopedPath, message: impl Into<String>) -> Self {
        Self::Read {
            path: path.clone(),
            source: anyhow::anyhow!(message.into()),
        }
    }

    pub fn write(path: &ScopedPath, cause: impl Into<anyhow::Error>) -> Self {
        Self::Write {
            path: path.clone(),
            source: cause.into(),
        }
    }

    pub fn write_message(path: &ScopedPath, message: impl Into<String>) -> Self {
        Self::Write {
            path: path.clone(),
            source: anyhow::anyhow!(message.into()),
        }
    }

    /// The path the failing operation was called with, when one applies.
    pub fn path(&self) -> Option<&ScopedPath> {
        match self {
            Self::MissingPermission { path } => Some(path),
            Self::Read { path, .. } => Some(path),
            Self::Write { path, .. } => Some(path),
            Self::Unsupported { .. } => None,
        }
    }

    /// Whether the cause chain bottoms out in a missing permission.
    pub fn is_missing_permission(&self) -> bool {
        match self {
            Self::MissingPermission { .. } => true,
            Self::Read { source, .. } | Self::Write { source, .. } => source
                .downcast_ref::<GatewayError>()
                .is_some_and(GatewayError::is_missing_permission),
            Self::Unsupported { .. } => false,
        }
    }
}
