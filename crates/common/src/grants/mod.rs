mod memory;
mod provider;

pub use memory::{MemoryGrantProvider, MemoryGrantProviderError};
pub use provider::{match_permission, GrantMatch, GrantProvider, PermissionGrant};
