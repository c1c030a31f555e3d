/**
 * Identifiers and metadata value types shared
 *  across the provider and gateway boundaries.
 */
pub mod document;
/**
 * Tree-scoped permission grants and the logic
 *  for matching an abstract path against the
 *  currently granted roots.
 */
pub mod grants;
/**
 * Abstract hierarchical paths, independent of
 *  any provider-native addressing scheme.
 */
pub mod path;
/**
 * The document store boundary: the operations a
 *  storage provider must expose for the gateway
 *  to resolve and manipulate tree nodes, plus an
 *  in-memory reference implementation.
 */
pub mod store;
/**
 * Helpers for wiring up provider instances in
 *  tests.
 */
pub mod testkit;

pub mod prelude {
    pub use crate::document::{DocumentId, DocumentKind, Ownership, Permissions};
    pub use crate::grants::{GrantMatch, GrantProvider, PermissionGrant};
    pub use crate::path::ScopedPath;
    pub use crate::store::{DocumentNode, DocumentStore};
}
