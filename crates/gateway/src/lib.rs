/**
 * The typed failure taxonomy every gateway
 *  operation reports through.
 */
pub mod error;
/**
 * The storage gateway capability: the operation
 *  table callers program against, independent of
 *  any concrete backend.
 */
pub mod gateway;
/**
 * Projection of resolved provider state into the
 *  lookup records the rest of the system consumes.
 */
pub mod lookup;
/**
 * Resolution of a permission match into a handle
 *  on the exact target node, walking and
 *  optionally materializing the segments below
 *  the grant root.
 */
pub mod resolve;
/**
 * The grant-backed gateway implementation over a
 *  document store.
 */
pub mod store_gateway;

pub mod prelude {
    pub use crate::error::GatewayError;
    pub use crate::gateway::PathGateway;
    pub use crate::lookup::LookupRecord;
    pub use crate::store_gateway::DocStoreGateway;
}
