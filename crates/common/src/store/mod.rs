mod memory;
mod provider;

pub use memory::{MemoryDocumentStore, MemoryStoreError};
pub use provider::{DocumentNode, DocumentReader, DocumentStore, DocumentWriter};
