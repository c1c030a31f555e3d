//! Shared test utilities for gateway integration tests
#![allow(dead_code)]

use std::sync::Once;

use common::grants::MemoryGrantProvider;
use common::path::ScopedPath;
use common::store::MemoryDocumentStore;
use common::testkit;
use gateway::store_gateway::DocStoreGateway;

pub type TestGateway = DocStoreGateway<MemoryGrantProvider, MemoryDocumentStore>;

static TRACING: Once = Once::new();

/// Set up a gateway over fresh memory providers, with a single permission
/// grant on `root/A`. Returns the gateway, both providers, and the granted
/// path.
pub fn setup_test_env() -> (
    TestGateway,
    MemoryGrantProvider,
    MemoryDocumentStore,
    ScopedPath,
) {
    TRACING.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init()
            .ok();
    });

    let (grants, store) = testkit::providers();
    let granted = ScopedPath::root("root").child("A");
    testkit::grant_tree(&store, &grants, granted.clone());
    let gateway = DocStoreGateway::new(grants.clone(), store.clone());
    (gateway, grants, store, granted)
}
