//! Tests for permission grant matching

use common::document::DocumentId;
use common::grants::{match_permission, GrantProvider, MemoryGrantProvider, PermissionGrant};
use common::path::ScopedPath;

fn grant(path: &ScopedPath) -> PermissionGrant {
    PermissionGrant {
        root_id: DocumentId::generate(),
        path: path.clone(),
    }
}

#[test]
fn test_longest_prefix_wins() {
    let root = ScopedPath::root("root");
    let a = root.child("A");
    let ab = a.child("B");
    let grants = vec![grant(&root), grant(&ab), grant(&a)];

    let target = ab.child("C").child("d.txt");
    let matched = match_permission(&grants, &target).unwrap();

    assert_eq!(matched.grant.path, ab);
    assert_eq!(matched.missing_segments, ["C", "d.txt"]);
}

#[test]
fn test_match_reconstructs_target() {
    let a = ScopedPath::root("root").child("A");
    let grants = vec![grant(&a)];

    let target = a.child("B").child("C");
    let matched = match_permission(&grants, &target).unwrap();

    assert_eq!(matched.target(), target);
}

#[test]
fn test_exact_match_has_no_missing_segments() {
    let a = ScopedPath::root("root").child("A");
    let grants = vec![grant(&a)];

    let matched = match_permission(&grants, &a).unwrap();
    assert!(matched.missing_segments.is_empty());
    assert_eq!(matched.target(), a);
}

#[test]
fn test_no_covering_grant() {
    let grants = vec![grant(&ScopedPath::root("root").child("A"))];

    assert!(match_permission(&grants, &ScopedPath::root("root").child("Z")).is_none());
    assert!(match_permission(&grants, &ScopedPath::root("other").child("A")).is_none());
    // A grant never covers its own ancestors.
    assert!(match_permission(&grants, &ScopedPath::root("root")).is_none());
}

#[tokio::test]
async fn test_memory_provider_grant_and_revoke() {
    let provider = MemoryGrantProvider::new();
    let a = ScopedPath::root("root").child("A");
    provider.grant(grant(&a)).unwrap();

    let target = a.child("f.txt");
    assert!(provider.match_permission(&target).await.unwrap().is_some());

    assert!(provider.revoke(&a).unwrap());
    assert!(provider.match_permission(&target).await.unwrap().is_none());
    assert!(!provider.revoke(&a).unwrap());
}

#[tokio::test]
async fn test_regranting_a_path_replaces_the_grant() {
    let provider = MemoryGrantProvider::new();
    let a = ScopedPath::root("root").child("A");
    let replacement = grant(&a);
    provider.grant(grant(&a)).unwrap();
    provider.grant(replacement.clone()).unwrap();

    let grants = provider.grants().await.unwrap();
    assert_eq!(grants, vec![replacement]);
}
