//! Integration tests for lookup and metadata operations

mod common;

use chrono::{TimeZone, Utc};

use ::common::document::{DocumentKind, Ownership, Permissions};
use gateway::error::GatewayError;
use gateway::gateway::PathGateway;

#[tokio::test]
async fn test_lookup_of_fresh_file() {
    let (gateway, _, _, granted) = common::setup_test_env();
    let path = granted.child("f.txt");
    gateway.create_file(&path).await.unwrap();

    let record = gateway.lookup(&path).await.unwrap();
    assert_eq!(record.looked_up, path);
    assert_eq!(record.kind, DocumentKind::File);
    assert_eq!(record.size, 0);
    assert!(record.ownership.is_none());
    assert!(record.permissions.is_none());
    assert!(record.target.is_none());
    assert!(gateway.can_read(&path).await.unwrap());
}

#[tokio::test]
async fn test_lookup_of_directory() {
    let (gateway, _, _, granted) = common::setup_test_env();
    let path = granted.child("docs");
    gateway.create_dir(&path).await.unwrap();

    let record = gateway.lookup(&path).await.unwrap();
    assert_eq!(record.kind, DocumentKind::Directory);
    assert!(record.is_dir());
}

#[tokio::test]
async fn test_lookup_of_missing_path_fails() {
    let (gateway, _, _, granted) = common::setup_test_env();

    let result = gateway.lookup(&granted.child("nope")).await;
    assert!(matches!(result, Err(GatewayError::Read { .. })));
}

#[tokio::test]
async fn test_set_modified_at_reflected_in_lookup() {
    let (gateway, _, _, granted) = common::setup_test_env();
    let path = granted.child("f.txt");
    gateway.create_file(&path).await.unwrap();

    let instant = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    assert!(gateway.set_modified_at(&path, instant).await.unwrap());
    assert_eq!(gateway.lookup(&path).await.unwrap().modified_at, instant);
}

#[tokio::test]
async fn test_set_permissions_and_ownership_reflected_in_lookup() {
    let (gateway, _, _, granted) = common::setup_test_env();
    let path = granted.child("f.txt");
    gateway.create_file(&path).await.unwrap();

    assert!(gateway
        .set_permissions(&path, Permissions { mode: 0o640 })
        .await
        .unwrap());
    assert!(gateway
        .set_ownership(&path, Ownership { uid: 1000, gid: 100 })
        .await
        .unwrap());

    let record = gateway.lookup(&path).await.unwrap();
    assert_eq!(record.permissions, Some(Permissions { mode: 0o640 }));
    assert_eq!(record.ownership, Some(Ownership { uid: 1000, gid: 100 }));
}

#[tokio::test]
async fn test_set_metadata_on_missing_path_fails() {
    let (gateway, _, _, granted) = common::setup_test_env();
    let instant = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

    let result = gateway.set_modified_at(&granted.child("nope"), instant).await;
    assert!(matches!(result, Err(GatewayError::Write { .. })));
}

#[tokio::test]
async fn test_create_symlink_is_unsupported() {
    let (gateway, _, _, granted) = common::setup_test_env();
    let link = granted.child("link");
    let target = granted.child("target");

    let result = gateway.create_symlink(&link, &target).await;
    assert!(matches!(result, Err(GatewayError::Unsupported { .. })));

    // Argument validity is irrelevant; the backend simply has no symlinks.
    let unmanaged = ::common::path::ScopedPath::root("root").child("Z");
    let result = gateway.create_symlink(&unmanaged, &target).await;
    assert!(matches!(result, Err(GatewayError::Unsupported { .. })));
}
