//! Integration tests for listing and batch lookup

mod common;

use ::common::grants::GrantProvider;
use ::common::store::DocumentStore;
use gateway::error::GatewayError;
use gateway::gateway::PathGateway;

#[tokio::test]
async fn test_list_files_in_provider_order() {
    let (gateway, _, _, granted) = common::setup_test_env();
    for name in ["c.txt", "a.txt", "b.txt"] {
        gateway.create_file(&granted.child(name)).await.unwrap();
    }

    let listed = gateway.list_files(&granted).await.unwrap();
    assert_eq!(
        listed,
        vec![
            granted.child("c.txt"),
            granted.child("a.txt"),
            granted.child("b.txt"),
        ]
    );
}

#[tokio::test]
async fn test_list_files_of_missing_dir_fails() {
    let (gateway, _, _, granted) = common::setup_test_env();

    let result = gateway.list_files(&granted.child("nope")).await;
    assert!(matches!(result, Err(GatewayError::Read { .. })));
}

#[tokio::test]
async fn test_list_files_of_file_fails() {
    let (gateway, _, _, granted) = common::setup_test_env();
    let path = granted.child("f.txt");
    gateway.create_file(&path).await.unwrap();

    let result = gateway.list_files(&path).await;
    assert!(matches!(result, Err(GatewayError::Read { .. })));
}

#[tokio::test]
async fn test_list_then_lookup_round_trip() {
    let (gateway, _, _, granted) = common::setup_test_env();
    gateway.create_dir(&granted.child("docs")).await.unwrap();
    gateway.create_file(&granted.child("a.txt")).await.unwrap();
    gateway.create_file(&granted.child("b.txt")).await.unwrap();

    for child in gateway.list_files(&granted).await.unwrap() {
        gateway.lookup(&child).await.unwrap();
    }
}

#[tokio::test]
async fn test_lookup_files_in_listing_order() {
    let (gateway, _, _, granted) = common::setup_test_env();
    gateway.create_file(&granted.child("one")).await.unwrap();
    gateway.create_dir(&granted.child("two")).await.unwrap();

    let records = gateway.lookup_files(&granted).await.unwrap();
    let names: Vec<&str> = records
        .iter()
        .map(|record| record.looked_up.name())
        .collect();
    assert_eq!(names, ["one", "two"]);
}

#[tokio::test]
async fn test_lookup_files_fails_on_any_unreadable_child() {
    let (gateway, grants, store, granted) = common::setup_test_env();
    gateway.create_file(&granted.child("ok.txt")).await.unwrap();
    gateway.create_file(&granted.child("bad.txt")).await.unwrap();

    let root_id = grants.grants().await.unwrap()[0].root_id;
    let bad = store.child(root_id, "bad.txt").await.unwrap().unwrap();
    store.set_readable(bad.id, false).unwrap();

    let result = gateway.lookup_files(&granted).await;
    assert!(matches!(result, Err(GatewayError::Read { .. })));
}

#[tokio::test]
async fn test_lookup_files_of_empty_dir_is_empty() {
    let (gateway, _, _, granted) = common::setup_test_env();
    assert!(gateway.lookup_files(&granted).await.unwrap().is_empty());
}
