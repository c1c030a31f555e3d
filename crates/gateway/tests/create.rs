//! Integration tests for gateway create operations

mod common;

use ::common::document::DocumentKind;
use gateway::error::GatewayError;
use gateway::gateway::PathGateway;

#[tokio::test]
async fn test_create_file() {
    let (gateway, _, _, granted) = common::setup_test_env();
    let path = granted.child("f.txt");

    assert!(gateway.create_file(&path).await.unwrap());
    assert!(gateway.exists(&path).await.unwrap());

    let record = gateway.lookup(&path).await.unwrap();
    assert_eq!(record.kind, DocumentKind::File);
    assert_eq!(record.size, 0);
}

#[tokio::test]
async fn test_create_file_twice_reports_false_second_time() {
    let (gateway, _, _, granted) = common::setup_test_env();
    let path = granted.child("f.txt");

    assert!(gateway.create_file(&path).await.unwrap());
    assert!(!gateway.create_file(&path).await.unwrap());
}

#[tokio::test]
async fn test_create_file_over_directory_fails() {
    let (gateway, _, _, granted) = common::setup_test_env();
    let path = granted.child("docs");

    assert!(gateway.create_dir(&path).await.unwrap());
    let result = gateway.create_file(&path).await;
    assert!(matches!(result, Err(GatewayError::Write { .. })));
}

#[tokio::test]
async fn test_create_dir_over_file_fails() {
    let (gateway, _, _, granted) = common::setup_test_env();
    let path = granted.child("f.txt");

    assert!(gateway.create_file(&path).await.unwrap());
    let result = gateway.create_dir(&path).await;
    assert!(matches!(result, Err(GatewayError::Write { .. })));
}

#[tokio::test]
async fn test_deep_create_materializes_ancestors() {
    let (gateway, _, _, granted) = common::setup_test_env();
    let target = granted.child("B").child("C").child("d.txt");

    assert!(gateway.create_file(&target).await.unwrap());

    // Every materialized ancestor is a listable directory.
    let in_a = gateway.list_files(&granted).await.unwrap();
    assert_eq!(in_a, vec![granted.child("B")]);
    let in_b = gateway.list_files(&granted.child("B")).await.unwrap();
    assert_eq!(in_b, vec![granted.child("B").child("C")]);
    let in_c = gateway
        .list_files(&granted.child("B").child("C"))
        .await
        .unwrap();
    assert_eq!(in_c, vec![target.clone()]);

    let record = gateway.lookup(&target).await.unwrap();
    assert_eq!(record.kind, DocumentKind::File);
    assert_eq!(record.size, 0);
}

#[tokio::test]
async fn test_deep_create_dir_ancestors_are_directories() {
    let (gateway, _, _, granted) = common::setup_test_env();
    let target = granted.child("x").child("y").child("z");

    assert!(gateway.create_dir(&target).await.unwrap());

    for path in [
        granted.child("x"),
        granted.child("x").child("y"),
        target.clone(),
    ] {
        let record = gateway.lookup(&path).await.unwrap();
        assert_eq!(record.kind, DocumentKind::Directory);
    }
}

#[tokio::test]
async fn test_create_at_grant_root() {
    let (gateway, _, _, granted) = common::setup_test_env();

    // The grant root already exists as a directory.
    assert!(!gateway.create_dir(&granted).await.unwrap());
    let result = gateway.create_file(&granted).await;
    assert!(matches!(result, Err(GatewayError::Write { .. })));
}

#[tokio::test]
async fn test_create_rejects_provider_rename() {
    let (gateway, _, store, granted) = common::setup_test_env();
    store.set_name_mangling(true);

    let result = gateway.create_file(&granted.child("f.txt")).await;
    match result {
        Err(GatewayError::Write { source, .. }) => {
            assert!(source.to_string().contains("unexpected name change"));
        }
        other => panic!("expected a write failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_second_create_leaves_content_untouched() {
    let (gateway, _, _, granted) = common::setup_test_env();
    let path = granted.child("f.txt");

    assert!(gateway.create_file(&path).await.unwrap());
    {
        use tokio::io::AsyncWriteExt;
        let mut writer = gateway.write(&path).await.unwrap();
        writer.write_all(b"payload").await.unwrap();
        writer.shutdown().await.unwrap();
    }

    assert!(!gateway.create_file(&path).await.unwrap());
    assert_eq!(gateway.lookup(&path).await.unwrap().size, 7);
}
