mod common;

use common::{frontend, product_json, session, two_products};
use httpmock::prelude::*;
use pricewise::app::saved::{NO_SAVED, SAVE_FAILED, UNSAVE_FAILED};
use pricewise::app::SavedItems;
use pricewise::domain::model::Product;
use pricewise::{PriceWiseError, ViewState};
use serde_json::json;
use tempfile::TempDir;

fn bookmark_entries() -> serde_json::Value {
    json!([
        { "product": product_json("p1", "Nike Air Jordan 1", "₹12,795"), "created_at": "2024-03-01T10:00:00" },
        { "product": product_json("p2", "Samsung S24 Ultra", "₹1,21,999") }
    ])
}

async fn mock_sync(server: &MockServer) {
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/v1/user/sync");
            then.status(200).json_body(json!({ "message": "User synced" }));
        })
        .await;
}

#[tokio::test]
async fn test_guest_is_asked_to_sign_in() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start_async().await;

    let bookmarks_mock = server
        .mock_async(|when, then| {
            when.method(GET).path_contains("/bookmarks");
            then.status(200).json_body(bookmark_entries());
        })
        .await;

    let app = frontend(&server, temp_dir.path()).await;
    let err = app.saved().await.unwrap_err();

    assert!(matches!(err, PriceWiseError::AuthRequiredError { .. }));
    assert_eq!(bookmarks_mock.hits_async().await, 0);
}

#[tokio::test]
async fn test_bookmarks_are_unwrapped_to_products() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start_async().await;
    mock_sync(&server).await;

    let bookmarks_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/user/user_2abc/bookmarks");
            then.status(200).json_body(bookmark_entries());
        })
        .await;

    let mut app = frontend(&server, temp_dir.path()).await;
    app.login(session()).await.unwrap();
    let view = app.saved().await.unwrap();

    bookmarks_mock.assert_async().await;
    let saved = view.ready().unwrap();
    assert_eq!(saved.products.len(), 2);
    assert_eq!(saved.products[1].title, "Samsung S24 Ultra");
}

#[tokio::test]
async fn test_no_bookmarks_is_empty_state() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start_async().await;
    mock_sync(&server).await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/user/user_2abc/bookmarks");
            then.status(200).json_body(json!([]));
        })
        .await;

    let mut app = frontend(&server, temp_dir.path()).await;
    app.login(session()).await.unwrap();
    assert_eq!(
        app.saved().await.unwrap(),
        ViewState::Empty(NO_SAVED.to_string())
    );
}

#[tokio::test]
async fn test_save_from_listing() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start_async().await;
    mock_sync(&server).await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/products/search");
            then.status(200).json_body(two_products());
        })
        .await;
    let save_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/v1/user/bookmarks")
                .json_body_partial(r#"{"user_id": "user_2abc", "product": {"product_id": "p1"}}"#);
            then.status(200).json_body(json!({ "message": "Bookmark added" }));
        })
        .await;

    let mut app = frontend(&server, temp_dir.path()).await;
    app.login(session()).await.unwrap();
    app.search("mouse").await.unwrap();

    let mut saved = SavedItems::default();
    let view = app.save_result(&mut saved, 1).await.unwrap();

    save_mock.assert_async().await;
    assert!(view.is_ready());
    assert!(saved.contains("p1"));
}

#[tokio::test]
async fn test_failed_save_is_reverted() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start_async().await;
    mock_sync(&server).await;

    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/v1/user/bookmarks");
            then.status(500);
        })
        .await;

    let mut app = frontend(&server, temp_dir.path()).await;
    app.login(session()).await.unwrap();

    let existing: Product =
        serde_json::from_value(product_json("p9", "Sony WH-1000XM5", "₹26,990")).unwrap();
    let new: Product =
        serde_json::from_value(product_json("p1", "Nike Air Jordan 1", "₹12,795")).unwrap();
    let mut saved = SavedItems::new(vec![existing.clone()]);

    let view = app.save_product(&mut saved, new).await.unwrap();

    assert_eq!(view, ViewState::Failed(SAVE_FAILED.to_string()));
    assert_eq!(saved.products, vec![existing]);
}

#[tokio::test]
async fn test_unsave_deletes_and_reverts_on_failure() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start_async().await;
    mock_sync(&server).await;

    let delete_ok = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/api/v1/user/user_2abc/bookmarks/p1");
            then.status(200).json_body(json!({ "message": "Bookmark removed" }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(DELETE).path("/api/v1/user/user_2abc/bookmarks/p2");
            then.status(503);
        })
        .await;

    let mut app = frontend(&server, temp_dir.path()).await;
    app.login(session()).await.unwrap();

    let products: Vec<Product> = serde_json::from_value(json!([
        product_json("p1", "Nike Air Jordan 1", "₹12,795"),
        product_json("p2", "Samsung S24 Ultra", "₹1,21,999")
    ]))
    .unwrap();
    let mut saved = SavedItems::new(products);

    assert!(app.unsave_product(&mut saved, "p1").await.unwrap().is_ready());
    delete_ok.assert_async().await;
    assert!(!saved.contains("p1"));

    let view = app.unsave_product(&mut saved, "p2").await.unwrap();
    assert_eq!(view, ViewState::Failed(UNSAVE_FAILED.to_string()));
    assert!(saved.contains("p2"));
}
