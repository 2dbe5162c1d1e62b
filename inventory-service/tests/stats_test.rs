//! Dashboard stats integration tests.

mod common;

use common::TestApp;
use serde_json::{json, Value};

#[tokio::test]
async fn stats_fold_quantity_value_and_low_stock() {
    let app = TestApp::spawn().await;

    app.create_item(json!({
        "name": "Gauze",
        "quantity": 5,
        "minStockLevel": 10,
        "price": 2
    }))
    .await;
    app.create_item(json!({
        "name": "Tape",
        "category": "A",
        "quantity": 20,
        "minStockLevel": 5,
        "price": 1
    }))
    .await;

    let stats: Value = app.get("/api/stats").await.json().await.unwrap();
    assert_eq!(stats["totalQuantity"], json!(25));
    assert_eq!(stats["lowStockCount"], json!(1));
    assert_eq!(stats["lowStockItems"], json!(["Gauze"]));
    assert_eq!(stats["totalInventoryValue"], json!(30.0));
    assert_eq!(stats["uniqueCategoriesCount"], json!(1));
}

#[tokio::test]
async fn stats_on_an_empty_store_are_all_zero() {
    let app = TestApp::spawn().await;

    let stats: Value = app.get("/api/stats").await.json().await.unwrap();
    assert_eq!(stats["totalQuantity"], json!(0));
    assert_eq!(stats["lowStockCount"], json!(0));
    assert_eq!(stats["lowStockItems"], json!([]));
    assert_eq!(stats["totalInventoryValue"], json!(0.0));
    assert_eq!(stats["uniqueCategoriesCount"], json!(0));
}

#[tokio::test]
async fn stats_reflect_ledger_movements() {
    let app = TestApp::spawn().await;
    let item = app
        .create_item(json!({ "name": "Widget", "quantity": 10, "minStockLevel": 8, "price": 1 }))
        .await;
    let id = item["id"].as_str().unwrap();

    app.post(
        &format!("/api/items/{}/adjust_stock", id),
        &json!({ "delta": -5 }),
    )
    .await;

    let stats: Value = app.get("/api/stats").await.json().await.unwrap();
    assert_eq!(stats["totalQuantity"], json!(5));
    assert_eq!(stats["lowStockCount"], json!(1));
    assert_eq!(stats["lowStockItems"], json!(["Widget"]));
}
