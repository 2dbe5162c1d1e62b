//! Invoice engine integration tests: creation, totals, stock application,
//! and updates.

mod common;

use common::TestApp;
use serde_json::{json, Value};

#[tokio::test]
async fn create_invoice_computes_discount_then_tax() {
    let app = TestApp::spawn().await;

    let response = app
        .post(
            "/api/invoices",
            &json!({
                "number": "INV-0001",
                "customerName": "John Doe",
                "taxRate": 8,
                "discountRate": 10,
                "lines": [
                    { "name": "A", "price": 30, "quantity": 2 },
                    { "name": "B", "price": 40, "quantity": 1 }
                ]
            }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 201);

    let body: Value = response.json().await.unwrap();
    let totals = &body["totals"];
    assert_eq!(totals["subtotal"], json!(100.0));
    assert_eq!(totals["discountAmount"], json!(10.0));
    assert_eq!(totals["taxAmount"], json!(7.2));
    assert_eq!(totals["total"], json!(97.2));
}

#[tokio::test]
async fn zero_subtotal_yields_zero_total_regardless_of_rates() {
    let app = TestApp::spawn().await;

    let body: Value = app
        .post(
            "/api/invoices",
            &json!({
                "number": "INV-0002",
                "taxRate": 18,
                "discountRate": 25,
                "lines": [{ "name": "Freebie", "price": 0, "quantity": 10 }]
            }),
        )
        .await
        .json()
        .await
        .unwrap();

    assert_eq!(body["totals"]["subtotal"], json!(0.0));
    assert_eq!(body["totals"]["total"], json!(0.0));
}

#[tokio::test]
async fn create_invoice_requires_number_and_lines() {
    let app = TestApp::spawn().await;

    let no_number = app
        .post(
            "/api/invoices",
            &json!({ "lines": [{ "name": "A", "price": 1, "quantity": 1 }] }),
        )
        .await;
    assert_eq!(no_number.status().as_u16(), 400);

    let no_lines = app
        .post("/api/invoices", &json!({ "number": "INV-1", "lines": [] }))
        .await;
    assert_eq!(no_lines.status().as_u16(), 400);
}

#[tokio::test]
async fn create_invoice_deducts_stock_when_asked() {
    let app = TestApp::spawn().await;
    let item = app
        .create_item(json!({ "name": "Widget", "quantity": 10, "price": 3 }))
        .await;
    let id = item["id"].as_str().unwrap();

    let response = app
        .post(
            "/api/invoices",
            &json!({
                "number": "INV-0003",
                "applyStockChange": true,
                "lines": [{ "itemId": id, "name": "Widget", "price": 3, "quantity": 4 }]
            }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 201);

    let item: Value = app
        .get(&format!("/api/items/{}", id))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(item["quantity"], json!(6));

    // Invoice-driven decrements are not receipts.
    let receipts: Vec<Value> = app.get("/api/receipts").await.json().await.unwrap();
    assert!(receipts.is_empty());
}

#[tokio::test]
async fn stock_deduction_clamps_at_zero() {
    let app = TestApp::spawn().await;
    let item = app
        .create_item(json!({ "name": "Widget", "quantity": 10 }))
        .await;
    let id = item["id"].as_str().unwrap();

    app.post(
        "/api/invoices",
        &json!({
            "number": "INV-0004",
            "applyStockChange": true,
            "lines": [{ "itemId": id, "name": "Widget", "price": 1, "quantity": 50 }]
        }),
    )
    .await;

    let item: Value = app
        .get(&format!("/api/items/{}", id))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(item["quantity"], json!(0));
}

#[tokio::test]
async fn unresolved_line_references_are_kept_but_flagged() {
    let app = TestApp::spawn().await;
    let item = app
        .create_item(json!({ "name": "Widget", "quantity": 10 }))
        .await;
    let id = item["id"].as_str().unwrap();

    let body: Value = app
        .post(
            "/api/invoices",
            &json!({
                "number": "INV-0005",
                "applyStockChange": true,
                "lines": [
                    { "itemId": "not-a-real-id", "name": "Ghost", "price": 2, "quantity": 1 },
                    { "itemId": id, "name": "Widget", "price": 3, "quantity": 1 }
                ]
            }),
        )
        .await
        .json()
        .await
        .unwrap();

    let lines = body["lines"].as_array().unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["resolved"], json!(false));
    assert_eq!(lines[0]["itemId"], Value::Null);
    assert_eq!(lines[1]["resolved"], json!(true));

    // The bad reference never blocks the sale; the good line still deducts.
    let item: Value = app
        .get(&format!("/api/items/{}", id))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(item["quantity"], json!(9));
}

#[tokio::test]
async fn malformed_line_numbers_default_to_zero() {
    let app = TestApp::spawn().await;

    let body: Value = app
        .post(
            "/api/invoices",
            &json!({
                "number": "INV-0006",
                "lines": [{ "name": "A", "price": "oops", "quantity": "many" }]
            }),
        )
        .await
        .json()
        .await
        .unwrap();

    assert_eq!(body["lines"][0]["price"], json!(0.0));
    assert_eq!(body["lines"][0]["quantity"], json!(0));
    assert_eq!(body["totals"]["total"], json!(0.0));
}

#[tokio::test]
async fn printed_at_is_normalized_to_a_naive_instant() {
    let app = TestApp::spawn().await;

    let body: Value = app
        .post(
            "/api/invoices",
            &json!({
                "number": "INV-0007",
                "printedAt": "2025-01-01T12:00:00Z",
                "lines": [{ "name": "A", "price": 1, "quantity": 1 }]
            }),
        )
        .await
        .json()
        .await
        .unwrap();

    assert_eq!(body["printedAt"], json!("2025-01-01T12:00:00"));
}

#[tokio::test]
async fn update_invoice_recomputes_totals_but_never_touches_stock() {
    let app = TestApp::spawn().await;
    let item = app
        .create_item(json!({ "name": "Widget", "quantity": 10 }))
        .await;
    let id = item["id"].as_str().unwrap();

    let invoice: Value = app
        .post(
            "/api/invoices",
            &json!({
                "number": "INV-0008",
                "applyStockChange": true,
                "discountRate": 0,
                "lines": [{ "itemId": id, "name": "Widget", "price": 10, "quantity": 4 }]
            }),
        )
        .await
        .json()
        .await
        .unwrap();
    let invoice_id = invoice["id"].as_str().unwrap();
    assert_eq!(invoice["totals"]["total"], json!(40.0));

    let updated: Value = app
        .put(
            &format!("/api/invoices/{}", invoice_id),
            &json!({
                "discountRate": 50,
                "lines": [{ "itemId": id, "name": "Widget", "price": 10, "quantity": 100 }]
            }),
        )
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(updated["totals"]["subtotal"], json!(1000.0));
    assert_eq!(updated["totals"]["total"], json!(500.0));

    // Replacing lines is a correction to the record, not a new sale.
    let item: Value = app
        .get(&format!("/api/items/{}", id))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(item["quantity"], json!(6));

    // The recomputation sticks on subsequent reads.
    let fetched: Value = app
        .get(&format!("/api/invoices/{}", invoice_id))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(fetched["totals"]["total"], json!(500.0));
}

#[tokio::test]
async fn update_invoice_validates_input() {
    let app = TestApp::spawn().await;

    let malformed = app.put("/api/invoices/nope", &json!({ "taxRate": 5 })).await;
    assert_eq!(malformed.status().as_u16(), 400);

    let missing = app
        .put(
            "/api/invoices/ffffffffffffffffffffffff",
            &json!({ "taxRate": 5 }),
        )
        .await;
    assert_eq!(missing.status().as_u16(), 404);

    let invoice: Value = app
        .post(
            "/api/invoices",
            &json!({ "number": "INV-0009", "lines": [{ "name": "A", "price": 1, "quantity": 1 }] }),
        )
        .await
        .json()
        .await
        .unwrap();
    let empty = app
        .put(
            &format!("/api/invoices/{}", invoice["id"].as_str().unwrap()),
            &json!({}),
        )
        .await;
    assert_eq!(empty.status().as_u16(), 400);
}

#[tokio::test]
async fn invoices_list_newest_first_by_printed_at() {
    let app = TestApp::spawn().await;

    let older: Value = app
        .post(
            "/api/invoices",
            &json!({
                "number": "INV-OLD",
                "printedAt": "2025-01-01T09:00:00Z",
                "lines": [{ "name": "A", "price": 1, "quantity": 1 }]
            }),
        )
        .await
        .json()
        .await
        .unwrap();
    let newer: Value = app
        .post(
            "/api/invoices",
            &json!({
                "number": "INV-NEW",
                "printedAt": "2025-02-01T09:00:00Z",
                "lines": [{ "name": "B", "price": 1, "quantity": 1 }]
            }),
        )
        .await
        .json()
        .await
        .unwrap();

    let invoices: Vec<Value> = app.get("/api/invoices").await.json().await.unwrap();
    assert_eq!(invoices.len(), 2);
    assert_eq!(invoices[0]["id"], newer["id"]);
    assert_eq!(invoices[1]["id"], older["id"]);
    assert!(invoices[0]["totals"].is_object());
}

#[tokio::test]
async fn get_invoice_validates_the_id() {
    let app = TestApp::spawn().await;

    assert_eq!(app.get("/api/invoices/nope").await.status().as_u16(), 400);
    assert_eq!(
        app.get("/api/invoices/ffffffffffffffffffffffff")
            .await
            .status()
            .as_u16(),
        404
    );
}
