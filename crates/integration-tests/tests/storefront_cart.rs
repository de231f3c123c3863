//! Cart API tests against the in-process storefront router.

use axum::http::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

use orchard_integration_tests::TestApp;

fn product(n: u128) -> String {
    Uuid::from_u128(n).to_string()
}

async fn add(app: &TestApp, cart: &str, product_id: &str, quantity: i32) -> Value {
    let resp = app
        .post(
            &format!("/cart/{cart}"),
            json!({ "productId": product_id, "quantity": quantity }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::CREATED, "{:?}", resp.body);
    resp.body
}

#[tokio::test]
async fn test_unknown_cart_is_empty() {
    let app = TestApp::new();

    let resp = app.get(&format!("/cart/{}", Uuid::new_v4())).await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, json!([]));
}

#[tokio::test]
async fn test_add_then_list() {
    let app = TestApp::new();
    let cart = Uuid::new_v4().to_string();
    let product_id = product(42);

    let body = add(&app, &cart, &product_id, 3).await;
    assert_eq!(body["message"], "Product added to cart !");
    assert_eq!(
        body["newCartProduct"],
        json!({ "cartId": cart, "productId": product_id, "quantity": 3 })
    );

    let resp = app.get(&format!("/cart/{cart}")).await;
    assert_eq!(
        resp.body,
        json!([{ "productId": product_id, "quantity": 3 }])
    );
}

#[tokio::test]
async fn test_list_is_ordered_by_product_id_descending() {
    let app = TestApp::new();
    let cart = Uuid::new_v4().to_string();

    for n in [1, 5, 3] {
        add(&app, &cart, &product(n), 1).await;
    }

    let resp = app.get(&format!("/cart/{cart}")).await;
    let ids: Vec<&str> = resp
        .body
        .as_array()
        .map(|lines| lines.iter().filter_map(|l| l["productId"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(ids, vec![product(5), product(3), product(1)]);
}

#[tokio::test]
async fn test_duplicate_add_is_internal_error() {
    let app = TestApp::new();
    let cart = Uuid::new_v4().to_string();
    add(&app, &cart, &product(1), 1).await;

    let resp = app
        .post(
            &format!("/cart/{cart}"),
            json!({ "productId": product(1), "quantity": 2 }),
        )
        .await;

    assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(resp.body["error"], "Internal server error");
}

#[tokio::test]
async fn test_negative_quantity_is_rejected() {
    let app = TestApp::new();
    let cart = Uuid::new_v4().to_string();

    let resp = app
        .post(
            &format!("/cart/{cart}"),
            json!({ "productId": product(1), "quantity": -1 }),
        )
        .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["fields"][0]["field"], "quantity");
}

#[tokio::test]
async fn test_update_existing_item() {
    let app = TestApp::new();
    let cart = Uuid::new_v4().to_string();
    add(&app, &cart, &product(1), 1).await;

    let resp = app
        .patch(
            &format!("/cart/{cart}/{}", product(1)),
            json!({ "quantity": 7 }),
        )
        .await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["message"], "Cart product updated !");
    assert_eq!(resp.body["updatedCartProduct"]["quantity"], 7);

    let resp = app.get(&format!("/cart/{cart}")).await;
    assert_eq!(resp.body[0]["quantity"], 7);
}

#[tokio::test]
async fn test_update_missing_item_is_forbidden() {
    let app = TestApp::new();
    let cart = Uuid::new_v4().to_string();

    let resp = app
        .patch(
            &format!("/cart/{cart}/{}", product(1)),
            json!({ "quantity": 2 }),
        )
        .await;

    assert_eq!(resp.status, StatusCode::FORBIDDEN);
    assert_eq!(resp.body["error"], "Unexisting cart or product");
}

#[tokio::test]
async fn test_delete_existing_item() {
    let app = TestApp::new();
    let cart = Uuid::new_v4().to_string();
    add(&app, &cart, &product(1), 4).await;
    add(&app, &cart, &product(2), 1).await;

    let resp = app.delete(&format!("/cart/{cart}/{}", product(1))).await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["message"], "Cart product deleted !");
    assert_eq!(
        resp.body["deletedCartProduct"],
        json!({ "cartId": cart, "productId": product(1), "quantity": 4 })
    );

    let resp = app.get(&format!("/cart/{cart}")).await;
    assert_eq!(resp.body, json!([{ "productId": product(2), "quantity": 1 }]));
}

#[tokio::test]
async fn test_delete_missing_item_is_forbidden() {
    let app = TestApp::new();

    let resp = app
        .delete(&format!("/cart/{}/{}", Uuid::new_v4(), product(1)))
        .await;

    assert_eq!(resp.status, StatusCode::FORBIDDEN);
    assert_eq!(resp.body["error"], "Unexisting cart or product");
}

#[tokio::test]
async fn test_malformed_cart_id_is_rejected() {
    let app = TestApp::new();

    let resp = app.get("/cart/not-a-uuid").await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}
