//! Route-level tests: the full route table driven through `Router::dispatch`
//! with an in-memory order store.

use brewhouse::api::{self, AppState};
use brewhouse::catalog::{Catalog, Product};
use brewhouse::orders::{MemoryOrderStore, Order};
use brewhouse::{Method, Request, Response, Router};

fn app() -> Router<AppState> {
    api::router(AppState::new(Catalog::seeded(), MemoryOrderStore::new()))
}

async fn call(app: &Router<AppState>, method: Method, path: &str, body: &'static str) -> Response {
    app.dispatch(Request::new(method, path, body)).await
}

fn json<T: serde::de::DeserializeOwned>(resp: &Response) -> T {
    serde_json::from_slice(resp.body()).expect("response body is not the expected JSON")
}

async fn coffees(app: &Router<AppState>) -> Vec<Product> {
    json(&call(app, Method::Get, "/coffees", "").await)
}

// ── Catalog ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn lists_the_seeded_menu() {
    let app = app();
    let resp = call(&app, Method::Get, "/coffees", "").await;
    assert_eq!(resp.status_code(), 200);
    assert_eq!(resp.header("content-type"), Some("application/json"));

    let products: Vec<Product> = json(&resp);
    assert_eq!(products.len(), 10);
    assert_eq!(products[0].title, "Капучино");
}

#[tokio::test]
async fn get_returns_exactly_the_requested_product() {
    let app = app();
    for id in 0..10 {
        let resp = call(&app, Method::Get, &format!("/coffee/{id}"), "").await;
        assert_eq!(resp.status_code(), 200);
        let product: Product = json(&resp);
        assert_eq!(product.id, id);
    }
}

#[tokio::test]
async fn get_unknown_id_is_404() {
    let resp = call(&app(), Method::Get, "/coffee/404", "").await;
    assert_eq!(resp.status_code(), 404);
    assert_eq!(resp.body(), b"Coffee not found");
}

#[tokio::test]
async fn create_assigns_next_id_and_ignores_callers_id() {
    let app = app();
    let resp = call(
        &app,
        Method::Post,
        "/coffee/create",
        r#"{"ID": 3, "ImageURL": "https://example.com/flat.jpg", "Title": "Флэт уайт", "Description": "", "Cost": "170", "Article": "11111111"}"#,
    )
    .await;
    assert_eq!(resp.status_code(), 200);

    let created: Product = json(&resp);
    // max(len 10, max id 9) + 1
    assert_eq!(created.id, 11);
    assert_eq!(created.cost, "170");
    assert_eq!(created.article, "11111111");

    let all = coffees(&app).await;
    assert_eq!(all.len(), 11);
    assert_eq!(all.last(), Some(&created));
}

#[tokio::test]
async fn create_with_malformed_body_is_400_and_changes_nothing() {
    let app = app();
    let resp = call(&app, Method::Post, "/coffee/create", r#"{"Title": "#).await;
    assert_eq!(resp.status_code(), 400);
    assert_eq!(coffees(&app).await.len(), 10);
}

#[tokio::test]
async fn create_with_wrong_method_is_405() {
    let resp = call(&app(), Method::Get, "/coffee/create", "").await;
    assert_eq!(resp.status_code(), 405);
    assert_eq!(resp.header("allow"), Some("POST"));
}

#[tokio::test]
async fn update_changes_only_editable_fields() {
    let app = app();
    let before: Product = json(&call(&app, Method::Get, "/coffee/2", "").await);

    let resp = call(
        &app,
        Method::Put,
        "/coffee/update/2",
        r#"{"ID": 77, "ImageURL": "https://example.com/latte.png", "Title": "Latte", "Description": "Milk", "Cost": "135", "Article": "00000000"}"#,
    )
    .await;
    assert_eq!(resp.status_code(), 200);

    let updated: Product = json(&resp);
    assert_eq!(updated.id, 2);
    assert_eq!(updated.article, before.article);
    assert_eq!(updated.title, "Latte");
    assert_eq!(updated.cost, "135");

    let after: Product = json(&call(&app, Method::Get, "/coffee/2", "").await);
    assert_eq!(after, updated);
}

#[tokio::test]
async fn update_with_malformed_body_is_400_and_changes_nothing() {
    let app = app();
    let before: Product = json(&call(&app, Method::Get, "/coffee/2", "").await);

    let resp = call(&app, Method::Put, "/coffee/update/2", r#"{"Title": "#).await;
    assert_eq!(resp.status_code(), 400);

    let resp = call(&app, Method::Put, "/coffee/update/2", r#"{"Title": 42}"#).await;
    assert_eq!(resp.status_code(), 400);

    let after: Product = json(&call(&app, Method::Get, "/coffee/2", "").await);
    assert_eq!(after, before);
}

#[tokio::test]
async fn update_matches_field_names_ignoring_case() {
    let app = app();
    let before: Product = json(&call(&app, Method::Get, "/coffee/2", "").await);

    let resp = call(
        &app,
        Method::Put,
        "/coffee/update/2",
        r#"{"imageUrl": "https://example.com/latte.png", "title": "Latte", "DESCRIPTION": "Milk", "cost": "135"}"#,
    )
    .await;
    assert_eq!(resp.status_code(), 200);

    let updated: Product = json(&resp);
    assert_eq!(updated.image_url, "https://example.com/latte.png");
    assert_eq!(updated.title, "Latte");
    assert_eq!(updated.description, "Milk");
    assert_eq!(updated.cost, "135");
    assert_eq!(updated.article, before.article);
}

#[tokio::test]
async fn create_matches_field_names_ignoring_case() {
    let resp = call(
        &app(),
        Method::Post,
        "/coffee/create",
        r#"{"imageURL": "https://example.com/raf.jpg", "TITLE": "Раф", "article": "31415926"}"#,
    )
    .await;
    let created: Product = json(&resp);
    assert_eq!(created.image_url, "https://example.com/raf.jpg");
    assert_eq!(created.title, "Раф");
    assert_eq!(created.article, "31415926");
}

#[tokio::test]
async fn update_unknown_id_is_404() {
    let resp = call(&app(), Method::Put, "/coffee/update/99", r#"{"Title": "x"}"#).await;
    assert_eq!(resp.status_code(), 404);
}

#[tokio::test]
async fn update_with_post_is_405() {
    let resp = call(&app(), Method::Post, "/coffee/update/1", r#"{"Title": "x"}"#).await;
    assert_eq!(resp.status_code(), 405);
    assert_eq!(resp.header("allow"), Some("PUT"));
}

#[tokio::test]
async fn delete_removes_the_product() {
    let app = app();
    let resp = call(&app, Method::Delete, "/coffee/delete/5", "").await;
    assert_eq!(resp.status_code(), 204);
    assert!(resp.body().is_empty());

    let all = coffees(&app).await;
    assert_eq!(all.len(), 9);
    assert!(all.iter().all(|p| p.id != 5));

    let resp = call(&app, Method::Get, "/coffee/5", "").await;
    assert_eq!(resp.status_code(), 404);
}

#[tokio::test]
async fn delete_unknown_id_is_404_and_changes_nothing() {
    let app = app();
    let resp = call(&app, Method::Delete, "/coffee/delete/12", "").await;
    assert_eq!(resp.status_code(), 404);
    assert_eq!(coffees(&app).await.len(), 10);
}

#[tokio::test]
async fn delete_with_get_is_405() {
    let resp = call(&app(), Method::Get, "/coffee/delete/1", "").await;
    assert_eq!(resp.status_code(), 405);
}

#[tokio::test]
async fn concurrent_creates_never_share_an_id() {
    let app = std::sync::Arc::new(app());
    let mut tasks = tokio::task::JoinSet::new();
    for _ in 0..50 {
        let app = std::sync::Arc::clone(&app);
        tasks.spawn(async move {
            let resp = call(&app, Method::Post, "/coffee/create", r#"{"Title": "Cortado"}"#).await;
            json::<Product>(&resp).id
        });
    }

    let mut ids = Vec::new();
    while let Some(id) = tasks.join_next().await {
        ids.push(id.unwrap());
    }
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 50);
    assert_eq!(coffees(&app).await.len(), 60);
}

// ── Orders ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn created_order_is_listed_for_its_user() {
    let app = app();
    let resp = call(
        &app,
        Method::Post,
        "/orders/create/7",
        r#"{"order_id": 999, "user_id": 1, "total": 12.5, "status": "pending"}"#,
    )
    .await;
    assert_eq!(resp.status_code(), 200);

    let created: Order = json(&resp);
    assert_eq!(created.user_id, 7);
    assert_eq!(created.order_id, 1);
    assert_eq!(created.total, 12.5);
    assert_eq!(created.status, "pending");

    let listed: Vec<Order> = json(&call(&app, Method::Get, "/orders/7", "").await);
    assert_eq!(listed, vec![created]);
}

#[tokio::test]
async fn order_json_uses_snake_case_fields() {
    let app = app();
    let resp = call(&app, Method::Post, "/orders/create/3", r#"{"total": 4, "status": "paid"}"#).await;
    let value: serde_json::Value = json(&resp);
    for field in ["order_id", "user_id", "total", "status", "created_at"] {
        assert!(value.get(field).is_some(), "missing {field}");
    }
}

#[tokio::test]
async fn user_without_orders_gets_empty_array() {
    let resp = call(&app(), Method::Get, "/orders/42", "").await;
    assert_eq!(resp.status_code(), 200);
    assert_eq!(resp.body(), b"[]");
}

#[tokio::test]
async fn order_create_with_get_is_405() {
    let resp = call(&app(), Method::Get, "/orders/create/1", "").await;
    assert_eq!(resp.status_code(), 405);
    assert_eq!(resp.header("allow"), Some("POST"));
}

#[tokio::test]
async fn order_with_malformed_body_is_400() {
    let resp = call(&app(), Method::Post, "/orders/create/1", "total=12").await;
    assert_eq!(resp.status_code(), 400);
    assert_eq!(resp.body(), b"Invalid request body");
}

#[tokio::test]
async fn datastore_failures_are_generic_500s() {
    let app = api::router(AppState::new(Catalog::seeded(), MemoryOrderStore::unavailable()));

    let resp = call(&app, Method::Get, "/orders/1", "").await;
    assert_eq!(resp.status_code(), 500);
    assert_eq!(resp.body(), b"Failed to query database");

    let resp = call(&app, Method::Post, "/orders/create/1", r#"{"total": 1, "status": "new"}"#).await;
    assert_eq!(resp.status_code(), 500);
    assert_eq!(resp.body(), b"Failed to insert order");
}

// ── Identifiers ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn non_numeric_ids_are_400_on_every_route() {
    let app = app();
    let cases = [
        (Method::Get, "/coffee/abc", "Invalid coffee ID"),
        (Method::Put, "/coffee/update/abc", "Invalid coffee ID"),
        (Method::Delete, "/coffee/delete/abc", "Invalid coffee ID"),
        (Method::Get, "/orders/abc", "Invalid user ID"),
        (Method::Post, "/orders/create/abc", "Invalid user ID"),
        // empty segment
        (Method::Get, "/coffee/", "Invalid coffee ID"),
        (Method::Put, "/coffee/update/", "Invalid coffee ID"),
        (Method::Delete, "/coffee/delete/", "Invalid coffee ID"),
        (Method::Get, "/orders/", "Invalid user ID"),
        (Method::Post, "/orders/create/", "Invalid user ID"),
        // extra segment
        (Method::Get, "/coffee/1/x", "Invalid coffee ID"),
        (Method::Put, "/coffee/update/1/x", "Invalid coffee ID"),
        (Method::Delete, "/coffee/delete/1/x", "Invalid coffee ID"),
        (Method::Get, "/orders/1/x", "Invalid user ID"),
        (Method::Post, "/orders/create/1/x", "Invalid user ID"),
    ];
    for (method, path, message) in cases {
        let resp = call(&app, method, path, r#"{"Title": "x", "total": 1}"#).await;
        assert_eq!(resp.status_code(), 400, "{method} {path}");
        assert_eq!(resp.header("content-type"), Some("text/plain; charset=utf-8"));
        assert_eq!(resp.body(), message.as_bytes(), "{method} {path}");
    }
    assert_eq!(coffees(&app).await.len(), 10);
}

// ── Health ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn readiness_follows_the_order_store() {
    let resp = call(&app(), Method::Get, "/readyz", "").await;
    assert_eq!(resp.status_code(), 200);

    let down = api::router(AppState::new(Catalog::seeded(), MemoryOrderStore::unavailable()));
    assert_eq!(call(&down, Method::Get, "/readyz", "").await.status_code(), 503);
    assert_eq!(call(&down, Method::Get, "/healthz", "").await.status_code(), 200);
}

#[tokio::test]
async fn unknown_route_is_404() {
    let resp = call(&app(), Method::Get, "/tea", "").await;
    assert_eq!(resp.status_code(), 404);
}
