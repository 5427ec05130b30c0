use std::sync::Arc;

use catalog_items::ItemStore;
use reqwest::StatusCode;
use serde_json::{json, Value};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(store: ItemStore) -> Self {
        // Same router as prod, bound to an ephemeral port.
        let app = catalog_api::app::build_app(Arc::new(store));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    async fn empty() -> Self {
        Self::spawn(ItemStore::new()).await
    }

    async fn seeded() -> Self {
        Self::spawn(ItemStore::seeded().unwrap()).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn item_body(name: &str, category: &str) -> Value {
    json!({
        "name": name,
        "description": "A perfectly ordinary catalog entry",
        "category": category,
        "price": 9.99,
        "stockQuantity": 5,
    })
}

async fn create(client: &reqwest::Client, srv: &TestServer, body: &Value) -> Value {
    let res = client.post(srv.url("/api/items")).json(body).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    res.json().await.unwrap()
}

#[tokio::test]
async fn create_delete_lifecycle() {
    let srv = TestServer::empty().await;
    let client = reqwest::Client::new();

    let a = create(&client, &srv, &item_body("Widget", "Tools")).await;
    assert_eq!(a["id"], 1);
    assert_eq!(a["name"], "Widget");
    assert_eq!(a["stockQuantity"], 5);
    assert_eq!(a["createdAt"], a["updatedAt"]);
    assert!(a["imageUrl"].is_null());

    let b = create(&client, &srv, &item_body("Gadget", "Tools")).await;
    assert_eq!(b["id"], 2);

    let res = client.delete(srv.url("/api/items/1")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["deleted"], true);
    assert_eq!(body["message"], "Item with ID 1 deleted successfully");

    let res = client.get(srv.url("/api/items/1")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], 404);
    assert_eq!(body["error"], "Not Found");
    assert_eq!(body["message"], "Item with ID 1 not found in the catalog");
    assert_eq!(body["path"], "/api/items/1");
    assert!(body.get("errors").is_none());

    let res = client.get(srv.url("/api/items/stats")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["totalItems"], 1);
    assert_eq!(body["message"], "Catalog statistics retrieved successfully");
}

#[tokio::test]
async fn second_delete_reports_not_found() {
    let srv = TestServer::empty().await;
    let client = reqwest::Client::new();
    create(&client, &srv, &item_body("Widget", "Tools")).await;

    let res = client.delete(srv.url("/api/items/1")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client.delete(srv.url("/api/items/1")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["deleted"], false);
    assert_eq!(body["message"], "Item with ID 1 not found");
}

#[tokio::test]
async fn short_description_fails_validation() {
    let srv = TestServer::empty().await;
    let client = reqwest::Client::new();

    let mut body = item_body("Widget", "Tools");
    body["description"] = json!("Short");

    let res = client.post(srv.url("/api/items")).json(&body).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let err: Value = res.json().await.unwrap();
    assert_eq!(err["status"], 400);
    assert_eq!(err["error"], "Validation Failed");
    assert_eq!(err["path"], "/api/items");
    let errors: Vec<&str> = err["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e.as_str().unwrap())
        .collect();
    assert_eq!(
        errors,
        vec!["description: Description must be between 10 and 500 characters"]
    );

    // Nothing was stored.
    let res = client.get(srv.url("/api/items/stats")).send().await.unwrap();
    let stats: Value = res.json().await.unwrap();
    assert_eq!(stats["totalItems"], 0);
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let srv = TestServer::empty().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/api/items"))
        .header("content-type", "application/json")
        .body("{ not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let err: Value = res.json().await.unwrap();
    assert_eq!(err["error"], "Bad Request");
    assert_eq!(err["path"], "/api/items");
}

#[tokio::test]
async fn update_missing_item_is_not_found() {
    let srv = TestServer::empty().await;
    let client = reqwest::Client::new();

    let res = client
        .put(srv.url("/api/items/999"))
        .json(&item_body("Widget", "Tools"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let err: Value = res.json().await.unwrap();
    assert!(err["message"].as_str().unwrap().contains("999"));
}

#[tokio::test]
async fn update_overwrites_fields_but_keeps_identity() {
    let srv = TestServer::empty().await;
    let client = reqwest::Client::new();
    let created = create(&client, &srv, &item_body("Widget", "Tools")).await;

    let res = client
        .put(srv.url("/api/items/1"))
        .json(&json!({
            "name": "Widget Pro",
            "description": "The professional grade widget",
            "category": "Hardware",
            "price": 24.5,
            "stockQuantity": 0,
            "imageUrl": "/img/widget-pro.png",
            "rating": 4.5,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Value = res.json().await.unwrap();

    assert_eq!(updated["id"], 1);
    assert_eq!(updated["createdAt"], created["createdAt"]);
    assert_eq!(updated["name"], "Widget Pro");
    assert_eq!(updated["imageUrl"], "/img/widget-pro.png");
    assert_eq!(updated["rating"], 4.5);

    let fetched: Value = client
        .get(srv.url("/api/items/1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn invalid_ids_are_bad_requests() {
    let srv = TestServer::empty().await;
    let client = reqwest::Client::new();

    for path in ["/api/items/0", "/api/items/-3", "/api/items/abc"] {
        let res = client.get(srv.url(path)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "GET {path}");
        let err: Value = res.json().await.unwrap();
        assert_eq!(err["message"], "Item ID must be a positive number");
    }

    let res = client.delete(srv.url("/api/items/0")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn seeded_catalog_filters_by_category() {
    let srv = TestServer::seeded().await;
    let client = reqwest::Client::new();

    let all: Vec<Value> = client
        .get(srv.url("/api/items"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0]["name"], "iPhone 15 Pro Max");

    let electronics: Vec<Value> = client
        .get(srv.url("/api/items?category=electronics"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let ids: Vec<u64> = electronics.iter().map(|i| i["id"].as_u64().unwrap()).collect();
    assert_eq!(ids, vec![1, 3]);

    let none: Vec<Value> = client
        .get(srv.url("/api/items?category=Toys"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(none.is_empty());

    // Blank filter means "no filter".
    let blank: Vec<Value> = client
        .get(srv.url("/api/items?category=%20"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(blank.len(), 3);

    let created = create(&client, &srv, &item_body("Widget", "Tools")).await;
    assert_eq!(created["id"], 4);
}

#[tokio::test]
async fn health_and_root_metadata() {
    let srv = TestServer::empty().await;
    let client = reqwest::Client::new();

    let res = client.get(srv.url("/api/items/health")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let health: Value = res.json().await.unwrap();
    assert_eq!(health["status"], "UP");
    assert_eq!(health["message"], "Item Catalog API is running");
    assert!(health["timestamp"].is_string());

    let res = client.get(srv.url("/")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let text = res.text().await.unwrap();
    let root: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(root["application"], "Item Catalog API");
    assert_eq!(root["endpoints"]["POST /api/items"], "Create a new item");
    // Declaration order survives serialization.
    assert!(text.find("POST /api/items").unwrap() < text.find("GET /api/items/stats").unwrap());
}

#[tokio::test]
async fn unknown_route_gets_error_body() {
    let srv = TestServer::empty().await;
    let client = reqwest::Client::new();

    let res = client.get(srv.url("/api/nothing-here")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let err: Value = res.json().await.unwrap();
    assert_eq!(err["error"], "Not Found");
    assert_eq!(err["path"], "/api/nothing-here");
}

async fn assert_error_body(res: reqwest::Response, status: StatusCode, error: &str, path: &str) -> Value {
    assert_eq!(res.status(), status, "{path}");
    let err: Value = res.json().await.unwrap();
    assert_eq!(err["status"], status.as_u16());
    assert_eq!(err["error"], error);
    assert_eq!(err["path"], path);
    assert!(err["timestamp"].is_string());
    assert!(err["message"].as_str().is_some_and(|m| !m.is_empty()));
    err
}

#[tokio::test]
async fn rejected_query_gets_error_body() {
    let srv = TestServer::seeded().await;
    let client = reqwest::Client::new();

    let res = client
        .get(srv.url("/api/items?category=a&category=b"))
        .send()
        .await
        .unwrap();
    let err = assert_error_body(res, StatusCode::BAD_REQUEST, "Bad Request", "/api/items").await;
    assert!(err["message"].as_str().unwrap().contains("duplicate field"));
}

#[tokio::test]
async fn undecodable_id_gets_error_body() {
    let srv = TestServer::seeded().await;
    let client = reqwest::Client::new();

    let res = client.get(srv.url("/api/items/%FF")).send().await.unwrap();
    assert_error_body(res, StatusCode::BAD_REQUEST, "Bad Request", "/api/items/%FF").await;

    let res = client.delete(srv.url("/api/items/%FF")).send().await.unwrap();
    assert_error_body(res, StatusCode::BAD_REQUEST, "Bad Request", "/api/items/%FF").await;
}

#[tokio::test]
async fn unsupported_method_gets_error_body() {
    let srv = TestServer::seeded().await;
    let client = reqwest::Client::new();

    let res = client.patch(srv.url("/api/items/1")).send().await.unwrap();
    let err = assert_error_body(
        res,
        StatusCode::METHOD_NOT_ALLOWED,
        "Method Not Allowed",
        "/api/items/1",
    )
    .await;
    assert_eq!(err["message"], "Request method 'PATCH' is not supported");

    let res = client.post(srv.url("/api/items/stats")).send().await.unwrap();
    assert_error_body(
        res,
        StatusCode::METHOD_NOT_ALLOWED,
        "Method Not Allowed",
        "/api/items/stats",
    )
    .await;
}
