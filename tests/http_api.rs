use receipt_points::application::service::ReceiptService;
use receipt_points::domain::receipt::Origin;
use receipt_points::infrastructure::in_memory::InMemoryReceiptStore;
use receipt_points::interfaces::http::router;
use serde_json::{Value, json};
use std::sync::Arc;

/// Boots the router on an ephemeral port and returns its base URL plus a
/// handle on the backing store for row-count assertions.
async fn spawn_server() -> (String, Arc<InMemoryReceiptStore>) {
    let store = Arc::new(InMemoryReceiptStore::new());
    let origin = Origin {
        host: "test-host".to_string(),
        port: 0,
    };
    let service = Arc::new(ReceiptService::new(store.clone(), origin));
    let app = router(service);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), store)
}

fn corner_market_body() -> Value {
    json!({
        "retailer": "M&M Corner Market",
        "purchaseDate": "2022-03-20",
        "purchaseTime": "14:33",
        "total": "9.00",
        "items": [
            {"shortDescription": "Gatorade", "price": "2.25"},
            {"shortDescription": "Gatorade", "price": "2.25"},
            {"shortDescription": "Gatorade", "price": "2.25"},
            {"shortDescription": "Gatorade", "price": "2.25"}
        ]
    })
}

#[tokio::test]
async fn test_process_then_points_round_trip() {
    let (base, _store) = spawn_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{}/receipts/process", base))
        .json(&corner_market_body())
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let id = body["id"].as_str().unwrap().to_string();

    let resp = client
        .get(format!("{}/receipts/{}/points", base, id))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["id"], id.as_str());
    assert_eq!(body["points"], 109);
}

#[tokio::test]
async fn test_missing_field_is_400_and_nothing_persisted() {
    let (base, store) = spawn_server().await;
    let client = reqwest::Client::new();

    let mut body = corner_market_body();
    body.as_object_mut().unwrap().remove("items");

    let resp = client
        .post(format!("{}/receipts/process", base))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Missing required field: items");

    assert_eq!(store.len().await, 0);
}

#[tokio::test]
async fn test_missing_fields_checked_in_fixed_order() {
    let (base, _store) = spawn_server().await;
    let client = reqwest::Client::new();

    // Everything missing: retailer is reported first.
    let resp = client
        .post(format!("{}/receipts/process", base))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Missing required field: retailer");
}

#[tokio::test]
async fn test_unknown_id_is_404() {
    let (base, _store) = spawn_server().await;
    let client = reqwest::Client::new();

    for id in ["00000000-0000-0000-0000-000000000000", "not-a-uuid"] {
        let resp = client
            .get(format!("{}/receipts/{}/points", base, id))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 404);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["error"], "Receipt ID not found");
    }
}

#[tokio::test]
async fn test_repeated_gets_return_same_points_and_append_log_rows() {
    let (base, store) = spawn_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{}/receipts/process", base))
        .json(&corner_market_body())
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    let id = body["id"].as_str().unwrap().to_string();
    assert_eq!(store.len().await, 1);

    for _ in 0..3 {
        let resp = client
            .get(format!("{}/receipts/{}/points", base, id))
            .send()
            .await
            .unwrap();
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["points"], 109);
    }

    // One POST row plus one GET log row per lookup.
    assert_eq!(store.len().await, 4);
}

#[tokio::test]
async fn test_malformed_total_is_400() {
    let (base, store) = spawn_server().await;
    let client = reqwest::Client::new();

    let mut body = corner_market_body();
    body["total"] = json!("nine dollars");

    let resp = client
        .post(format!("{}/receipts/process", base))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Invalid value for field: total");
    assert_eq!(store.len().await, 0);
}

#[tokio::test]
async fn test_health_endpoint() {
    let (base, _store) = spawn_server().await;

    let resp = reqwest::get(format!("{}/health", base)).await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
}
