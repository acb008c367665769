mod common;

use axum_test::TestServer;
use common::{create_test_app, create_test_app_state};
use hmac::{Hmac, Mac};
use http::StatusCode;
use serde_json::json;
use sha2::Sha256;
use uuid::Uuid;

fn sign(payload: &[u8]) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(common::TEST_WEBHOOK_SECRET.as_bytes()).unwrap();
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

fn test_server() -> TestServer {
    let state = create_test_app_state("http://localhost:1/unreachable");
    TestServer::new(create_test_app(state)).unwrap()
}

#[tokio::test]
async fn invalid_customer_payload_is_rejected_with_envelope() {
    let server = test_server();

    let response = server
        .post("/api/customers")
        .json(&json!({
            "user_id": Uuid::new_v4(),
            "first_name": "Ada",
            "last_name": "Obi",
            "email": "not-an-email",
            "phone_number": "+2348012345678",
            "identity_number": "12345678901"
        }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("email"));
}

#[tokio::test]
async fn transfer_below_minimum_amount_is_rejected() {
    let server = test_server();

    let response = server
        .post("/api/transfers")
        .json(&json!({
            "wallet_id": Uuid::new_v4(),
            "amount": 50,
            "destination_type": "wallet",
            "destination_wallet_id": Uuid::new_v4()
        }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn bank_transfer_routing_code_accepted_under_both_names() {
    let server = test_server();

    // Validation passes with either alias; both then fail at the wallet
    // lookup because there is no database behind this server.
    for key in ["bank_code", "sortCode"] {
        let response = server
            .post("/api/transfers")
            .json(&json!({
                "wallet_id": Uuid::new_v4(),
                "amount": 10_000,
                "destination_type": "bank",
                "account_number": "0123456789",
                "account_name": "Ada Obi",
                key: "000013"
            }))
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], false);
    }
}

#[tokio::test]
async fn resolve_account_requires_a_routing_code() {
    let server = test_server();

    let response = server
        .get("/api/resolve_account")
        .add_query_param("account_number", "0123456789")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("bank_code"));
}

#[tokio::test]
async fn webhook_with_bad_signature_is_rejected() {
    let server = test_server();

    let payload = json!({
        "event": "transfer.success",
        "data": {"reference": "pyr_abc"}
    });

    let response = server
        .post("/webhooks/xpress")
        .add_header("x-xpress-signature", "deadbeef")
        .json(&payload)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn webhook_without_signature_is_rejected() {
    let server = test_server();

    let response = server
        .post("/webhooks/xpress")
        .json(&json!({"event": "transfer.success", "data": {"reference": "pyr_abc"}}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn webhook_ignores_unrelated_events() {
    let server = test_server();

    let payload =
        serde_json::to_vec(&json!({"event": "customer.created", "data": {"reference": "n/a"}}))
            .unwrap();
    let signature = sign(&payload);

    let response = server
        .post("/webhooks/xpress")
        .add_header("x-xpress-signature", signature)
        .add_header("content-type", "application/json")
        .bytes(payload.into())
        .await;

    response.assert_status(StatusCode::OK);
}

#[tokio::test]
async fn health_reports_database_trouble() {
    let server = test_server();

    let response = server.get("/api/health").await;

    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert!(body["status"].as_str().unwrap().starts_with("503"));
}
