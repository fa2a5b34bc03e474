//! Tests for the JSON-RPC endpoint

use super::{AppState, router};
use crate::{StaticContext, Validator, util::base64url};
use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use tower::ServiceExt;

/// Helper that posts one JSON-RPC call and returns the decoded response body
async fn call(method: &str, params: Value) -> Value {
    let app = router(AppState::new(Validator::new(StaticContext::new("a", "g.x."))));
    let body = json!({ "jsonrpc": "2.0", "method": method, "params": params, "id": 1 });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .expect("valid request"),
        )
        .await
        .expect("router is infallible");
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("readable body");
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn test_normalize_outgoing_transfer_over_rpc() {
    let response = call("normalizeOutgoingTransfer", json!({ "id": "1", "amount": "5", "to": "b" })).await;

    assert_eq!(response["id"], json!(1));
    assert!(response.get("error").is_none());
    assert_eq!(
        response["result"],
        json!({
            "value": { "id": "1", "to": "b", "amount": "5", "from": "a", "ledger": "g.x." },
            "warnings": [],
        })
    );
}

#[tokio::test]
async fn test_rejected_transfer_maps_to_invalid_params() {
    let response = call("normalizeIncomingTransfer", json!({ "id": "1", "amount": "5", "to": "b" })).await;

    assert!(response.get("result").is_none());
    assert_eq!(response["error"]["code"], json!(-32602));
    assert_eq!(response["error"]["message"], json!("to (b) must match account: a"));
}

#[tokio::test]
async fn test_legacy_message_reports_warning() {
    let response = call("normalizeIncomingMessage", json!({ "account": "b", "ilp": "AAAA" })).await;

    assert_eq!(response["result"]["value"], json!({ "account": "b", "ilp": "AAAA" }));
    assert_eq!(response["result"]["warnings"], json!(["deprecatedAccountField"]));
}

#[tokio::test]
async fn test_validate_fulfillment_over_rpc() {
    let fulfillment = base64url(&[3u8; 32]);
    let response = call("validateFulfillment", json!(fulfillment)).await;
    assert_eq!(response["result"]["value"], json!(fulfillment));

    let response = call("validateFulfillment", json!("short")).await;
    assert_eq!(response["error"]["code"], json!(-32602));
}

#[tokio::test]
async fn test_unknown_method() {
    let response = call("sendTransfer", json!({})).await;
    assert_eq!(response["error"]["code"], json!(-32601));
}
