//! API Server Module
//!
//! JSON-RPC 2.0 over HTTP. Every method takes the object to check as `params`
//! and answers either with `{ "value": ..., "warnings": [...] }` or with an
//! invalid-params error carrying the validation message.

use crate::{InvalidFieldsError, Normalized, config::Config, validation::Validator};
use axum::{Json, Router, extract::State, routing::post};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

const INVALID_PARAMS: i32 = -32602;
const METHOD_NOT_FOUND: i32 = -32601;
const INTERNAL_ERROR: i32 = -32603;

/// Shared application state that is accessible across all request handlers
#[derive(Clone)]
pub struct AppState {
    validator: Arc<Validator>,
}

impl AppState {
    pub fn new(validator: Validator) -> Self {
        Self {
            validator: Arc::new(validator),
        }
    }
}

/// The main API server struct
pub struct Server {
    config: Config,
    state: AppState,
}

impl Server {
    /// Creates a server whose validator uses the configured plugin identity
    pub fn new(config: Config) -> Self {
        let validator = Validator::new(config.plugin_context());
        let state = AppState::new(validator);
        Self { config, state }
    }

    /// Binds the configured address and serves until the process exits
    pub async fn start(self) -> anyhow::Result<()> {
        let app = router(self.state);

        let addr = format!("{}:{}", self.config.api.host, self.config.api.port);
        info!("API server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}

/// Router with a single POST endpoint at "/"
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", post(handle_rpc))
        .with_state(state)
}

/// JSON-RPC 2.0 request structure
///
/// The `jsonrpc` version tag is accepted but not checked.
#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    method: String,
    #[serde(default)]
    params: Value,
    id: Value,
}

/// JSON-RPC 2.0 response structure; exactly one of `result` / `error` is set
#[derive(Debug, Serialize)]
struct JsonRpcResponse {
    jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
    id: Value,
}

#[derive(Debug, Serialize)]
struct JsonRpcError {
    code: i32,
    message: String,
}

impl JsonRpcResponse {
    fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    fn failure(id: Value, code: i32, message: String) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(JsonRpcError { code, message }),
            id,
        }
    }
}

enum RpcFailure {
    UnknownMethod,
    Invalid(InvalidFieldsError),
    Encode(serde_json::Error),
}

impl From<InvalidFieldsError> for RpcFailure {
    fn from(e: InvalidFieldsError) -> Self {
        RpcFailure::Invalid(e)
    }
}

impl From<serde_json::Error> for RpcFailure {
    fn from(e: serde_json::Error) -> Self {
        RpcFailure::Encode(e)
    }
}

/// Routes the request to the validator operation named by `method`
async fn handle_rpc(
    State(state): State<AppState>,
    Json(request): Json<JsonRpcRequest>,
) -> Json<JsonRpcResponse> {
    info!("Received RPC request: {}", request.method);

    let outcome = dispatch(&state.validator, &request.method, &request.params);
    let response = match outcome {
        Ok(result) => JsonRpcResponse::success(request.id, result),
        Err(RpcFailure::UnknownMethod) => {
            JsonRpcResponse::failure(request.id, METHOD_NOT_FOUND, "Method not found".to_string())
        }
        Err(RpcFailure::Invalid(e)) => {
            warn!("Rejected {}: {}", request.method, e);
            JsonRpcResponse::failure(request.id, INVALID_PARAMS, e.to_string())
        }
        Err(RpcFailure::Encode(e)) => {
            JsonRpcResponse::failure(request.id, INTERNAL_ERROR, format!("Internal error: {e}"))
        }
    };

    Json(response)
}

fn dispatch(validator: &Validator, method: &str, params: &Value) -> Result<Value, RpcFailure> {
    let result = match method {
        "normalizeOutgoingTransfer" => serde_json::to_value(validator.normalize_outgoing_transfer(params)?)?,
        "normalizeIncomingTransfer" => serde_json::to_value(validator.normalize_incoming_transfer(params)?)?,
        "normalizeOutgoingMessage" => serde_json::to_value(validator.normalize_outgoing_message(params)?)?,
        "normalizeIncomingMessage" => serde_json::to_value(validator.normalize_incoming_message(params)?)?,
        "validateFulfillment" => serde_json::to_value(Normalized {
            value: validator.validate_fulfillment(params)?,
            warnings: Vec::new(),
        })?,
        _ => return Err(RpcFailure::UnknownMethod),
    };
    Ok(result)
}
