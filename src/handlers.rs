use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
};
use serde_json::Value;
use tower_http::{cors::CorsLayer, services::ServeDir};
use tracing::{error, info, warn};

use crate::aptos_client::AptosClient;
use crate::error::ExplainError;
use crate::models::{ExplainRequest, ExplainResponse, RecentQuery, RecentResponse, TransactionExplanation};
use crate::parser;

const DEFAULT_RECENT: usize = 10;

pub type SharedClient = Arc<AptosClient>;

pub fn router(client: SharedClient, static_dir: &str) -> Router {
    Router::new()
        // API routes
        .route("/api/explain", post(explain_transaction)) // fetch + explain by hash
        .route("/api/interpret", post(interpret_transaction)) // explain a posted raw record
        .route("/api/recent", get(recent_transactions))
        .route("/api/health", get(health_check))
        .fallback_service(ServeDir::new(static_dir))
        // Enable CORS so frontend can call our API
        .layer(CorsLayer::permissive())
        .with_state(client)
}

// Handle POST /api/explain requests

//Receives a transaction hash, fetches it from the Aptos node and returns the explanation as JSON.
pub async fn explain_transaction(
    State(client): State<SharedClient>,
    Json(payload): Json<ExplainRequest>,
) -> (StatusCode, Json<ExplainResponse>) {
    info!("Explaining transaction: {}", payload.hash);

    match client.explain_transaction(&payload.hash).await {
        Ok(explanation) => {
            info!("Successfully explained transaction {}", explanation.hash);
            explained(explanation)
        }
        Err(e) => {
            error!("Failed to explain transaction {}: {}", payload.hash, e);
            failed(status_for(&e), e.user_message())
        }
    }
}

// Handle POST /api/interpret: explain a raw transaction record without touching the network
pub async fn interpret_transaction(Json(raw): Json<Value>) -> (StatusCode, Json<ExplainResponse>) {
    match parser::explain_value(raw) {
        Ok(explanation) => explained(explanation),
        Err(e) => {
            warn!("Rejected raw transaction: {}", e);
            failed(StatusCode::BAD_REQUEST, e.to_string())
        }
    }
}

pub async fn recent_transactions(
    State(client): State<SharedClient>,
    Query(query): Query<RecentQuery>,
) -> Result<Json<RecentResponse>, (StatusCode, String)> {
    let limit = query.limit.unwrap_or(DEFAULT_RECENT);

    client
        .recent_transactions(limit)
        .await
        .map(|hashes| Json(RecentResponse { hashes }))
        .map_err(|e| {
            error!("Failed to load recent transactions: {}", e);
            (status_for(&e), e.user_message())
        })
}

/// Health check endpoint - just returns OK
pub async fn health_check() -> &'static str {
    "OK"
}

fn status_for(err: &ExplainError) -> StatusCode {
    match err {
        ExplainError::InvalidHash(_) | ExplainError::MalformedTransaction(_) => StatusCode::BAD_REQUEST,
        ExplainError::NotFound(_) => StatusCode::NOT_FOUND,
        ExplainError::Node { .. } | ExplainError::Http(_) => StatusCode::BAD_GATEWAY,
    }
}

fn explained(explanation: TransactionExplanation) -> (StatusCode, Json<ExplainResponse>) {
    (
        StatusCode::OK,
        Json(ExplainResponse {
            success: true,
            explanation: Some(explanation),
            error: None,
        }),
    )
}

fn failed(status: StatusCode, message: String) -> (StatusCode, Json<ExplainResponse>) {
    (
        status,
        Json(ExplainResponse {
            success: false,
            explanation: None,
            error: Some(message),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_interpret_returns_explanation() {
        let raw = json!({
            "hash": "0xfeed",
            "success": true,
            "gas_used": "10",
            "gas_unit_price": "100",
            "payload": {"function": "0x1::aptos_account::transfer", "arguments": [], "type_arguments": []}
        });

        let (status, Json(response)) = interpret_transaction(Json(raw)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(response.success);
        assert!(response.error.is_none());

        let explanation = response.explanation.unwrap();
        assert_eq!(explanation.hash, "0xfeed");
        assert_eq!(explanation.function_calls.len(), 1);
    }

    #[tokio::test]
    async fn test_interpret_rejects_non_objects() {
        let (status, Json(response)) = interpret_transaction(Json(json!(["0xfeed"]))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!response.success);
        assert!(response.explanation.is_none());
        assert!(response.error.unwrap().contains("Malformed"));
    }

    #[tokio::test]
    async fn test_invalid_hash_is_rejected_before_fetching() {
        // Unroutable node: the hash check must fail first
        let config = crate::config::Config {
            node_url: "http://127.0.0.1:9".to_string(),
            ..Default::default()
        };
        let client = Arc::new(AptosClient::new(&config).unwrap());

        let (status, Json(response)) = explain_transaction(
            State(client),
            Json(ExplainRequest {
                hash: "not a hash".to_string(),
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error.as_deref(), Some("Transaction not found or invalid hash"));
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(&ExplainError::NotFound("0x1".into())), StatusCode::NOT_FOUND);
        assert_eq!(
            status_for(&ExplainError::Node {
                status: 500,
                body: String::new()
            }),
            StatusCode::BAD_GATEWAY
        );
    }

    #[tokio::test]
    async fn test_health_check() {
        assert_eq!(health_check().await, "OK");
    }
}
