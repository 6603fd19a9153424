//! JSAF Audit HTTP Server

use axum::{
    extract::{Json, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};

use jsaf_audit::prelude::*;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

#[derive(Debug, Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    fn from_result(result: AuditResult<T>) -> (StatusCode, Json<Self>) {
        match result {
            Ok(result) => (
                StatusCode::OK,
                Json(Self {
                    success: true,
                    error: None,
                    result: Some(result),
                }),
            ),
            Err(e) => {
                log::warn!("Rejected request: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    Json(Self {
                        success: false,
                        error: Some(e.to_string()),
                        result: None,
                    }),
                )
            }
        }
    }
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn audit_handler(
    Query(options): Query<AuditOptions>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    ApiResponse::from_result(
        JsafDocument::from_value(body).map(|doc| run_audit(&doc, &options)),
    )
}

async fn overview_handler(Json(body): Json<Value>) -> impl IntoResponse {
    ApiResponse::from_result(
        JsafDocument::from_value(body).map(|doc| ModelOverview::from_document(&doc)),
    )
}

fn create_router() -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/v1/audit", post(audit_handler))
        .route("/api/v1/overview", post(overview_handler))
        .layer(cors)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "8087".to_string());
    let addr = format!("{}:{}", host, port);

    log::info!("JSAF Audit Server listening on http://{}", addr);
    log::info!("  Health check: GET  /health");
    log::info!("  Audit:        POST /api/v1/audit");
    log::info!("  Overview:     POST /api/v1/overview");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, create_router()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::json;
    use tower::ServiceExt;

    async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = create_router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn small_force_model() -> Value {
        json!({
            "CurveMembers": [{ "Id": "B1" }],
            "Results1D": [{ "Member": "B1", "Load": "LC1", "aN": [0.004] }],
            "Materials": []
        })
    }

    #[tokio::test]
    async fn test_audit_uses_default_options() {
        let (status, body) = post_json("/api/v1/audit", small_force_model()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        let counts = &body["result"]["results_1d"]["summary"]["counts"];
        assert_eq!(counts["partial"], 1);
        assert_eq!(counts["empty"], 0);
        assert_eq!(body["result"]["empty_collections"][0], "Materials");
    }

    #[tokio::test]
    async fn test_audit_reads_options_from_query() {
        let (status, body) = post_json(
            "/api/v1/audit?tolerance=0.01&check_empty_collections=false",
            small_force_model(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let counts = &body["result"]["results_1d"]["summary"]["counts"];
        assert_eq!(counts["empty"], 1);
        assert_eq!(counts["partial"], 0);
        assert_eq!(body["result"]["empty_collections"], json!([]));
    }

    #[tokio::test]
    async fn test_non_object_document_is_a_bad_request() {
        let (status, body) = post_json("/api/v1/overview", json!([1, 2])).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("top level must be an object"));
    }
}
