//! HTTP server implementation

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::AllowHeaders;
use tower_http::cors::AllowMethods;
use tower_http::cors::AllowOrigin;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing::warn;

use crate::api::handlers::AppState;
use crate::api::routes;
use crate::config::AppConfig;
use crate::config::ServerConfig;
use crate::embeddings::EmbeddingService;
use crate::rag::RagService;
use crate::Result;

/// Build application state, tolerating a missing index or a broken embedding setup
pub fn build_state(config: &AppConfig) -> Result<AppState> {
    let embedding_service = match EmbeddingService::new(config) {
        Ok(service) => Some(Arc::new(service)),
        Err(e) => {
            warn!("Embedding service not available: {}", e);
            None
        }
    };

    let rag = match &embedding_service {
        Some(service) => match RagService::open_with(config, Arc::clone(service)) {
            Ok(rag) => {
                let bundle = rag.retriever().bundle();
                info!(
                    "Index loaded: {} vectors (dim {}), {} metadata records",
                    bundle.index.len(),
                    bundle.index.dimension(),
                    bundle.metadata.len()
                );
                Some(rag)
            }
            Err(e) => {
                warn!("Index not loaded, /search will fail until it is built: {}", e);
                None
            }
        },
        None => None,
    };

    Ok(AppState {
        embedding_service,
        rag,
        default_top_k: config.server.default_top_k,
    })
}

/// CORS for the configured origins; credentials require explicit (mirrored) methods and headers
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Router with every middleware layer applied
pub fn build_app(state: AppState, server: &ServerConfig) -> Router {
    routes::api_routes(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(&server.cors_origins))
            .layer(TimeoutLayer::new(Duration::from_secs(server.request_timeout_secs)))
            .layer(CompressionLayer::new()),
    )
}

/// Start the API server
pub async fn serve_api(config: &AppConfig, host: String, port: u16) -> Result<()> {
    info!("Starting jobrag API server...");

    let state = build_state(config)?;
    let app = build_app(state, &config.server);

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("API server listening on http://{}", addr);
    info!("Available endpoints:");
    info!("  GET  /        - Service info");
    info!("  GET  /health  - Health check");
    info!("  POST /search  - Search jobs and get AI response");

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::header;
    use axum::http::Method;
    use axum::http::Request;
    use axum::http::StatusCode;
    use tower::ServiceExt;
    use wiremock::matchers::method;
    use wiremock::matchers::path;
    use wiremock::Mock;
    use wiremock::ResponseTemplate;

    use super::*;
    use crate::api::types::ErrorBody;
    use crate::api::types::HealthResponse;
    use crate::api::types::SearchResponse;
    use crate::rag::test_support;

    fn app(endpoint: &str, loaded: bool) -> Router {
        let state = AppState {
            embedding_service: Some(Arc::new(test_support::embedding_service(endpoint))),
            rag: loaded.then(|| test_support::rag_service(endpoint)),
            default_top_k: 5,
        };
        build_app(state, &ServerConfig::default())
    }

    async fn call(app: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    fn search_request(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/search")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_search_returns_ranked_jobs() {
        let server = test_support::mock_server().await;
        Mock::given(method("POST"))
            .and(path("/models/microsoft/DialoGPT-medium"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"generated_text": "The ward nurse role fits."}
            ])))
            .mount(&server)
            .await;

        let (status, body) = call(
            app(&server.uri(), true),
            search_request(serde_json::json!({
                "query": "nurse", "k": 2, "llm_provider": "huggingface"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let response: SearchResponse = serde_json::from_slice(&body).unwrap();
        assert!(response.success);
        assert_eq!(response.answer, "The ward nurse role fits.");
        assert_eq!(response.total_jobs, 2);
        assert_eq!(response.llm_provider, "huggingface");
        assert_eq!(response.jobs[0].id, "2");
        assert_eq!(response.jobs[0].job_type, "Full-time");
        assert_eq!(response.jobs[1].id, "3");

        let raw: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(raw["jobs"][0]["type"], "Full-time");
    }

    #[tokio::test]
    async fn test_search_validation() {
        let server = test_support::mock_server().await;

        let (status, body) = call(
            app(&server.uri(), true),
            search_request(serde_json::json!({"query": "   "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ErrorBody = serde_json::from_slice(&body).unwrap();
        assert!(error.detail.contains("query"));

        let (status, _) = call(
            app(&server.uri(), true),
            search_request(serde_json::json!({"query": "nurse", "k": 0})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = call(
            app(&server.uri(), true),
            search_request(serde_json::json!({"k": 3})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_search_without_index_is_500() {
        let server = test_support::mock_server().await;
        let (status, body) = call(
            app(&server.uri(), false),
            search_request(serde_json::json!({"query": "nurse"})),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let error: ErrorBody = serde_json::from_slice(&body).unwrap();
        assert!(error.detail.contains("not loaded"));
    }

    #[tokio::test]
    async fn test_health_reports_index_state() {
        let server = test_support::mock_server().await;
        let get = || Request::get("/health").body(Body::empty()).unwrap();

        let (status, body) = call(app(&server.uri(), true), get()).await;
        assert_eq!(status, StatusCode::OK);
        let health: HealthResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(health.status, "healthy");
        assert!(health.models_loaded.embedding_model);
        assert!(health.models_loaded.vector_index);
        assert_eq!(health.total_jobs, 3);

        let (_, body) = call(app(&server.uri(), false), get()).await;
        let health: HealthResponse = serde_json::from_slice(&body).unwrap();
        assert!(!health.models_loaded.job_metadata);
        assert_eq!(health.total_jobs, 0);
    }

    #[tokio::test]
    async fn test_root_lists_endpoints() {
        let server = test_support::mock_server().await;
        let (status, body) = call(
            app(&server.uri(), false),
            Request::get("/").body(Body::empty()).unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let banner: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(banner["endpoints"]["/search"].is_string());
    }

    #[tokio::test]
    async fn test_cors_allows_configured_origin() {
        let server = test_support::mock_server().await;
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/search")
            .header(header::ORIGIN, "http://localhost:3000")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();

        let response = app(&server.uri(), false).oneshot(request).await.unwrap();
        let headers = response.headers();
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://localhost:3000"
        );
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
            "true"
        );
    }

    #[test]
    fn test_build_state_without_index_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.files.index_file = dir.path().join("missing.index");
        config.files.metadata_file = dir.path().join("missing.json");

        let state = build_state(&config).unwrap();
        assert!(state.embedding_service.is_some());
        assert!(state.rag.is_none());
    }

    #[tokio::test]
    async fn test_health_reports_missing_embedding_service() {
        let mut config = AppConfig::default();
        config.embeddings.provider = "word2vec".to_string();

        let state = build_state(&config).unwrap();
        assert!(state.embedding_service.is_none());
        assert!(state.rag.is_none());

        let (status, body) = call(
            build_app(state, &config.server),
            Request::get("/health").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let health: HealthResponse = serde_json::from_slice(&body).unwrap();
        assert!(!health.models_loaded.embedding_model);
        assert!(!health.models_loaded.vector_index);
    }
}
