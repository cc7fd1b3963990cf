//! API request handlers

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;
use serde_json::Value;
use tracing::error;
use tracing::info;

use crate::api::types::*;
use crate::embeddings::EmbeddingService;
use crate::errors::JobRagError;
use crate::rag::RagQuery;
use crate::rag::RagService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// `None` when the configured embedding provider could not be set up
    pub embedding_service: Option<Arc<EmbeddingService>>,
    /// `None` when the index bundle could not be loaded at startup
    pub rag: Option<RagService>,
    pub default_top_k: usize,
}

impl AppState {
    fn total_jobs(&self) -> usize {
        self.rag
            .as_ref()
            .map_or(0, |rag| rag.retriever().bundle().len())
    }
}

/// Handler error rendered as `{"detail": ...}`
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl From<JobRagError> for ApiError {
    fn from(err: JobRagError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            Self::BadRequest(detail) => (StatusCode::BAD_REQUEST, detail),
            Self::Internal(detail) => (StatusCode::INTERNAL_SERVER_ERROR, detail),
        };
        (status, Json(ErrorBody { detail })).into_response()
    }
}

/// Service banner
pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "JOBATHON RAG API - CAREER COPILOT",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "/search": "POST - Search jobs and get AI response",
            "/health": "GET - Health check",
        }
    }))
}

/// Health check handler
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let loaded = state.rag.is_some();
    Json(HealthResponse {
        status: "healthy".to_string(),
        models_loaded: ModelsLoaded {
            embedding_model: state.embedding_service.is_some(),
            vector_index: loaded,
            job_metadata: loaded,
        },
        total_jobs: state.total_jobs(),
    })
}

/// Retrieve jobs for the query and generate an answer over them
pub async fn search(
    State(state): State<AppState>,
    body: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let query = request.query.trim();
    if query.is_empty() {
        return Err(ApiError::BadRequest("query must not be empty".to_string()));
    }
    let k = request.k.unwrap_or(state.default_top_k);
    if k == 0 {
        return Err(ApiError::BadRequest("k must be at least 1".to_string()));
    }

    info!("POST /search: {} (k={})", query, k);

    let rag = state
        .rag
        .as_ref()
        .ok_or_else(|| ApiError::from(JobRagError::IndexNotLoaded))?;

    let response = rag
        .query(
            RagQuery::new(query)
                .with_k(k)
                .with_provider(request.llm_provider),
        )
        .await
        .map_err(|e| {
            error!("Error in /search: {}", e);
            ApiError::from(e)
        })?;

    let jobs: Vec<JobResult> = response.jobs.into_iter().map(JobResult::from).collect();
    Ok(Json(SearchResponse {
        success: true,
        answer: response.answer,
        total_jobs: jobs.len(),
        jobs,
        llm_provider: response.llm_provider,
    }))
}
