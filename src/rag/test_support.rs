//! Fixtures shared by the rag and api tests

use std::sync::Arc;

use wiremock::matchers::body_string_contains;
use wiremock::matchers::method;
use wiremock::matchers::path;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;

use crate::config::AppConfig;
use crate::embeddings::EmbeddingConfig;
use crate::embeddings::EmbeddingProvider;
use crate::embeddings::EmbeddingService;
use crate::index::FlatIndex;
use crate::index::IndexBundle;
use crate::index::IndexHeader;
use crate::llm::LlmService;
use crate::models::JobMetadata;
use crate::rag::RagService;
use crate::rag::Retriever;

/// Ollama-style embedding endpoint: "nurse" queries point along y, others along x
pub async fn mock_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/embeddings"))
        .and(body_string_contains("nurse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"embedding": [0.0, 3.0]})))
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/embeddings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"embedding": [3.0, 0.0]})))
        .with_priority(2)
        .mount(&server)
        .await;
    server
}

fn metadata(id: &str, title: &str, company: &str) -> JobMetadata {
    JobMetadata {
        id: id.to_string(),
        title: title.to_string(),
        company: company.to_string(),
        location: "Remote".to_string(),
        job_type: "Full-time".to_string(),
        experience: "Mid".to_string(),
        category: "General".to_string(),
    }
}

/// Three unit rows: x-axis, y-axis, and the diagonal between them
pub fn bundle() -> IndexBundle {
    let diagonal = std::f32::consts::FRAC_1_SQRT_2;
    let index = FlatIndex::from_raw(2, vec![1.0, 0.0, 0.0, 1.0, diagonal, diagonal])
        .expect("valid index");
    IndexBundle {
        header: IndexHeader {
            format_version: crate::index::store::FORMAT_VERSION,
            model: "all-minilm".to_string(),
            dimension: 2,
            rows: 3,
            metadata_sha256: String::new(),
            created_at: 0,
        },
        index,
        metadata: vec![
            metadata("1", "Backend Engineer", "DataFlow"),
            metadata("2", "Ward Nurse", "City Hospital"),
            metadata("3", "Clinical Data Analyst", "MedStats"),
        ],
    }
}

pub fn embedding_service(endpoint: &str) -> EmbeddingService {
    EmbeddingService::from_config(EmbeddingConfig {
        provider: EmbeddingProvider::Ollama,
        model: "all-minilm".to_string(),
        dimension: 2,
        endpoint: endpoint.to_string(),
        api_key: None,
        batch_size: 8,
    })
    .expect("embedding service")
}

/// Gemini and Hugging Face both pointed at the mock server
pub fn config(endpoint: &str) -> AppConfig {
    let mut config = AppConfig::default();
    config.llm.gemini.endpoint = endpoint.to_string();
    config.llm.gemini.api_key = Some("g-key".to_string());
    config.llm.huggingface.endpoint = endpoint.to_string();
    config.llm.huggingface.api_key = Some("hf-key".to_string());
    config
}

pub fn rag_service(endpoint: &str) -> RagService {
    let retriever = Retriever::new(Arc::new(bundle()), Arc::new(embedding_service(endpoint)));
    let llm = LlmService::new(&config(endpoint)).expect("llm service");
    RagService::new(retriever, Arc::new(llm))
}
