//! API request and response types

use serde::Deserialize;
use serde::Serialize;

use crate::rag::ScoredJob;

/// `POST /search` body
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default)]
    pub k: Option<usize>,
    #[serde(default)]
    pub llm_provider: Option<String>,
}

/// One ranked job in a search response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobResult {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: String,
    pub experience: String,
    pub category: String,
    pub score: f32,
}

impl From<ScoredJob> for JobResult {
    fn from(scored: ScoredJob) -> Self {
        let job = scored.job;
        Self {
            id: job.id,
            title: job.title,
            company: job.company,
            location: job.location,
            job_type: job.job_type,
            experience: job.experience,
            category: job.category,
            score: scored.score,
        }
    }
}

/// `POST /search` response
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub success: bool,
    pub answer: String,
    pub jobs: Vec<JobResult>,
    pub total_jobs: usize,
    pub llm_provider: String,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub models_loaded: ModelsLoaded,
    pub total_jobs: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ModelsLoaded {
    pub embedding_model: bool,
    pub vector_index: bool,
    pub job_metadata: bool,
}

/// Error body shared by every failing endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}
