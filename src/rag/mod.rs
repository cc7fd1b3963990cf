//! RAG (Retrieval-Augmented Generation) over job postings
//!
//! - Semantic retrieval against the flat vector index
//! - Context assembly from the top hits
//! - LLM-based answer generation with a fixed fallback
//!
//! # Examples
//!
//! ```rust,no_run
//! use jobrag::config::AppConfig;
//! use jobrag::rag::RagQuery;
//! use jobrag::rag::RagService;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let service = RagService::open(&config)?;
//!
//!     let response = service.query(RagQuery::new("remote rust jobs")).await?;
//!     println!("Answer: {}", response.answer);
//!     println!("Sources: {} jobs", response.jobs.len());
//!
//!     Ok(())
//! }
//! ```

pub mod context;
pub mod pipeline;
pub mod prompts;
pub mod retriever;

pub use context::build_jobs_context;
pub use pipeline::RagQuery;
pub use pipeline::RagResponse;
pub use pipeline::RagService;
pub use retriever::Retriever;
use serde::Serialize;

use crate::models::JobMetadata;

/// A retrieved job with its inner-product score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredJob {
    #[serde(flatten)]
    pub job: JobMetadata,
    pub score: f32,
}

#[cfg(test)]
pub(crate) mod test_support;
