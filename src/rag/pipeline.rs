//! Complete RAG pipeline: Retrieve -> Assemble -> Generate

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::config::AppConfig;
use crate::embeddings::EmbeddingService;
use crate::errors::Result;
use crate::index::IndexBundle;
use crate::llm::LlmService;
use crate::rag::build_jobs_context;
use crate::rag::prompts::build_user_prompt;
use crate::rag::prompts::SYSTEM_PROMPT;
use crate::rag::Retriever;
use crate::rag::ScoredJob;

/// A single search request
#[derive(Debug, Clone)]
pub struct RagQuery {
    pub query: String,
    pub k: usize,
    /// Provider override; the configured default when `None`
    pub provider: Option<String>,
}

impl RagQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            k: crate::config::default_top_k(),
            provider: None,
        }
    }

    #[must_use]
    pub const fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    #[must_use]
    pub fn with_provider(mut self, provider: Option<String>) -> Self {
        self.provider = provider;
        self
    }
}

/// Generated answer plus the jobs it was grounded on
#[derive(Debug, Clone, Serialize)]
pub struct RagResponse {
    pub answer: String,
    pub jobs: Vec<ScoredJob>,
    /// Provider name that was asked, even when generation fell back
    pub llm_provider: String,
}

/// Answer used when the LLM cannot produce one
pub fn fallback_answer(job_count: usize) -> String {
    format!(
        "I found {job_count} relevant jobs, but encountered an error while generating a detailed response."
    )
}

/// Complete RAG service
#[derive(Clone)]
pub struct RagService {
    retriever: Retriever,
    llm_service: Arc<LlmService>,
}

impl RagService {
    /// Create from existing services
    #[must_use]
    pub fn new(retriever: Retriever, llm_service: Arc<LlmService>) -> Self {
        Self {
            retriever,
            llm_service,
        }
    }

    /// Load the index bundle and build every service from configuration
    ///
    /// # Errors
    /// - Index or metadata file missing or unreadable
    /// - Embedding or LLM client configuration errors
    pub fn open(config: &AppConfig) -> Result<Self> {
        let embedding_service = Arc::new(EmbeddingService::new(config)?);
        Self::open_with(config, embedding_service)
    }

    /// Like [`RagService::open`], reusing an already built embedding service
    pub fn open_with(config: &AppConfig, embedding_service: Arc<EmbeddingService>) -> Result<Self> {
        let bundle = IndexBundle::open(config.index_file(), config.metadata_file())?;
        if bundle.header.model != embedding_service.model() {
            warn!(
                "Index was built with model {} but queries use {}",
                bundle.header.model,
                embedding_service.model()
            );
        }
        let retriever = Retriever::new(Arc::new(bundle), embedding_service);
        Ok(Self::new(retriever, Arc::new(LlmService::new(config)?)))
    }

    pub fn retriever(&self) -> &Retriever {
        &self.retriever
    }

    /// Perform a complete RAG query.
    ///
    /// Retrieval failures are returned; generation failures degrade to
    /// [`fallback_answer`].
    pub async fn query(&self, query: RagQuery) -> Result<RagResponse> {
        info!("Processing RAG query: {}", query.query);

        debug!("Step 1: Retrieving jobs");
        let jobs = self.retriever.search(&query.query, query.k).await?;

        debug!("Step 2: Assembling context from {} jobs", jobs.len());
        let jobs_context = build_jobs_context(&jobs);
        let user_prompt = build_user_prompt(&query.query, &jobs_context);

        debug!("Step 3: Generating answer");
        let provider = self.llm_service.provider_name(query.provider.as_deref());
        let answer = match self
            .llm_service
            .generate(&provider, SYSTEM_PROMPT, &user_prompt)
            .await
        {
            Ok(answer) => answer,
            Err(e) => {
                warn!("Answer generation with {} failed: {}", provider, e);
                fallback_answer(jobs.len())
            }
        };

        info!("RAG query completed with {} jobs", jobs.len());

        Ok(RagResponse {
            answer,
            jobs,
            llm_provider: provider,
        })
    }
}
