//! Embedding generation service with preprocessing, normalization and batching

use std::sync::Arc;

use tracing::debug;
use tracing::info;

use super::client::EmbeddingClient;
use super::l2_normalize;
use super::preprocess_text_for_embedding;
use super::EmbeddingConfig;
use crate::errors::JobRagError;
use crate::errors::Result;

/// Service for generating unit-length embeddings of a fixed dimension
pub struct EmbeddingService {
    client: Arc<EmbeddingClient>,
    config: EmbeddingConfig,
}

impl EmbeddingService {
    /// Create a new embedding service
    pub fn new(config: &crate::config::AppConfig) -> Result<Self> {
        Self::from_config(EmbeddingConfig::from_app_config(config)?)
    }

    /// Create from custom config
    pub fn from_config(config: EmbeddingConfig) -> Result<Self> {
        let client = EmbeddingClient::new(
            config.provider,
            config.model.clone(),
            config.endpoint.clone(),
            config.api_key.clone(),
        )?;

        info!(
            "Embedding service ready: provider={:?}, model={}, dimension={}",
            config.provider, config.model, config.dimension
        );

        Ok(Self {
            client: Arc::new(client),
            config,
        })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    pub const fn dimension(&self) -> usize {
        self.config.dimension
    }

    /// Generate embedding for a single text
    pub async fn generate(&self, text: &str) -> Result<Vec<f32>> {
        let processed_text = preprocess_text_for_embedding(text)?;
        let embedding = self.client.generate(&processed_text).await?;
        self.finish(embedding)
    }

    /// Generate embeddings for multiple texts, one output per input in the same order.
    ///
    /// Texts are sent in chunks of the configured batch size. A text that is empty after
    /// preprocessing fails the whole call: a silently zeroed row would still be searchable.
    pub async fn generate_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let processed_texts = texts
            .iter()
            .enumerate()
            .map(|(i, text)| {
                preprocess_text_for_embedding(text)
                    .map_err(|e| JobRagError::EmbeddingError(format!("Text {i}: {e}")))
            })
            .collect::<Result<Vec<String>>>()?;

        let mut embeddings = Vec::with_capacity(processed_texts.len());
        for (chunk_no, chunk) in processed_texts.chunks(self.config.batch_size).enumerate() {
            debug!("Embedding chunk {} ({} texts)", chunk_no + 1, chunk.len());
            let chunk_embeddings = self
                .client
                .generate_batch(chunk.iter().map(String::as_str).collect())
                .await?;

            if chunk_embeddings.len() != chunk.len() {
                return Err(JobRagError::EmbeddingError(format!(
                    "Provider returned {} embeddings for {} texts",
                    chunk_embeddings.len(),
                    chunk.len()
                )));
            }

            for embedding in chunk_embeddings {
                embeddings.push(self.finish(embedding)?);
            }
        }

        Ok(embeddings)
    }

    /// Check dimension and scale to unit length
    fn finish(&self, mut embedding: Vec<f32>) -> Result<Vec<f32>> {
        if embedding.len() != self.config.dimension {
            return Err(JobRagError::DimensionMismatch {
                expected: self.config.dimension,
                actual: embedding.len(),
            });
        }
        l2_normalize(&mut embedding);
        Ok(embedding)
    }
}
