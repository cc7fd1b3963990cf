//! Embeddings generation module
//!
//! This module turns job text into dense vectors using an HTTP embedding provider:
//! - Ollama (local models, default `all-minilm` = all-MiniLM-L6-v2)
//! - OpenAI-compatible `/embeddings` endpoints
//!
//! Every vector leaving [`EmbeddingService`] is L2-normalized, so an inner product
//! between two of them is their cosine similarity.
//!
//! # Examples
//!
//! ```rust,no_run
//! use jobrag::embeddings::EmbeddingService;
//! use jobrag::config::AppConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let service = EmbeddingService::new(&config)?;
//!
//!     let embedding = service.generate("Remote Rust backend role").await?;
//!     println!("Generated embedding with {} dimensions", embedding.len());
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod generator;
pub mod text_preprocessing;

use std::str::FromStr;

pub use client::EmbeddingClient;
pub use client::EmbeddingProvider;
pub use generator::EmbeddingService;
pub use text_preprocessing::preprocess_text_for_embedding;

use crate::errors::JobRagError;
use crate::errors::Result;

/// Default embedding dimension for all-MiniLM-L6-v2
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// Configuration for embedding generation
#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
    pub provider: EmbeddingProvider,
    pub model: String,
    pub dimension: usize,
    pub endpoint: String,
    pub api_key: Option<String>,
    pub batch_size: usize,
}

impl EmbeddingConfig {
    pub fn from_app_config(config: &crate::config::AppConfig) -> Result<Self> {
        let embeddings = &config.embeddings;
        let provider = EmbeddingProvider::from_str(&embeddings.provider)?;

        if provider == EmbeddingProvider::OpenAI && embeddings.api_key.is_none() {
            tracing::warn!("OpenAI embedding provider configured without an API key");
        }

        Ok(Self {
            provider,
            model: embeddings.model.clone(),
            dimension: embeddings.dimension,
            endpoint: embeddings.endpoint.trim_end_matches('/').to_string(),
            api_key: embeddings.api_key.clone(),
            batch_size: embeddings.batch_size.max(1),
        })
    }
}

impl FromStr for EmbeddingProvider {
    type Err = JobRagError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ollama" => Ok(Self::Ollama),
            "openai" => Ok(Self::OpenAI),
            other => Err(JobRagError::ConfigError(format!(
                "Unknown embedding provider '{other}' (expected 'ollama' or 'openai')"
            ))),
        }
    }
}

/// Scale a vector to unit length in place. Zero vectors are left untouched.
pub fn l2_normalize(vector: &mut [f32]) {
    let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > f32::EPSILON {
        for x in vector.iter_mut() {
            *x /= norm;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_from_str() {
        assert_eq!(
            EmbeddingProvider::from_str("Ollama").unwrap(),
            EmbeddingProvider::Ollama
        );
        assert_eq!(
            EmbeddingProvider::from_str(" openai ").unwrap(),
            EmbeddingProvider::OpenAI
        );
        assert!(EmbeddingProvider::from_str("sentence-transformers").is_err());
    }

    #[test]
    fn test_l2_normalize() {
        let mut v = vec![3.0, 4.0];
        l2_normalize(&mut v);
        assert!((v[0] - 0.6).abs() < 1e-6);
        assert!((v[1] - 0.8).abs() < 1e-6);

        let mut zero = vec![0.0, 0.0, 0.0];
        l2_normalize(&mut zero);
        assert_eq!(zero, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_config_from_app_config() {
        let mut app = crate::config::AppConfig::default();
        app.embeddings.endpoint = "http://localhost:11434/".to_string();
        app.embeddings.batch_size = 0;

        let config = EmbeddingConfig::from_app_config(&app).unwrap();
        assert_eq!(config.provider, EmbeddingProvider::Ollama);
        assert_eq!(config.endpoint, "http://localhost:11434");
        assert_eq!(config.batch_size, 1);
        assert_eq!(config.dimension, DEFAULT_EMBEDDING_DIM);
    }
}
