//! Semantic retrieval against the loaded index bundle

use std::sync::Arc;

use tracing::debug;
use tracing::warn;

use crate::embeddings::EmbeddingService;
use crate::errors::Result;
use crate::index::IndexBundle;
use crate::rag::ScoredJob;

/// Retriever joining index hits to their metadata records
#[derive(Clone)]
pub struct Retriever {
    bundle: Arc<IndexBundle>,
    embedding_service: Arc<EmbeddingService>,
}

impl Retriever {
    /// Create a new retriever
    pub fn new(bundle: Arc<IndexBundle>, embedding_service: Arc<EmbeddingService>) -> Self {
        Self {
            bundle,
            embedding_service,
        }
    }

    pub fn bundle(&self) -> &IndexBundle {
        &self.bundle
    }

    /// Embed the query and return the top `k` jobs, best first
    ///
    /// # Errors
    /// - Query embedding errors
    /// - Query dimension differs from the index
    pub async fn search(&self, query: &str, k: usize) -> Result<Vec<ScoredJob>> {
        debug!("Performing semantic search (k={}): {}", k, query);

        let query_embedding = self.embedding_service.generate(query).await?;
        let hits = self.bundle.index.search(&query_embedding, k)?;

        let mut results = Vec::with_capacity(hits.len());
        for hit in hits {
            match self.bundle.metadata.get(hit.row) {
                Some(job) => results.push(ScoredJob {
                    job: job.clone(),
                    score: hit.score,
                }),
                None => warn!("Index row {} has no metadata record, skipping", hit.row),
            }
        }

        debug!("Retrieved {} jobs", results.len());
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rag::test_support;

    #[tokio::test]
    async fn test_search_drops_rows_past_the_sidecar() {
        let server = test_support::mock_server().await;
        let mut bundle = test_support::bundle();
        bundle.metadata.truncate(2);
        assert_eq!(bundle.index.len(), 3);

        let retriever = Retriever::new(
            Arc::new(bundle),
            Arc::new(test_support::embedding_service(&server.uri())),
        );
        let jobs = retriever.search("nurse", 3).await.unwrap();

        // Row 2 scores second best but has no metadata record
        let ids: Vec<&str> = jobs.iter().map(|j| j.job.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
        assert!(jobs[0].score > jobs[1].score);
    }

    #[tokio::test]
    async fn test_search_ranks_full_bundle() {
        let server = test_support::mock_server().await;
        let retriever = Retriever::new(
            Arc::new(test_support::bundle()),
            Arc::new(test_support::embedding_service(&server.uri())),
        );

        let jobs = retriever.search("backend services", 2).await.unwrap();
        let ids: Vec<&str> = jobs.iter().map(|j| j.job.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }
}
