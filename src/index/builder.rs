//! Offline index build: jobs export -> embeddings -> index file + metadata sidecar

use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;
use std::time::Instant;

use serde::Serialize;
use tracing::info;
use tracing::warn;

use super::flat::FlatIndex;
use super::store::IndexBundle;
use crate::embeddings::preprocess_text_for_embedding;
use crate::embeddings::EmbeddingService;
use crate::errors::JobRagError;
use crate::errors::Result;
use crate::export::load_jobs;
use crate::models::JobMetadata;

const PROGRESS_EVERY: usize = 50;

/// Summary of an index build
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    pub jobs_loaded: usize,
    pub jobs_indexed: usize,
    pub jobs_skipped: usize,
    pub dimension: usize,
    pub model: String,
    pub index_path: PathBuf,
    pub metadata_path: PathBuf,
    pub elapsed: Duration,
}

/// Build the vector index and its sidecar from an export file
///
/// # Errors
/// - Missing or unparseable jobs file
/// - No indexable jobs
/// - Embedding provider failures
/// - File write errors
pub async fn build_index(
    service: &EmbeddingService,
    jobs_path: &Path,
    index_path: &Path,
    metadata_path: &Path,
) -> Result<BuildReport> {
    let started = Instant::now();
    info!("Starting embedding generation...");

    let jobs = load_jobs(jobs_path)?;
    if jobs.is_empty() {
        return Err(JobRagError::NoJobs(jobs_path.display().to_string()));
    }
    info!("Loaded {} jobs", jobs.len());

    let mut texts = Vec::with_capacity(jobs.len());
    let mut metadata: Vec<JobMetadata> = Vec::with_capacity(jobs.len());
    let mut skipped = 0;

    for (i, job) in jobs.iter().enumerate() {
        let text = job.to_embedding_text();
        // A posting with nothing to embed would fail the whole batch later
        if let Err(e) = preprocess_text_for_embedding(&text) {
            warn!("Error processing job {} ({}): {}", i, job.id, e);
            skipped += 1;
            continue;
        }
        texts.push(text);
        metadata.push(job.to_metadata());

        if (i + 1) % PROGRESS_EVERY == 0 {
            info!("Processed {}/{} jobs...", i + 1, jobs.len());
        }
    }

    if texts.is_empty() {
        return Err(JobRagError::NoJobs(jobs_path.display().to_string()));
    }

    info!(
        "Generating embeddings for {} jobs with model {}...",
        texts.len(),
        service.model()
    );
    let embeddings = service.generate_batch(&texts).await?;

    let mut index = FlatIndex::new(service.dimension());
    index.add_batch(&embeddings)?;
    info!("Created index with {} vectors of dimension {}", index.len(), index.dimension());

    IndexBundle::write(&index, &metadata, service.model(), index_path, metadata_path)?;

    let report = BuildReport {
        jobs_loaded: jobs.len(),
        jobs_indexed: index.len(),
        jobs_skipped: skipped,
        dimension: index.dimension(),
        model: service.model().to_string(),
        index_path: index_path.to_path_buf(),
        metadata_path: metadata_path.to_path_buf(),
        elapsed: started.elapsed(),
    };

    info!("Embedding generation completed in {:?}", report.elapsed);
    Ok(report)
}
