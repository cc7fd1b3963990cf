//! Index build handler

use std::path::PathBuf;

use crate::cli::output::print_build_report;
use crate::cli::output::print_info;
use crate::embeddings::EmbeddingService;
use crate::index::build_index;
use crate::AppConfig;
use crate::Result;

/// Embed the export file and write index plus sidecar
pub async fn handle_embed_command(
    config: &AppConfig,
    jobs: Option<PathBuf>,
    index: Option<PathBuf>,
    metadata: Option<PathBuf>,
) -> Result<()> {
    let jobs = jobs.unwrap_or_else(|| config.jobs_file().to_path_buf());
    let index = index.unwrap_or_else(|| config.index_file().to_path_buf());
    let metadata = metadata.unwrap_or_else(|| config.metadata_file().to_path_buf());

    let service = EmbeddingService::new(config)?;
    print_info(&format!(
        "Embedding {} with {} ({} dims)",
        jobs.display(),
        service.model(),
        service.dimension()
    ));

    let report = build_index(&service, &jobs, &index, &metadata).await?;
    print_build_report(&report);
    Ok(())
}
