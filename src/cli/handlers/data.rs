//! Seed and export handlers

use std::path::PathBuf;

use crate::cli::output::print_export_summary;
use crate::cli::output::print_info;
use crate::cli::output::print_success;
use crate::database::Database;
use crate::export::export_jobs;
use crate::export::seed_jobs;
use crate::AppConfig;
use crate::Result;

/// Insert postings from a JSON file
pub async fn handle_seed_command(config: &AppConfig, file: PathBuf) -> Result<()> {
    let db = Database::from_config(config).await?;
    db.init_schema().await?;

    print_info(&format!("Seeding jobs from {}", file.display()));
    let inserted = seed_jobs(&db, &file).await?;
    print_success(&format!("Inserted {inserted} jobs"));
    Ok(())
}

/// Export active postings to JSON
pub async fn handle_export_command(
    config: &AppConfig,
    out: Option<PathBuf>,
    limit: Option<i64>,
) -> Result<()> {
    let out = out.unwrap_or_else(|| config.jobs_file().to_path_buf());
    let limit = limit.unwrap_or(config.export.limit);

    let db = Database::from_config(config).await?;
    let summary = export_jobs(&db, &out, limit).await?;
    print_export_summary(&summary);
    Ok(())
}
