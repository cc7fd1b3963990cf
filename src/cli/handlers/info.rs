//! Statistics and configuration handlers

use tracing::warn;

use crate::cli::output::print_config;
use crate::cli::output::print_index_header;
use crate::cli::output::print_info;
use crate::cli::output::print_warning;
use crate::database::Database;
use crate::index::store::read_index;
use crate::AppConfig;
use crate::Result;

/// Show job counts and the on-disk index header
pub async fn handle_stats_command(config: &AppConfig) -> Result<()> {
    println!("jobrag statistics");
    println!("=================\n");

    match Database::from_config(config).await {
        Ok(db) => {
            let (total, active) = db.count_jobs().await?;
            println!("Jobs in store:   {total}");
            println!("Active jobs:     {active}");
        }
        Err(e) => {
            warn!("Database unavailable: {}", e);
            print_warning("Database unavailable, skipping job counts");
        }
    }
    println!();

    let index_path = config.index_file();
    if index_path.exists() {
        let (header, _) = read_index(index_path)?;
        print_index_header(index_path, &header);
    } else {
        print_info(&format!("No index at {}", index_path.display()));
    }

    Ok(())
}

/// Show the effective configuration with secrets masked
pub async fn handle_config_command(config: &AppConfig) -> Result<()> {
    print_config(config)
}
