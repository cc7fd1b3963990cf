//! Database initialization handler

use crate::cli::output::print_info;
use crate::cli::output::print_success;
use crate::cli::output::print_warning;
use crate::database::Database;
use crate::AppConfig;
use crate::Result;

/// Handle database initialization command
pub async fn handle_init_command(config: &AppConfig, force: bool) -> Result<()> {
    if !force {
        print_warning("This will create the jobs table and its indexes.");
        print_warning("This operation is safe - it uses CREATE IF NOT EXISTS.");
        println!("\nUse --force to proceed.");
        return Ok(());
    }

    let db = Database::from_config(config).await?;
    if db.is_schema_initialized().await? {
        print_info("Jobs table already exists, ensuring indexes");
    }

    db.init_schema().await?;
    print_success("Schema initialized");

    let (total, active) = db.count_jobs().await?;
    print_info(&format!("{total} jobs in store ({active} active)"));
    Ok(())
}
