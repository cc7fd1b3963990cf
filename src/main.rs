use clap::Parser;
use jobrag::cli::*;
use jobrag::config::AppConfig;
use jobrag::Result;
use tracing::error;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Configuration first: it carries the log level
    let config = AppConfig::load()?;

    if cli.verbose {
        jobrag::logging::init_logging_with_level("debug")?;
    } else {
        jobrag::logging::init_logging_with_config(Some(&config))?;
    }
    info!("Configuration loaded successfully");

    let result = match cli.command {
        Commands::Init { force } => handle_init_command(&config, force).await,
        Commands::Seed { file } => handle_seed_command(&config, file).await,
        Commands::Export { out, limit } => handle_export_command(&config, out, limit).await,
        Commands::Embed {
            jobs,
            index,
            metadata,
        } => handle_embed_command(&config, jobs, index, metadata).await,
        Commands::Serve { host, port } => handle_serve_command(&config, host, port).await,
        Commands::Search { query, k, provider } => {
            handle_search_command(&config, query, k, provider).await
        }
        Commands::Stats => handle_stats_command(&config).await,
        Commands::Config => handle_config_command(&config).await,
    };

    if let Err(e) = &result {
        error!("Command failed: {}", e);
        print_error(&e.to_string());
    }
    result
}
