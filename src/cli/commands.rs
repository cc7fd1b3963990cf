//! CLI command definitions and argument parsing

use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

#[derive(Parser)]
#[command(name = "jobrag")]
#[command(about = "Job posting search with retrieval-augmented answers")]
#[command(version)]
pub struct Cli {
    /// Enable verbose debug logging (default: info level)
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the jobs table and its indexes
    Init {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Insert postings from a JSON file into the database
    Seed {
        /// JSON array of job postings
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Export active postings to the JSON hand-off file
    Export {
        /// Output path (default: files.jobs_file)
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Maximum number of postings (default: export.limit)
        #[arg(short, long)]
        limit: Option<i64>,
    },
    /// Embed exported postings and write the vector index and metadata
    Embed {
        /// Export file to read (default: files.jobs_file)
        #[arg(long)]
        jobs: Option<PathBuf>,
        /// Index file to write (default: files.index_file)
        #[arg(long)]
        index: Option<PathBuf>,
        /// Metadata sidecar to write (default: files.metadata_file)
        #[arg(long)]
        metadata: Option<PathBuf>,
    },
    /// Start the HTTP API server
    Serve {
        /// Host to bind (default: server.host)
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on (default: server.port)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Run one search and print the answer and ranked jobs
    Search {
        /// Natural-language query
        query: String,
        /// Number of jobs to retrieve (default: server.default_top_k)
        #[arg(short, long)]
        k: Option<usize>,
        /// LLM provider override (gemini, huggingface)
        #[arg(long)]
        provider: Option<String>,
    },
    /// Show job counts and the on-disk index header
    Stats,
    /// Show current configuration
    Config,
}
