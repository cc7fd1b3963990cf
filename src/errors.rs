use thiserror::Error;

#[derive(Error, Debug)]
pub enum JobRagError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Index encoding error: {0}")]
    IndexEncoding(#[from] bincode::Error),

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("Embedding error: {0}")]
    EmbeddingError(String),

    #[error("LLM error: {0}")]
    LlmError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Unsupported LLM provider: {0}")]
    UnsupportedProvider(String),

    #[error("Vector index or job metadata not loaded")]
    IndexNotLoaded,

    #[error("Vector dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("No jobs found in {0}")]
    NoJobs(String),
}

pub type Result<T> = std::result::Result<T, JobRagError>;
