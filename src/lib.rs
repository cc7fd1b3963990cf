//! Job posting search with retrieval-augmented answers
//!
//! Pipeline: database export -> embeddings + flat vector index -> HTTP search API.

pub mod api;
pub mod cli;
pub mod config;
pub mod database;
pub mod embeddings;
pub mod errors;
pub mod export;
pub mod index;
pub mod llm;
pub mod logging;
pub mod models;
pub mod rag;


pub use config::AppConfig;
pub use errors::*;
