//! CLI command handlers module
//!
//! Organized by pipeline stage:
//! - init: Database schema
//! - data: Seeding and export
//! - embeddings: Index build
//! - rag: One-shot search
//! - serve: API server
//! - info: Statistics and configuration

pub mod data;
pub mod embeddings;
pub mod info;
pub mod init;
pub mod rag;
pub mod serve;

pub use data::*;
pub use embeddings::*;
pub use info::*;
pub use init::*;
pub use rag::*;
pub use serve::*;
