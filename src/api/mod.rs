//! HTTP API serving job search with generated answers

pub mod handlers;
pub mod routes;
pub mod server;
pub mod types;

pub use server::serve_api;
