//! API server handler

use crate::api::serve_api;
use crate::AppConfig;
use crate::Result;

pub async fn handle_serve_command(
    config: &AppConfig,
    host: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    println!("Starting jobrag API server");
    println!("==========================\n");
    println!("Host: {host}");
    println!("Port: {port}");
    println!("CORS origins: {}", config.server.cors_origins.join(", "));
    println!("LLM provider: {}", config.default_llm_provider());
    println!();

    serve_api(config, host, port).await
}
