//! One-shot search handler

use crate::cli::output::print_rag_response;
use crate::rag::RagQuery;
use crate::rag::RagService;
use crate::AppConfig;
use crate::Result;

/// Run a single RAG query against the on-disk index
pub async fn handle_search_command(
    config: &AppConfig,
    query: String,
    k: Option<usize>,
    provider: Option<String>,
) -> Result<()> {
    let k = k.unwrap_or(config.server.default_top_k);
    if k == 0 || query.trim().is_empty() {
        return Err(crate::JobRagError::InvalidRequest(
            "query must not be empty and k must be at least 1".to_string(),
        ));
    }

    let service = RagService::open(config)?;
    let response = service
        .query(RagQuery::new(query.trim()).with_k(k).with_provider(provider))
        .await?;

    print_rag_response(&response);
    Ok(())
}
