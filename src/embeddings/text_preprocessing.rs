//! Text preprocessing utilities for embedding generation
//!
//! Cleans and bounds text before it is sent to the embedding provider.

use tracing::debug;
use tracing::warn;

use crate::errors::JobRagError;

/// Character budget per text; all-MiniLM-L6-v2 truncates at 256 word pieces anyway
pub const MAX_EMBEDDING_CHARS: usize = 2000;

/// Preprocess text for embedding generation
///
/// - Normalizes whitespace and newlines
/// - Replaces control characters
/// - Truncates long text at a word boundary
pub fn preprocess_text_for_embedding(text: &str) -> Result<String, JobRagError> {
    if text.is_empty() {
        return Err(JobRagError::EmbeddingError(
            "Empty text provided".to_string(),
        ));
    }

    let sanitized = sanitize_text(text);

    if sanitized.is_empty() {
        return Err(JobRagError::EmbeddingError(
            "Text contains only whitespace after preprocessing".to_string(),
        ));
    }

    let char_count = sanitized.chars().count();
    if char_count > MAX_EMBEDDING_CHARS {
        warn!(
            "Text too long ({} chars), truncating to {}",
            char_count, MAX_EMBEDDING_CHARS
        );
        return Ok(smart_truncate_text(&sanitized, MAX_EMBEDDING_CHARS));
    }

    debug!("Preprocessed text: {} -> {} chars", text.len(), sanitized.len());
    Ok(sanitized)
}

/// Replace control characters and collapse runs of whitespace into single spaces
fn sanitize_text(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
}

/// Truncate to `max_chars` characters, backing off to the last space when it's close
fn smart_truncate_text(text: &str, max_chars: usize) -> String {
    let truncated: String = text.chars().take(max_chars).collect();
    if let Some(last_space) = truncated.rfind(' ') {
        // Only use word boundary if it's not too far back
        if truncated[..last_space].chars().count() > max_chars * 3 / 4 {
            return truncated[..last_space].to_string();
        }
    }
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_collapses_newlines() {
        assert_eq!(
            sanitize_text("Job Title: Chef\nCompany:\t Bistro\r\n"),
            "Job Title: Chef Company: Bistro"
        );
    }

    #[test]
    fn test_preprocess_rejects_blank() {
        assert!(preprocess_text_for_embedding("").is_err());
        assert!(preprocess_text_for_embedding(" \n\t ").is_err());
    }

    #[test]
    fn test_preprocess_truncates_on_char_boundary() {
        let long = "données ".repeat(400);
        let out = preprocess_text_for_embedding(&long).unwrap();
        assert!(out.chars().count() <= MAX_EMBEDDING_CHARS);
        assert!(out.ends_with("données"));
    }
}
