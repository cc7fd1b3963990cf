//! Google Gemini `generateContent` client

use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use super::provider_error;
use super::GenerationParams;
use crate::config::ProviderConfig;
use crate::errors::JobRagError;
use crate::errors::Result;

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    params: GenerationParams,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GeminiClient {
    pub fn new(client: Client, config: &ProviderConfig, params: GenerationParams) -> Self {
        Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            params,
        }
    }

    /// Prompt layout: `{system}\n\nUser Query: {user}\n\nResponse:`
    pub fn combine_prompts(system_prompt: &str, user_prompt: &str) -> String {
        format!("{system_prompt}\n\nUser Query: {user_prompt}\n\nResponse:")
    }

    pub async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| JobRagError::ConfigError("Gemini key not provided".to_string()))?;

        let prompt = Self::combine_prompts(system_prompt, user_prompt);
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: &prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.params.temperature,
                top_k: 40,
                top_p: 0.95,
                max_output_tokens: self.params.max_tokens,
            },
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint, self.model
        );
        debug!("Calling Gemini API: {}", url);

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .json(&request)
            .send()
            .await
            .map_err(|e| JobRagError::HttpError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(provider_error("Gemini", response).await);
        }

        let result: GenerateResponse = response
            .json()
            .await
            .map_err(|e| JobRagError::LlmError(format!("Failed to parse Gemini response: {e}")))?;

        result
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text.trim().to_string())
            .ok_or_else(|| JobRagError::LlmError("No response from Gemini".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::body_partial_json;
    use wiremock::matchers::method;
    use wiremock::matchers::path;
    use wiremock::matchers::query_param;
    use wiremock::Mock;
    use wiremock::MockServer;
    use wiremock::ResponseTemplate;

    use super::*;

    fn client(endpoint: String, api_key: Option<&str>) -> GeminiClient {
        GeminiClient::new(
            Client::new(),
            &ProviderConfig {
                endpoint,
                model: "gemini-pro".to_string(),
                api_key: api_key.map(str::to_string),
            },
            GenerationParams::default(),
        )
    }

    #[tokio::test]
    async fn test_generate_returns_first_candidate() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-pro:generateContent"))
            .and(query_param("key", "g-key"))
            .and(body_partial_json(serde_json::json!({
                "contents": [{"parts": [{"text": "SYS\n\nUser Query: USER\n\nResponse:"}]}],
                "generationConfig": {"topK": 40, "maxOutputTokens": 500}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [
                    {"content": {"parts": [{"text": "  Here are three roles.  "}]}},
                    {"content": {"parts": [{"text": "ignored"}]}}
                ]
            })))
            .mount(&server)
            .await;

        let answer = client(server.uri(), Some("g-key"))
            .generate("SYS", "USER")
            .await
            .unwrap();
        assert_eq!(answer, "Here are three roles.");
    }

    #[tokio::test]
    async fn test_no_candidates_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let err = client(server.uri(), Some("g-key"))
            .generate("SYS", "USER")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("No response from Gemini"));
    }

    #[tokio::test]
    async fn test_error_status_carries_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
            .mount(&server)
            .await;

        let err = client(server.uri(), Some("bad"))
            .generate("SYS", "USER")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("API key not valid"));
    }

    #[tokio::test]
    async fn test_missing_key() {
        let err = client("http://127.0.0.1:9".to_string(), None)
            .generate("SYS", "USER")
            .await
            .unwrap_err();
        assert!(matches!(err, JobRagError::ConfigError(_)));
    }
}
