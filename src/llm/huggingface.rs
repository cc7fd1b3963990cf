//! Hugging Face Inference API text-generation client

use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use super::provider_error;
use super::GenerationParams;
use crate::config::ProviderConfig;
use crate::errors::JobRagError;
use crate::errors::Result;

pub const EMPTY_RESPONSE: &str = "No response generated from Huggingface";

#[derive(Clone)]
pub struct HuggingFaceClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    params: GenerationParams,
}

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters,
}

#[derive(Serialize)]
struct InferenceParameters {
    max_new_tokens: u32,
    temperature: f32,
    do_sample: bool,
}

#[derive(Deserialize)]
struct Generation {
    #[serde(default)]
    generated_text: String,
}

impl HuggingFaceClient {
    pub fn new(client: Client, config: &ProviderConfig, params: GenerationParams) -> Self {
        Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            params,
        }
    }

    /// Prompt layout: `{system}\n\nUser: {user}\nAssistant:`
    pub fn combine_prompts(system_prompt: &str, user_prompt: &str) -> String {
        format!("{system_prompt}\n\nUser: {user_prompt}\nAssistant:")
    }

    pub async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            JobRagError::ConfigError("Huggingface api key not provided".to_string())
        })?;

        let prompt = Self::combine_prompts(system_prompt, user_prompt);
        let request = InferenceRequest {
            inputs: &prompt,
            parameters: InferenceParameters {
                max_new_tokens: self.params.max_tokens,
                temperature: self.params.temperature,
                do_sample: true,
            },
        };

        let url = format!("{}/models/{}", self.endpoint, self.model);
        debug!("Calling Huggingface API: {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| JobRagError::HttpError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(provider_error("Huggingface", response).await);
        }

        let value: serde_json::Value = response.json().await.map_err(|e| {
            JobRagError::LlmError(format!("Failed to parse Huggingface response: {e}"))
        })?;

        Ok(extract_generation(value, &prompt))
    }
}

/// Text-generation models echo the prompt; strip it from the first generation
fn extract_generation(value: serde_json::Value, prompt: &str) -> String {
    let Ok(generations) = serde_json::from_value::<Vec<Generation>>(value) else {
        return EMPTY_RESPONSE.to_string();
    };
    match generations.into_iter().next() {
        Some(generation) => generation.generated_text.replace(prompt, "").trim().to_string(),
        None => EMPTY_RESPONSE.to_string(),
    }
}
