//! LLM providers used to phrase the final answer
//!
//! Two remote providers are supported and picked per request by name:
//! - `gemini`: Google Generative Language `generateContent`
//! - `huggingface`: Hugging Face Inference API text generation

pub mod gemini;
pub mod huggingface;
pub mod prompts;

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

pub use gemini::GeminiClient;
pub use huggingface::HuggingFaceClient;
pub use prompts::PromptTemplate;
use reqwest::Client;
use tracing::debug;

use crate::config::AppConfig;
use crate::errors::JobRagError;
use crate::errors::Result;

/// Sampling parameters shared by every provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: crate::config::default_temperature(),
            max_tokens: crate::config::default_max_tokens(),
        }
    }
}

/// Known provider names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Gemini,
    HuggingFace,
}

impl ProviderKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::HuggingFace => "huggingface",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = JobRagError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            "huggingface" => Ok(Self::HuggingFace),
            _ => Err(JobRagError::UnsupportedProvider(s.to_string())),
        }
    }
}

/// Dispatches generation requests to the provider named by the caller
#[derive(Clone)]
pub struct LlmService {
    gemini: GeminiClient,
    huggingface: HuggingFaceClient,
    default_provider: String,
}

impl LlmService {
    /// Create a new LLM service from configuration
    ///
    /// # Errors
    /// - HTTP client build errors
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.llm.timeout_secs))
            .build()
            .map_err(|e| JobRagError::HttpError(e.to_string()))?;

        let params = GenerationParams {
            temperature: config.llm.temperature,
            max_tokens: config.llm.max_tokens,
        };

        Ok(Self {
            gemini: GeminiClient::new(client.clone(), &config.llm.gemini, params),
            huggingface: HuggingFaceClient::new(client, &config.llm.huggingface, params),
            default_provider: config.llm.default_provider.clone(),
        })
    }

    pub fn default_provider(&self) -> &str {
        &self.default_provider
    }

    /// The provider name a request will use: its override, else the configured default
    pub fn provider_name(&self, requested: Option<&str>) -> String {
        requested
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.default_provider)
            .to_string()
    }

    /// Generate a completion with the named provider
    ///
    /// # Errors
    /// - Unsupported provider name
    /// - Missing API key for the provider
    /// - HTTP or provider errors
    pub async fn generate(&self, provider: &str, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let kind = ProviderKind::from_str(provider)?;
        debug!("Generating with {}", kind);
        match kind {
            ProviderKind::Gemini => self.gemini.generate(system_prompt, user_prompt).await,
            ProviderKind::HuggingFace => self.huggingface.generate(system_prompt, user_prompt).await,
        }
    }
}

/// Read a non-2xx provider response into an error
pub(crate) async fn provider_error(provider: &str, response: reqwest::Response) -> JobRagError {
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    JobRagError::LlmError(format!("{provider} API error ({status}): {body}"))
}
