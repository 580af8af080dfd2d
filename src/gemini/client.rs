//! Gemini REST API Client
//!
//! HTTP client for the `generateContent` endpoint with search grounding.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Capability the verification client depends on: free-text generation
/// conditioned on a system instruction, optionally grounded in live search.
#[async_trait]
pub trait GroundedModel: Send + Sync {
    /// Run one generation request
    async fn generate(&self, prompt: &GroundedPrompt) -> Result<GroundedReply, GeminiError>;
}

/// One generation request
#[derive(Debug, Clone, PartialEq)]
pub struct GroundedPrompt {
    /// System instruction, if any
    pub system_instruction: Option<String>,
    /// The user message
    pub contents: String,
    /// Sampling temperature (service default when `None`)
    pub temperature: Option<f64>,
    /// Enable the live web search tool
    pub search_grounding: bool,
}

impl GroundedPrompt {
    /// Create a grounded prompt with no system instruction
    pub fn new(contents: impl Into<String>) -> Self {
        Self {
            system_instruction: None,
            contents: contents.into(),
            temperature: None,
            search_grounding: true,
        }
    }

    /// Builder method: set the system instruction
    pub fn system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    /// Builder method: set the temperature
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Text and citation metadata of the first candidate
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroundedReply {
    /// Concatenated text parts, `None` when they are absent or empty
    pub text: Option<String>,
    /// Grounding chunks in the order the service returned them
    pub citations: Vec<Citation>,
}

/// A raw grounding chunk; either field may be missing upstream
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Citation {
    pub uri: Option<String>,
    pub title: Option<String>,
}

impl Citation {
    /// Create a citation with both fields present
    pub fn web(uri: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            uri: Some(uri.into()),
            title: Some(title.into()),
        }
    }
}

/// Configuration for the Gemini client
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Base URL (e.g., "https://generativelanguage.googleapis.com")
    pub base_url: String,
    /// Model name used for every request
    pub model: String,
    /// API key sent as `x-goog-api-key`
    pub api_key: Option<String>,
    /// Request timeout in seconds; `None` keeps the transport default
    pub request_timeout_secs: Option<u64>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-3-flash-preview".to_string(),
            api_key: None,
            request_timeout_secs: None,
        }
    }
}

/// Gemini REST API client
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Create a new Gemini client with the given configuration
    pub fn new(config: GeminiConfig) -> Result<Self, GeminiError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn api_key(&self) -> Result<&str, GeminiError> {
        self.config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(GeminiError::MissingApiKey)
    }

    fn model_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Check that the configured model is reachable with the configured key
    pub async fn check_model(&self) -> Result<(), GeminiError> {
        let api_key = self.api_key()?;

        let response = self
            .client
            .get(self.model_url())
            .header("x-goog-api-key", api_key)
            .send()
            .await
            .map_err(map_transport)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(api_error(response).await)
        }
    }

    /// Send one `generateContent` request
    pub async fn generate_content(
        &self,
        prompt: &GroundedPrompt,
    ) -> Result<GroundedReply, GeminiError> {
        let api_key = self.api_key()?;
        let url = format!("{}:generateContent", self.model_url());
        let body = GenerateContentRequest::from(prompt);

        tracing::debug!(
            model = %self.config.model,
            grounded = prompt.search_grounding,
            "Sending generateContent request"
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(map_transport)?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let raw = response.text().await.map_err(map_transport)?;
        let payload: GenerateContentResponse = serde_json::from_str(&raw)
            .map_err(|e| GeminiError::InvalidResponse(e.to_string()))?;

        Ok(payload.into_reply())
    }
}

#[async_trait]
impl GroundedModel for GeminiClient {
    async fn generate(&self, prompt: &GroundedPrompt) -> Result<GroundedReply, GeminiError> {
        self.generate_content(prompt).await
    }
}

fn map_transport(e: reqwest::Error) -> GeminiError {
    if e.is_timeout() {
        GeminiError::Timeout
    } else if e.is_connect() {
        GeminiError::Unavailable
    } else {
        GeminiError::Request(e)
    }
}

async fn api_error(response: reqwest::Response) -> GeminiError {
    let status = response.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        return GeminiError::RateLimited;
    }
    let message = response.text().await.unwrap_or_default();
    GeminiError::ApiError {
        status: status.as_u16(),
        message,
    }
}

// ============================================
// Request/Response DTOs
// ============================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

impl From<&GroundedPrompt> for GenerateContentRequest {
    fn from(prompt: &GroundedPrompt) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part::text(&prompt.contents)],
            }],
            system_instruction: prompt.system_instruction.as_ref().map(|text| Content {
                role: None,
                parts: vec![Part::text(text)],
            }),
            tools: if prompt.search_grounding {
                vec![Tool {
                    google_search: GoogleSearch {},
                }]
            } else {
                Vec::new()
            },
            generation_config: prompt
                .temperature
                .map(|temperature| GenerationConfig { temperature }),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing)]
    thought: Option<bool>,
}

impl Part {
    fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            thought: None,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
struct GoogleSearch {}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    #[serde(default)]
    web: Option<WebChunk>,
}

#[derive(Debug, Deserialize)]
struct WebChunk {
    #[serde(default)]
    uri: Option<String>,
    #[serde(default)]
    title: Option<String>,
}

impl GenerateContentResponse {
    fn into_reply(self) -> GroundedReply {
        let Some(candidate) = self.candidates.into_iter().next() else {
            return GroundedReply::default();
        };

        let text: String = candidate
            .content
            .map(|c| c.parts)
            .unwrap_or_default()
            .into_iter()
            .filter(|p| !p.thought.unwrap_or(false))
            .filter_map(|p| p.text)
            .collect();

        let citations = candidate
            .grounding_metadata
            .map(|m| m.grounding_chunks)
            .unwrap_or_default()
            .into_iter()
            .map(|chunk| match chunk.web {
                Some(web) => Citation {
                    uri: web.uri,
                    title: web.title,
                },
                None => Citation::default(),
            })
            .collect();

        GroundedReply {
            text: Some(text).filter(|t| !t.is_empty()),
            citations,
        }
    }
}

// ============================================
// Errors
// ============================================

/// Errors that can occur when communicating with Gemini
#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("Gemini API key is not configured")]
    MissingApiKey,

    #[error("Gemini unavailable")]
    Unavailable,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Request timeout")]
    Timeout,

    #[error("Rate limited")]
    RateLimited,

    #[error("Invalid response payload: {0}")]
    InvalidResponse(String),
}
