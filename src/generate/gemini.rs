use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{ArticleError, Result};

const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Reasoning effort requested for article generation
pub const THINKING_LEVEL_HIGH: &str = "HIGH";

/// Gemini client for the generateContent API
pub struct GeminiClient {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL (defaults to the public API)
    endpoint: String,
}

/// Gemini generateContent request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Conversation contents; a single user turn for this tool
    contents: Vec<Content>,

    /// System instruction guiding the model
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,

    /// Search-augmentation tools, attached only when research is enabled
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,

    /// Generation parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

/// Gemini content block
#[derive(Debug, Serialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    pub parts: Vec<Part>,
}

/// Text part of a content block
#[derive(Debug, Serialize)]
pub struct Part {
    pub text: String,
}

/// Tools the model may use to augment generation
#[derive(Debug, Serialize)]
pub enum Tool {
    #[serde(rename = "url_context")]
    UrlContext(ToolConfig),

    #[serde(rename = "google_search")]
    GoogleSearch(ToolConfig),
}

/// Tool configuration; both research tools take no parameters
#[derive(Debug, Serialize, Default)]
pub struct ToolConfig {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    thinking_config: Option<ThinkingConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_level: String,
}

/// Gemini generateContent response
#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// One generated candidate
#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

impl GenerateContentRequest {
    /// Create a request carrying a single user turn
    pub fn new(user_prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: user_prompt.into(),
                }],
            }],
            system_instruction: None,
            tools: Vec::new(),
            generation_config: None,
        }
    }

    /// Set the system instruction
    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system_instruction = Some(Content {
            role: None,
            parts: vec![Part {
                text: system.into(),
            }],
        });
        self
    }

    /// Set the thinking level
    pub fn thinking_level(mut self, level: impl Into<String>) -> Self {
        self.generation_config = Some(GenerationConfig {
            thinking_config: Some(ThinkingConfig {
                thinking_level: level.into(),
            }),
        });
        self
    }

    /// Attach the url-context and web-search tools
    pub fn with_research_tools(mut self) -> Self {
        self.tools.push(Tool::UrlContext(ToolConfig::default()));
        self.tools.push(Tool::GoogleSearch(ToolConfig::default()));
        self
    }
}

impl GeminiClient {
    /// Create a new Gemini client
    pub fn new(api_key: impl Into<String>, endpoint: Option<String>, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
        }
    }

    /// Run one generateContent request and return the generated text.
    ///
    /// API errors, auth failures, and empty responses are all fatal
    /// generation errors; there is no automatic retry.
    pub async fn generate(&self, model: &str, request: GenerateContentRequest) -> Result<String> {
        let api_url = format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            model
        );

        let response = self
            .client
            .post(&api_url)
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                ArticleError::Generation(format!("Failed to send request to Gemini API: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            tracing::error!("Gemini API error ({}): {}", status, error_text);
            return Err(ArticleError::Generation(format!(
                "Gemini API error ({status}): {error_text}"
            ))
            .into());
        }

        let body: GenerateContentResponse = response.json().await.map_err(|e| {
            ArticleError::Generation(format!("Failed to parse Gemini API response: {e}"))
        })?;

        let text = extract_text(&body);
        if text.trim().is_empty() {
            return Err(
                ArticleError::Generation("Gemini returned an empty response".to_string()).into(),
            );
        }

        Ok(text)
    }
}

/// Concatenate the text parts of the first candidate
pub fn extract_text(response: &GenerateContentResponse) -> String {
    response
        .candidates
        .first()
        .and_then(|candidate| candidate.content.as_ref())
        .map(|content| {
            content
                .parts
                .iter()
                .filter_map(|part| part.text.as_deref())
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default()
}
