//! Gemini `generateContent` client.
//!
//! Blocking reqwest client; the worker thread owns the wait.

use super::{ExplainError, ExplanationService};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Default API base, without the model segment.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Default model name.
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Environment variable consulted for the API key by default.
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Consulted when the configured variable is unset.
pub const FALLBACK_API_KEY_ENV: &str = "API_KEY";

/// Sampling temperature sent with every request.
pub const TEMPERATURE: f32 = 0.7;

/// Where and how to reach the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplanationSettings {
    /// API base URL; the model and method are appended.
    pub endpoint: String,
    /// Model name, e.g. `gemini-3-flash-preview`.
    pub model: String,
    /// Language the tutor answers in.
    pub language: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
}

impl Default for ExplanationSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            language: "English".to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize, Default)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize, Default)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

/// Gemini API client.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::blocking::Client,
    settings: ExplanationSettings,
    api_key: Option<String>,
}

impl GeminiClient {
    /// Create a client, reading the API key from the environment.
    ///
    /// A missing key is not an error here; each call reports it instead.
    pub fn from_env(settings: ExplanationSettings) -> Result<Self, ExplainError> {
        let api_key = std::env::var(&settings.api_key_env)
            .or_else(|_| std::env::var(FALLBACK_API_KEY_ENV))
            .ok()
            .filter(|key| !key.trim().is_empty());
        Self::with_api_key(settings, api_key)
    }

    /// Create a client with an explicit key.
    pub fn with_api_key(
        settings: ExplanationSettings,
        api_key: Option<String>,
    ) -> Result<Self, ExplainError> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(format!("smartcalc/{}", env!("CARGO_PKG_VERSION")))
            // Requests never time out.
            .timeout(None::<Duration>)
            .build()?;

        if api_key.is_none() {
            info!(variable = %settings.api_key_env, "No explanation API key configured");
        }

        Ok(Self {
            http,
            settings,
            api_key,
        })
    }

    /// Settings this client was built with.
    pub fn settings(&self) -> &ExplanationSettings {
        &self.settings
    }

    fn url(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.settings.endpoint.trim_end_matches('/'),
            self.settings.model
        )
    }

    fn request_body(&self, problem: &str) -> GenerateContentRequest {
        let language = &self.settings.language;
        GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: format!(
                        "You are an expert mathematics tutor. Solve the problem and explain \
                         each step clearly in {language}."
                    ),
                }],
            },
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: format!(
                        "Explain this math problem step by step in {language}: {problem}"
                    ),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
            },
        }
    }
}

/// Concatenate the text parts of the first candidate.
fn extract_text(response: GenerateContentResponse) -> String {
    response
        .candidates
        .into_iter()
        .next()
        .map(|candidate| {
            candidate
                .content
                .parts
                .into_iter()
                .map(|part| part.text)
                .collect::<String>()
        })
        .unwrap_or_default()
}

impl ExplanationService for GeminiClient {
    fn explain(&self, problem: &str) -> Result<String, ExplainError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ExplainError::MissingCredential(self.settings.api_key_env.clone()))?;

        let url = self.url();
        debug!(%url, model = %self.settings.model, "Sending explanation request");

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&self.request_body(problem))
            .send()?;

        let status = response.status();
        let body = response.text()?;
        debug!(%status, bytes = body.len(), "Explanation response received");

        if !status.is_success() {
            return Err(ExplainError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| ExplainError::InvalidResponse(e.to_string()))?;

        Ok(extract_text(parsed))
    }
}
