//! GeminiApiAgent - Direct REST API implementation for Gemini.
//!
//! Sampling parameters and safety filters come from `GeminiSettings` and are
//! sent with every request; the agent itself adds no filtering.

use async_trait::async_trait;
use netmate_core::GenerativeBackend;
use netmate_core::config::{GeminiSecret, GeminiSettings, GenerationSettings, SafetySetting};
use netmate_core::error::{NetmateError, Result};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Backend implementation that talks to the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiApiAgent {
    client: Client,
    api_key: String,
    base_url: String,
    settings: GeminiSettings,
}

impl GeminiApiAgent {
    /// Creates a new agent with the provided API key and settings.
    pub fn new(api_key: impl Into<String>, settings: GeminiSettings) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
            settings,
        }
    }

    /// Builds the agent from loaded secrets.
    ///
    /// A `model_name` in the secret file wins over the configured model.
    pub fn from_secret(secret: Option<&GeminiSecret>, settings: GeminiSettings) -> Result<Self> {
        let secret = secret.ok_or_else(|| {
            NetmateError::config("Gemini configuration not found in secret.json")
        })?;
        let mut agent = Self::new(secret.api_key.clone(), settings);
        if let Some(model) = &secret.model_name {
            agent = agent.with_model(model.clone());
        }
        Ok(agent)
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.settings.model = model.into();
        self
    }

    /// Points the agent at a different API root (models collection URL).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.settings.model
    }

    fn build_request(&self, prompt: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: (&self.settings.generation).into(),
            safety_settings: self.settings.safety.iter().map(Into::into).collect(),
        }
    }

    async fn send_request(&self, body: &GenerateContentRequest) -> Result<String> {
        let url = format!(
            "{}/{model}:generateContent?key={api_key}",
            self.base_url,
            model = self.settings.model,
            api_key = self.api_key
        );

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|err| {
                // reqwest errors may embed the URL, which carries the key
                NetmateError::backend(format!(
                    "Gemini API request failed: {}",
                    err.without_url()
                ))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|err| {
            NetmateError::backend(format!(
                "Failed to parse Gemini response: {}",
                err.without_url()
            ))
        })?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl GenerativeBackend for GeminiApiAgent {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        if prompt.trim().is_empty() {
            return Err(NetmateError::backend("Gemini prompt must not be empty"));
        }
        tracing::debug!(model = %self.settings.model, prompt_chars = prompt.len(), "Calling Gemini");
        let request = self.build_request(prompt);
        self.send_request(&request).await
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    safety_settings: Vec<SafetySettingPayload>,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: u32,
    max_output_tokens: u32,
}

impl From<&GenerationSettings> for GenerationConfig {
    fn from(s: &GenerationSettings) -> Self {
        Self {
            temperature: s.temperature,
            top_p: s.top_p,
            top_k: s.top_k,
            max_output_tokens: s.max_output_tokens,
        }
    }
}

#[derive(Serialize)]
struct SafetySettingPayload {
    category: String,
    threshold: String,
}

impl From<&SafetySetting> for SafetySettingPayload {
    fn from(s: &SafetySetting) -> Self {
        Self {
            category: s.category.clone(),
            threshold: s.threshold.clone(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

fn extract_text_response(response: GenerateContentResponse) -> Result<String> {
    let block_reason = response
        .prompt_feedback
        .and_then(|feedback| feedback.block_reason);

    response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
        .ok_or_else(|| match block_reason {
            Some(reason) => NetmateError::backend(format!("Gemini blocked the prompt: {reason}")),
            None => NetmateError::backend("Gemini API returned no text in the response candidates"),
        })
}

fn map_http_error(status: StatusCode, body: String) -> NetmateError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    NetmateError::backend_status(status.as_u16(), message)
}
