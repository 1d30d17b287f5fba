//! Configuration models.
//!
//! `AppConfig` mirrors `config.toml`; `SecretConfig` mirrors `secret.json`.
//! Every `AppConfig` field has a default so an absent or partial file is
//! valid.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_OUTAGE_ENDPOINT: &str = "http://172.16.2.172:8089/dtv/genai/getServiceInfo";
pub const DEFAULT_OUTAGE_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_COOLDOWN_SECS: u64 = 5;
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-pro-exp-0801";
pub const DEFAULT_CATALOG_FILE: &str = "wifi_solution.csv";

/// Root of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// CSV catalog path. Relative paths resolve against the config directory.
    pub catalog_path: Option<PathBuf>,
    pub outage: OutageConfig,
    pub dialogue: DialogueConfig,
    pub gemini: GeminiSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutageConfig {
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for OutageConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_OUTAGE_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_OUTAGE_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogueConfig {
    /// Advisory pause between turns, shown to the user.
    pub cooldown_secs: u64,
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            cooldown_secs: DEFAULT_COOLDOWN_SECS,
        }
    }
}

/// Non-secret Gemini settings: model, sampling and safety filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiSettings {
    pub model: String,
    pub generation: GenerationSettings,
    pub safety: Vec<SafetySetting>,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_GEMINI_MODEL.to_string(),
            generation: GenerationSettings::default(),
            safety: SafetySetting::defaults(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            temperature: 0.9,
            top_p: 1.0,
            top_k: 1,
            max_output_tokens: 2048,
        }
    }
}

/// One vendor safety filter, e.g. `HARM_CATEGORY_HARASSMENT` at
/// `BLOCK_MEDIUM_AND_ABOVE`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetySetting {
    pub category: String,
    pub threshold: String,
}

impl SafetySetting {
    pub fn defaults() -> Vec<Self> {
        [
            "HARM_CATEGORY_HARASSMENT",
            "HARM_CATEGORY_HATE_SPEECH",
            "HARM_CATEGORY_SEXUALLY_EXPLICIT",
            "HARM_CATEGORY_DANGEROUS_CONTENT",
        ]
        .into_iter()
        .map(|category| Self {
            category: category.to_string(),
            threshold: "BLOCK_MEDIUM_AND_ABOVE".to_string(),
        })
        .collect()
    }
}

/// Root of `secret.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecretConfig {
    #[serde(default)]
    pub gemini: Option<GeminiSecret>,
}

/// Gemini API credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiSecret {
    pub api_key: String,
    #[serde(default)]
    pub model_name: Option<String>,
}
