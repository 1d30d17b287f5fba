//! Secret configuration file storage.
//!
//! Loads API keys from `~/.config/netmate/secret.json`, with the
//! `GOOGLE_API_KEY` environment variable taking precedence.

use crate::paths::NetmatePaths;
use netmate_core::NetmateError;
use netmate_core::config::{GeminiSecret, SecretConfig};
use std::fs;
use std::path::PathBuf;

/// Environment variable that supplies or overrides the Gemini API key.
pub const GEMINI_API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Errors that can occur during secret storage operations.
#[derive(Debug)]
pub enum SecretStorageError {
    /// Configuration file not found.
    NotFound(PathBuf),
    /// File I/O error.
    IoError(std::io::Error),
    /// JSON parsing error.
    ParseError(serde_json::Error),
    /// Config directory not found.
    ConfigDirNotFound,
}

impl std::fmt::Display for SecretStorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SecretStorageError::NotFound(path) => {
                write!(f, "Secret file not found at: {}", path.display())
            }
            SecretStorageError::IoError(e) => write!(f, "I/O error: {}", e),
            SecretStorageError::ParseError(e) => write!(f, "JSON parse error: {}", e),
            SecretStorageError::ConfigDirNotFound => {
                write!(f, "Could not determine config directory")
            }
        }
    }
}

impl std::error::Error for SecretStorageError {}

impl From<std::io::Error> for SecretStorageError {
    fn from(e: std::io::Error) -> Self {
        SecretStorageError::IoError(e)
    }
}

impl From<serde_json::Error> for SecretStorageError {
    fn from(e: serde_json::Error) -> Self {
        SecretStorageError::ParseError(e)
    }
}

impl From<SecretStorageError> for NetmateError {
    fn from(e: SecretStorageError) -> Self {
        NetmateError::config(e.to_string())
    }
}

/// Storage for the secret configuration file (secret.json).
///
/// Read-only. The file is plaintext JSON and should be readable by the
/// owner only.
pub struct SecretStorage {
    path: PathBuf,
}

impl SecretStorage {
    /// Creates a new SecretStorage with the default path.
    pub fn new() -> Result<Self, SecretStorageError> {
        let path = NetmatePaths::secret_file().map_err(|_| SecretStorageError::ConfigDirNotFound)?;
        Ok(Self { path })
    }

    /// Creates a new SecretStorage with a custom path.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the secret configuration from the JSON file.
    ///
    /// # Returns
    ///
    /// - `Ok(SecretConfig)`: Successfully loaded and parsed
    /// - `Err(SecretStorageError::NotFound)`: File doesn't exist
    /// - `Err(SecretStorageError::IoError)`: Failed to read file
    /// - `Err(SecretStorageError::ParseError)`: Invalid JSON format
    pub fn load(&self) -> Result<SecretConfig, SecretStorageError> {
        if !self.path.exists() {
            return Err(SecretStorageError::NotFound(self.path.clone()));
        }

        let content = fs::read_to_string(&self.path)?;
        let config = serde_json::from_str(&content)?;

        Ok(config)
    }

    /// Loads secrets, letting `env_key` override or stand in for the file.
    ///
    /// A missing file is not an error when the environment provides the key.
    pub fn load_with_env_key(
        &self,
        env_key: Option<String>,
    ) -> Result<SecretConfig, SecretStorageError> {
        let mut config = match self.load() {
            Ok(config) => config,
            Err(SecretStorageError::NotFound(_)) if env_key.is_some() => SecretConfig::default(),
            Err(e) => return Err(e),
        };

        if let Some(api_key) = env_key.filter(|k| !k.trim().is_empty()) {
            tracing::debug!("Using Gemini API key from {}", GEMINI_API_KEY_ENV);
            let model_name = config.gemini.and_then(|g| g.model_name);
            config.gemini = Some(GeminiSecret {
                api_key,
                model_name,
            });
        }

        Ok(config)
    }

    /// [`load_with_env_key`](Self::load_with_env_key) fed from the process
    /// environment.
    pub fn load_with_env(&self) -> Result<SecretConfig, SecretStorageError> {
        self.load_with_env_key(std::env::var(GEMINI_API_KEY_ENV).ok())
    }

    /// Returns the path to the secret file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("secret.json");
        let storage = SecretStorage::with_path(file_path.clone());

        let result = storage.load();
        match result {
            Err(SecretStorageError::NotFound(path)) => {
                assert_eq!(path, file_path);
            }
            _ => panic!("Expected NotFound error"),
        }
    }

    #[test]
    fn test_load_valid_json() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("secret.json");

        let json_content = r#"{
            "gemini": {
                "api_key": "test-key-123",
                "model_name": "gemini-pro"
            }
        }"#;

        fs::write(&file_path, json_content).unwrap();

        let storage = SecretStorage::with_path(file_path);
        let gemini = storage.load().unwrap().gemini.unwrap();

        assert_eq!(gemini.api_key, "test-key-123");
        assert_eq!(gemini.model_name, Some("gemini-pro".to_string()));
    }

    #[test]
    fn test_load_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("secret.json");
        fs::write(&file_path, r#"{ invalid json"#).unwrap();

        let storage = SecretStorage::with_path(file_path);
        assert!(matches!(storage.load(), Err(SecretStorageError::ParseError(_))));
    }

    #[test]
    fn test_env_key_stands_in_for_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = SecretStorage::with_path(temp_dir.path().join("secret.json"));

        let config = storage
            .load_with_env_key(Some("env-key".to_string()))
            .unwrap();
        assert_eq!(config.gemini.unwrap().api_key, "env-key");
    }

    #[test]
    fn test_env_key_overrides_file_but_keeps_model() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("secret.json");
        fs::write(
            &file_path,
            r#"{"gemini": {"api_key": "file-key", "model_name": "gemini-pro"}}"#,
        )
        .unwrap();

        let storage = SecretStorage::with_path(file_path);
        let gemini = storage
            .load_with_env_key(Some("env-key".to_string()))
            .unwrap()
            .gemini
            .unwrap();
        assert_eq!(gemini.api_key, "env-key");
        assert_eq!(gemini.model_name.as_deref(), Some("gemini-pro"));
    }

    #[test]
    fn test_missing_file_without_env_key_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let storage = SecretStorage::with_path(temp_dir.path().join("secret.json"));
        assert!(matches!(
            storage.load_with_env_key(None),
            Err(SecretStorageError::NotFound(_))
        ));
    }
}
