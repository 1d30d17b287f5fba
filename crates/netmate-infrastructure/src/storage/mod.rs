//! Storage layer for configuration files.

mod config_storage;
mod secret_storage;

pub use config_storage::{ConfigStorage, ConfigStorageError};
pub use secret_storage::{GEMINI_API_KEY_ENV, SecretStorage, SecretStorageError};
