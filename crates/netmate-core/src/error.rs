//! Error types for NetMate.

use thiserror::Error;

/// A shared error type for the whole NetMate workspace.
///
/// Recoverable variants (`InvalidIdentifier`, `OutageCheck`,
/// `GenerativeBackend`) are handled by the caller that produced them;
/// `CatalogLoad` is fatal at startup.
#[derive(Error, Debug, Clone)]
pub enum NetmateError {
    /// Customer identifier is empty or contains non-digit characters.
    #[error("Invalid identifier '{0}': expected a numeric mobile number")]
    InvalidIdentifier(String),

    /// The troubleshooting catalog could not be loaded.
    #[error("Catalog load failed: {0}")]
    CatalogLoad(String),

    /// The outage-status service could not be queried.
    #[error("Outage check failed: {0}")]
    OutageCheck(String),

    /// The generative backend failed or returned no usable text.
    #[error("Generative backend error{}: {message}", fmt_status(.status_code))]
    GenerativeBackend {
        status_code: Option<u16>,
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", "CSV"
        message: String,
    },

    /// Prompt template rendering error
    #[error("Template error: {0}")]
    Template(String),
}

impl NetmateError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    pub fn invalid_identifier(raw: impl Into<String>) -> Self {
        Self::InvalidIdentifier(raw.into())
    }

    pub fn catalog_load(message: impl Into<String>) -> Self {
        Self::CatalogLoad(message.into())
    }

    pub fn outage_check(message: impl Into<String>) -> Self {
        Self::OutageCheck(message.into())
    }

    /// Creates a GenerativeBackend error without an HTTP status.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::GenerativeBackend {
            status_code: None,
            message: message.into(),
        }
    }

    /// Creates a GenerativeBackend error carrying the HTTP status.
    pub fn backend_status(status_code: u16, message: impl Into<String>) -> Self {
        Self::GenerativeBackend {
            status_code: Some(status_code),
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    pub fn is_invalid_identifier(&self) -> bool {
        matches!(self, Self::InvalidIdentifier(_))
    }

    pub fn is_catalog_load(&self) -> bool {
        matches!(self, Self::CatalogLoad(_))
    }

    pub fn is_backend(&self) -> bool {
        matches!(self, Self::GenerativeBackend { .. })
    }

    /// Only catalog load failures stop the process.
    pub fn is_fatal(&self) -> bool {
        self.is_catalog_load()
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for NetmateError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for NetmateError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for NetmateError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

fn fmt_status(status_code: &Option<u16>) -> String {
    status_code.map(|c| format!(" ({c})")).unwrap_or_default()
}

/// A type alias for `Result<T, NetmateError>`.
pub type Result<T> = std::result::Result<T, NetmateError>;
