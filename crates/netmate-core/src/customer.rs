//! Customer identifiers.

use crate::error::{NetmateError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A customer's mobile number, used to key the outage lookup.
///
/// Always non-empty and made of ASCII digits only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CustomerId(String);

impl CustomerId {
    /// Validates and wraps a raw identifier.
    ///
    /// The whole string must be digits; callers trim user input first.
    ///
    /// # Errors
    ///
    /// Returns `NetmateError::InvalidIdentifier` for an empty string or any
    /// non-digit character.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
            return Err(NetmateError::invalid_identifier(raw));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CustomerId {
    type Error = NetmateError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<CustomerId> for String {
    fn from(id: CustomerId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numeric() {
        let id = CustomerId::parse("0712345678").unwrap();
        assert_eq!(id.as_str(), "0712345678");
        assert_eq!(id.to_string(), "0712345678");
    }

    #[test]
    fn test_parse_rejects_surrounding_whitespace() {
        assert!(CustomerId::parse(" 0771234567 ").unwrap_err().is_invalid_identifier());
        assert!(CustomerId::parse("5551234\n").unwrap_err().is_invalid_identifier());
    }

    #[test]
    fn test_parse_rejects_alphanumeric() {
        let err = CustomerId::parse("abc123").unwrap_err();
        assert!(err.is_invalid_identifier());
    }

    #[test]
    fn test_parse_rejects_empty_and_symbols() {
        assert!(CustomerId::parse("").unwrap_err().is_invalid_identifier());
        assert!(CustomerId::parse("   ").unwrap_err().is_invalid_identifier());
        assert!(CustomerId::parse("+94 77").unwrap_err().is_invalid_identifier());
        assert!(CustomerId::parse("12-34").unwrap_err().is_invalid_identifier());
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: CustomerId = serde_json::from_str("\"123\"").unwrap();
        assert_eq!(ok.as_str(), "123");
        assert!(serde_json::from_str::<CustomerId>("\"12a\"").is_err());
    }
}
