//! Generative backend boundary.

use crate::error::Result;

/// An opaque text-completion service.
///
/// Vendor-side filtering and generation parameters are configuration of the
/// implementation. Whatever text comes back is used as-is.
#[async_trait::async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Short human-readable name, used in logs.
    fn name(&self) -> &str;

    /// Completes `prompt`.
    ///
    /// # Errors
    ///
    /// Returns `NetmateError::GenerativeBackend` when the call fails or the
    /// response carries no text.
    async fn generate(&self, prompt: &str) -> Result<String>;
}
