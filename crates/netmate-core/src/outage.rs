//! Outage-check service boundary.

use crate::customer::CustomerId;

/// Outcome of asking the provider whether a customer's area is affected by
/// an outage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutageCheckResult {
    /// The service answered.
    Status {
        is_service_affected: bool,
        message: String,
    },
    /// The service could not be reached or answered with garbage.
    Error(String),
}

impl OutageCheckResult {
    pub fn is_affected(&self) -> bool {
        matches!(
            self,
            Self::Status {
                is_service_affected: true,
                ..
            }
        )
    }

    /// Text reported by the service; empty for [`OutageCheckResult::Error`].
    pub fn message(&self) -> &str {
        match self {
            Self::Status { message, .. } => message,
            Self::Error(_) => "",
        }
    }
}

/// Checks whether a customer's service is disrupted by a provider outage.
///
/// Implementations make at most one remote call per invocation and never
/// fail past this boundary: every failure is reported as
/// [`OutageCheckResult::Error`].
#[async_trait::async_trait]
pub trait OutageChecker: Send + Sync {
    async fn check(&self, customer_id: &CustomerId) -> OutageCheckResult;
}
