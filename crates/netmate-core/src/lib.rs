pub mod backend;
pub mod catalog;
pub mod config;
pub mod customer;
pub mod error;
pub mod escalation;
pub mod outage;
pub mod session;

// Re-export common types
pub use backend::GenerativeBackend;
pub use catalog::{Catalog, CatalogSource, IssueRecord};
pub use customer::CustomerId;
pub use error::{NetmateError, Result};
pub use escalation::EscalationTier;
pub use outage::{OutageCheckResult, OutageChecker};
pub use session::{Conversation, ConversationMessage, MessageRole};
