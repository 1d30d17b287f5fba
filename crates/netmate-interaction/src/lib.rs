//! Network adapters: the Gemini text-completion backend and the outage
//! status client.

pub mod gemini_api_agent;
pub mod outage_client;

pub use gemini_api_agent::GeminiApiAgent;
pub use outage_client::OutageCheckClient;
