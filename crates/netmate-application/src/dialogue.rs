//! Dialogue controller: the solution-escalation state machine.
//!
//! Each call to [`DialogueController::handle_turn`] processes one user
//! utterance to completion. The escalation tier is derived from the number of
//! assistant replies already in the conversation:
//!
//! | replies so far | action                                   |
//! |----------------|------------------------------------------|
//! | 0, 1           | backend, prompted for Solution 1 / 2     |
//! | 2              | outage check, backend unless affected    |
//! | 3              | backend, prompted for Solution 3         |
//! | 4+             | backend (Solution 4) + exhaustion notice |
//!
//! A user message confirming resolution short-circuits all of the above and
//! clears the conversation.

use crate::prompt::PromptComposer;
use netmate_core::error::Result;
use netmate_core::{
    Catalog, Conversation, EscalationTier, GenerativeBackend, OutageCheckResult, OutageChecker,
};
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(5);

pub const RESOLUTION_PHRASES: [&str; 2] = ["problem is resolved", "issue is resolved"];

pub const RESOLVED_ACKNOWLEDGEMENT: &str = "Great! I'm glad we could resolve your WiFi issue. \
The chat history will now be cleared for a fresh start.";

pub const EXHAUSTED_NOTICE: &str = "I apologize, but I've provided all available solutions. \
If the issue persists, please contact your ISP directly for further assistance.";

const OUTAGE_PREFIX: &str = "It looks like there is an outage in your area.";

/// Side information produced while handling a turn, for the surface to
/// display alongside the reply. Not stored in the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnNotice {
    /// The outage service is being queried.
    CheckingOutage,
    /// The outage service reported no outage.
    NoOutage,
    /// The outage service could not be queried.
    OutageCheckUnavailable(String),
}

impl TurnNotice {
    pub fn message(&self) -> &'static str {
        match self {
            TurnNotice::CheckingOutage => "Let me check if there is a service outage in your area...",
            TurnNotice::NoOutage => {
                "It looks like there is no outage in your area. Let's try something else."
            }
            TurnNotice::OutageCheckUnavailable(_) => {
                "Unable to check for service outages at the moment. Let's continue with other solutions."
            }
        }
    }
}

/// Result of one committed turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    /// Assistant text, already appended to the conversation unless `reset`.
    pub reply: String,
    pub notices: Vec<TurnNotice>,
    /// Tier that produced the reply; `None` for a resolution confirmation.
    pub tier: Option<EscalationTier>,
    /// Advisory pause before the next input. The controller never waits.
    pub cooldown: Duration,
    /// The conversation was cleared by this turn.
    pub reset: bool,
}

/// Returns true when the user says the problem is fixed.
pub fn is_resolution_confirmation(user_text: &str) -> bool {
    let lower = user_text.to_lowercase();
    RESOLUTION_PHRASES.iter().any(|phrase| lower.contains(phrase))
}

/// Drives a troubleshooting conversation through the escalation tiers.
///
/// Holds only shared read-only state, so one controller can serve any
/// number of independent conversations.
pub struct DialogueController {
    catalog: Catalog,
    composer: PromptComposer,
    backend: Arc<dyn GenerativeBackend>,
    outage: Arc<dyn OutageChecker>,
    cooldown: Duration,
}

impl DialogueController {
    pub fn new(
        catalog: Catalog,
        backend: Arc<dyn GenerativeBackend>,
        outage: Arc<dyn OutageChecker>,
    ) -> Result<Self> {
        Ok(Self {
            catalog,
            composer: PromptComposer::new()?,
            backend,
            outage,
            cooldown: DEFAULT_COOLDOWN,
        })
    }

    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Validates the customer identifier and opens an empty conversation.
    pub fn start_conversation(&self, raw_customer_id: &str) -> Result<Conversation> {
        let conversation = Conversation::for_customer(raw_customer_id)?;
        tracing::info!(customer = %conversation.customer_id(), "Conversation started");
        Ok(conversation)
    }

    /// Clears the conversation on explicit user request.
    pub fn reset_conversation(&self, conversation: &mut Conversation) {
        tracing::info!(customer = %conversation.customer_id(), "Conversation reset by user");
        conversation.reset();
    }

    /// Handles one user utterance and commits the assistant reply.
    ///
    /// # Errors
    ///
    /// Returns `NetmateError::GenerativeBackend` (or `Template`) when no
    /// reply could be produced. The user message is rolled back so the
    /// conversation is exactly as it was before the call.
    pub async fn handle_turn(
        &self,
        conversation: &mut Conversation,
        user_text: &str,
    ) -> Result<TurnOutcome> {
        conversation.push_user(user_text);
        let solution_count = conversation.solution_count();

        if is_resolution_confirmation(user_text) {
            tracing::info!(
                customer = %conversation.customer_id(),
                solution_count,
                "Issue resolved, clearing conversation"
            );
            conversation.reset();
            return Ok(TurnOutcome {
                reply: RESOLVED_ACKNOWLEDGEMENT.to_string(),
                notices: Vec::new(),
                tier: None,
                cooldown: self.cooldown,
                reset: true,
            });
        }

        let tier = EscalationTier::from_solution_count(solution_count);
        tracing::info!(
            customer = %conversation.customer_id(),
            solution_count,
            ?tier,
            solution = ?tier.solution_number(),
            "Handling turn"
        );

        let mut notices = Vec::new();
        let reply = match self
            .respond(conversation, tier, solution_count, &mut notices)
            .await
        {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(backend = self.backend.name(), "Turn failed: {}", e);
                conversation.pop_user();
                return Err(e);
            }
        };

        conversation.push_assistant(reply.clone());

        Ok(TurnOutcome {
            reply,
            notices,
            tier: Some(tier),
            cooldown: self.cooldown,
            reset: false,
        })
    }

    async fn respond(
        &self,
        conversation: &Conversation,
        tier: EscalationTier,
        solution_count: usize,
        notices: &mut Vec<TurnNotice>,
    ) -> Result<String> {
        if tier == EscalationTier::OutageCheck {
            notices.push(TurnNotice::CheckingOutage);
            match self.outage.check(conversation.customer_id()).await {
                result if result.is_affected() => {
                    tracing::info!(customer = %conversation.customer_id(), "Outage reported");
                    return Ok(outage_reply(result.message()));
                }
                OutageCheckResult::Status { .. } => {
                    tracing::info!(customer = %conversation.customer_id(), "No outage, continuing");
                    notices.push(TurnNotice::NoOutage);
                }
                OutageCheckResult::Error(cause) => {
                    tracing::warn!(customer = %conversation.customer_id(), "Outage check failed: {}", cause);
                    notices.push(TurnNotice::OutageCheckUnavailable(cause));
                }
            }
        }

        let mut reply = self.generate(conversation, solution_count).await?;
        if tier.is_terminal() {
            reply.push_str("\n\n");
            reply.push_str(EXHAUSTED_NOTICE);
        }
        Ok(reply)
    }

    async fn generate(&self, conversation: &Conversation, solution_count: usize) -> Result<String> {
        let (history, latest) = conversation.split_latest();
        let latest = latest.map(|m| m.content.as_str()).unwrap_or_default();
        let prompt = self
            .composer
            .compose(&self.catalog, history, latest, solution_count)?;
        tracing::debug!(prompt_chars = prompt.len(), "Prompt composed");
        self.backend.generate(&prompt).await
    }
}

fn outage_reply(message: &str) -> String {
    let message = message.trim();
    if message.is_empty() {
        OUTAGE_PREFIX.to_string()
    } else {
        format!("{OUTAGE_PREFIX} {message}")
    }
}
