//! A single customer's troubleshooting conversation.

use super::message::{ConversationMessage, MessageRole};
use crate::customer::CustomerId;
use crate::error::Result;

/// Conversation state owned by the caller and mutated only by the dialogue
/// controller.
///
/// The number of solutions already offered is never stored; it is always
/// recomputed from the assistant messages so it cannot drift from history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    customer_id: CustomerId,
    messages: Vec<ConversationMessage>,
}

impl Conversation {
    pub fn new(customer_id: CustomerId) -> Self {
        Self {
            customer_id,
            messages: Vec::new(),
        }
    }

    /// Validates a raw identifier and starts an empty conversation.
    pub fn for_customer(raw_id: &str) -> Result<Self> {
        Ok(Self::new(CustomerId::parse(raw_id)?))
    }

    pub fn customer_id(&self) -> &CustomerId {
        &self.customer_id
    }

    pub fn messages(&self) -> &[ConversationMessage] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of assistant replies so far.
    pub fn solution_count(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| m.role == MessageRole::Assistant)
            .count()
    }

    /// Clears the message history. The customer stays the same.
    pub fn reset(&mut self) {
        self.messages.clear();
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(ConversationMessage::user(content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(ConversationMessage::assistant(content));
    }

    /// Removes the trailing message if it is a user message.
    ///
    /// Used to roll back a turn that could not be completed.
    pub fn pop_user(&mut self) -> Option<ConversationMessage> {
        match self.messages.last() {
            Some(m) if m.role == MessageRole::User => self.messages.pop(),
            _ => None,
        }
    }

    /// Splits history into everything before the latest message and the
    /// latest message itself.
    pub fn split_latest(&self) -> (&[ConversationMessage], Option<&ConversationMessage>) {
        match self.messages.split_last() {
            Some((last, rest)) => (rest, Some(last)),
            None => (&[], None),
        }
    }
}
