//! Escalation tiers.
//!
//! A conversation walks a fixed sequence: Solution 1, Solution 2, an outage
//! check, Solution 3, then Solution 4 which is terminal. The tier is derived
//! from how many assistant replies the conversation already holds.

use serde::{Deserialize, Serialize};

/// Where a conversation is in the escalation sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EscalationTier {
    /// Deliver catalog Solution n (1, 2 or 3).
    Solution(u8),
    /// Ask the outage-status service before anything else.
    OutageCheck,
    /// Deliver Solution 4 and tell the user nothing else is left.
    Exhausted,
}

impl EscalationTier {
    pub fn from_solution_count(solution_count: usize) -> Self {
        match solution_count {
            0 => Self::Solution(1),
            1 => Self::Solution(2),
            2 => Self::OutageCheck,
            3 => Self::Solution(3),
            _ => Self::Exhausted,
        }
    }

    /// The catalog solution this tier prescribes, if any.
    pub fn solution_number(&self) -> Option<u8> {
        match self {
            Self::Solution(n) => Some(*n),
            Self::OutageCheck => None,
            Self::Exhausted => Some(4),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Exhausted)
    }
}
