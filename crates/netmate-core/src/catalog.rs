//! Troubleshooting catalog domain model.
//!
//! The catalog is the fixed, read-only list of known WiFi issues and their
//! four prescribed solutions. It is loaded once at startup through a
//! [`CatalogSource`] and then shared between conversations.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::ops::Deref;
use std::sync::Arc;

/// Number of prescribed solutions per issue.
pub const SOLUTIONS_PER_ISSUE: usize = 4;

/// A single known WiFi issue with its prescribed solutions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueRecord {
    pub issue: String,
    pub symptoms: String,
    pub possible_causes: String,
    /// Solutions in escalation order (Solution 1 first).
    pub solutions: [String; SOLUTIONS_PER_ISSUE],
}

impl IssueRecord {
    /// Returns Solution `n` (1-based), or `None` when out of range.
    pub fn solution(&self, n: usize) -> Option<&str> {
        n.checked_sub(1)
            .and_then(|idx| self.solutions.get(idx))
            .map(String::as_str)
    }

    /// The canned utterance sent when the user picks this issue from the
    /// common-issue list instead of typing.
    pub fn as_user_prompt(&self) -> String {
        format!(
            "I'm experiencing {}. The symptoms are {}.",
            self.issue, self.symptoms
        )
    }
}

/// Ordered, immutable collection of issue records.
///
/// Cloning is cheap; all clones share the same records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    records: Arc<[IssueRecord]>,
}

impl Catalog {
    pub fn new(records: Vec<IssueRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }

    pub fn records(&self) -> &[IssueRecord] {
        &self.records
    }
}

impl Deref for Catalog {
    type Target = [IssueRecord];

    fn deref(&self) -> &Self::Target {
        &self.records
    }
}

impl From<Vec<IssueRecord>> for Catalog {
    fn from(records: Vec<IssueRecord>) -> Self {
        Self::new(records)
    }
}

/// Where the catalog comes from.
///
/// Implementations must either return every record or fail; a partial
/// catalog is never returned.
pub trait CatalogSource: Send + Sync {
    fn load(&self) -> Result<Catalog>;
}
