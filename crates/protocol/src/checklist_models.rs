//! Markdown checklist models.
//!
//! Templates carry review checklists as markdown task lists:
//!
//! ```markdown
//! - [x] Secrets are loaded from the environment
//! - [ ] Input validation on every public endpoint
//! ```

use crate::promotion_models::ChecklistCounts;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A single task list entry.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
pub struct ChecklistItem {
    pub text: String,
    pub completed: bool,

    /// 1-based line number in the source document.
    pub line: usize,
}

/// All task list entries found in a document.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, TS)]
pub struct ChecklistSummary {
    pub items: Vec<ChecklistItem>,
}

impl ChecklistSummary {
    pub fn total(&self) -> usize {
        self.items.len()
    }

    pub fn completed(&self) -> usize {
        self.items.iter().filter(|item| item.completed).count()
    }

    /// Items still open, in document order.
    pub fn outstanding(&self) -> impl Iterator<Item = &ChecklistItem> {
        self.items.iter().filter(|item| !item.completed)
    }

    /// Completed share in `[0, 1]`. A document without a checklist has
    /// nothing outstanding and counts as complete.
    pub fn completion_ratio(&self) -> f64 {
        if self.items.is_empty() {
            return 1.0;
        }
        self.completed() as f64 / self.total() as f64
    }

    pub fn counts(&self) -> ChecklistCounts {
        ChecklistCounts {
            total: self.total(),
            completed: self.completed(),
        }
    }
}
