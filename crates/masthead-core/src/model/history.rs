//! Append-only status history.
//!
//! Each accepted transition appends exactly one entry. Entries are
//! independent facts owned by the log, not by the submission record: the
//! log exposes no mutation or removal surface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::status::Status;

/// One recorded status transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusHistoryEntry {
    /// Submission the transition belongs to.
    pub submission_id: String,
    /// The status the submission moved *to*.
    pub status: Status,
    /// Actor reference, when the change was attributed.
    #[serde(default)]
    pub changed_by: Option<String>,
    /// Free-form editorial notes attached to the change.
    #[serde(default)]
    pub notes: Option<String>,
    /// When the transition was recorded.
    pub changed_at: DateTime<Utc>,
}

/// The append-only transition log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryLog {
    entries: Vec<StatusHistoryEntry>,
}

impl HistoryLog {
    /// Append one entry. Entries are never edited or removed afterwards.
    pub fn append(&mut self, entry: StatusHistoryEntry) {
        self.entries.push(entry);
    }

    /// All entries in append order.
    #[must_use]
    pub fn entries(&self) -> &[StatusHistoryEntry] {
        &self.entries
    }

    /// Entries for one submission, oldest first.
    pub fn for_submission<'a>(
        &'a self,
        submission_id: &'a str,
    ) -> impl Iterator<Item = &'a StatusHistoryEntry> {
        self.entries
            .iter()
            .filter(move |entry| entry.submission_id == submission_id)
    }

    /// Total number of recorded transitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no transition has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
