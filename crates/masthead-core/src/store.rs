//! Workflow store: the persistence seam of the lifecycle machine.
//!
//! Holds the submission registry and the append-only history log behind
//! `&mut self`, which closes the read-modify-write race the transition
//! rules require closed: the transition is re-verified against the
//! *stored* status at the point of write, never against a status the
//! caller read earlier. A durable backend enforcing the same contract
//! (conditional update guarded by the previously-read status) can replace
//! this in-memory registry without touching the rules.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::error::TransitionError;
use crate::machine::{TransitionTable, submission_transitions};
use crate::model::history::{HistoryLog, StatusHistoryEntry};
use crate::model::status::Status;
use crate::model::submission::Submission;
use crate::sla::SlaPolicy;

/// In-memory submission registry plus transition log.
#[derive(Debug)]
pub struct WorkflowStore {
    table: TransitionTable<Status>,
    policy: SlaPolicy,
    submissions: BTreeMap<String, Submission>,
    history: HistoryLog,
}

impl WorkflowStore {
    #[must_use]
    pub fn new(policy: SlaPolicy) -> Self {
        Self {
            table: submission_transitions(),
            policy,
            submissions: BTreeMap::new(),
            history: HistoryLog::default(),
        }
    }

    /// Register a new submission in `New` at `now`.
    ///
    /// Computes the initial deadline and appends the first history entry.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateSubmission` when `id` is already registered.
    pub fn create(
        &mut self,
        id: &str,
        title: &str,
        now: DateTime<Utc>,
    ) -> Result<&Submission, TransitionError> {
        if self.submissions.contains_key(id) {
            return Err(TransitionError::DuplicateSubmission { id: id.to_string() });
        }

        let submission = Submission {
            id: id.to_string(),
            title: title.to_string(),
            status: Status::New,
            created_at: now,
            last_status_change_at: now,
            deadline: self.policy.compute_deadline(Status::New, now),
            reminders_sent: 0,
        };
        self.history.append(StatusHistoryEntry {
            submission_id: id.to_string(),
            status: Status::New,
            changed_by: None,
            notes: None,
            changed_at: now,
        });
        tracing::info!(submission = %id, "submission created");

        let entry = self.submissions.entry(id.to_string()).or_insert(submission);
        Ok(entry)
    }

    /// Apply a status transition.
    ///
    /// On success, appends one history entry and updates `status`,
    /// `last_status_change_at`, `deadline`, and resets `reminders_sent`.
    /// On any error the store is untouched: no partial write.
    ///
    /// # Errors
    ///
    /// `SubmissionNotFound` for an unknown id; `InvalidTransition` when the
    /// stored status does not allow `new_status`.
    pub fn record_transition(
        &mut self,
        id: &str,
        new_status: Status,
        changed_by: Option<&str>,
        notes: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<&Submission, TransitionError> {
        let Some(submission) = self.submissions.get_mut(id) else {
            return Err(TransitionError::SubmissionNotFound { id: id.to_string() });
        };

        // Re-verify against the stored status, not a caller-read one.
        if !self.table.is_valid(submission.status, new_status) {
            tracing::warn!(
                submission = %id,
                from = %submission.status,
                to = %new_status,
                "rejected invalid status transition"
            );
            return Err(TransitionError::InvalidTransition {
                id: id.to_string(),
                from: submission.status,
                to: new_status,
            });
        }

        self.history.append(StatusHistoryEntry {
            submission_id: id.to_string(),
            status: new_status,
            changed_by: changed_by.map(str::to_string),
            notes: notes.map(str::to_string),
            changed_at: now,
        });

        let from = submission.status;
        submission.status = new_status;
        submission.last_status_change_at = now;
        submission.deadline = self.policy.compute_deadline(new_status, now);
        submission.reminders_sent = 0;

        tracing::info!(
            submission = %id,
            from = %from,
            to = %new_status,
            deadline = ?submission.deadline,
            "status transition recorded"
        );
        Ok(submission)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Submission> {
        self.submissions.get(id)
    }

    /// History entries for one submission, oldest first.
    pub fn history<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a StatusHistoryEntry> {
        self.history.for_submission(id)
    }

    /// Submissions whose next reminder should fire at `now`.
    ///
    /// The external dispatcher sends the notification and then calls
    /// [`mark_reminder_sent`](Self::mark_reminder_sent).
    #[must_use]
    pub fn due_for_reminder(&self, now: DateTime<Utc>) -> Vec<&Submission> {
        self.submissions
            .values()
            .filter(|s| {
                self.policy
                    .should_send_reminder(s.deadline, s.reminders_sent, now)
            })
            .collect()
    }

    /// Record that a reminder was dispatched; returns the new count.
    ///
    /// # Errors
    ///
    /// Returns `SubmissionNotFound` for an unknown id.
    pub fn mark_reminder_sent(&mut self, id: &str) -> Result<u32, TransitionError> {
        let Some(submission) = self.submissions.get_mut(id) else {
            return Err(TransitionError::SubmissionNotFound { id: id.to_string() });
        };
        submission.reminders_sent += 1;
        tracing::debug!(
            submission = %id,
            reminders_sent = submission.reminders_sent,
            "reminder dispatch recorded"
        );
        Ok(submission.reminders_sent)
    }

    #[must_use]
    pub const fn policy(&self) -> &SlaPolicy {
        &self.policy
    }

    #[must_use]
    pub const fn table(&self) -> &TransitionTable<Status> {
        &self.table
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.submissions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.submissions.is_empty()
    }
}

impl Default for WorkflowStore {
    fn default() -> Self {
        Self::new(SlaPolicy::default())
    }
}
