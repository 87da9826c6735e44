//! Submission record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::sla::days_between;

use super::status::Status;

/// One manuscript under editorial processing.
///
/// `deadline` and `reminders_sent` always describe the *current* status:
/// both are recomputed/reset on every accepted transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub id: String,
    pub title: String,
    pub status: Status,
    pub created_at: DateTime<Utc>,
    /// Timestamp of the most recent status transition.
    pub last_status_change_at: DateTime<Utc>,
    /// SLA deadline for the current status; `None` in terminal statuses.
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    /// Reminders already dispatched against the current deadline.
    #[serde(default)]
    pub reminders_sent: u32,
}

impl Submission {
    /// Whole days spent in the current status as of `now`.
    #[must_use]
    pub fn days_in_status(&self, now: DateTime<Utc>) -> i64 {
        days_between(self.last_status_change_at, now)
    }
}
