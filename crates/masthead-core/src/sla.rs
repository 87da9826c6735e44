//! SLA deadline policy.
//!
//! Pure calendar-day arithmetic over an injected policy: deadline
//! computation per status, on-time/warning/overdue classification for the
//! UI badge, and the reminder cadence consumed by the dispatcher job.
//!
//! Reminder offsets are matched by *exact* day distance, consumed in order
//! by the `reminders_sent` index. A sweep that skips the matching calendar
//! day permanently misses that reminder; there is no catch-up. That
//! matches the production cadence this module replaces, and the regression
//! test below pins it down.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::status::Status;

const SECONDS_PER_DAY: i64 = 86_400;

/// Whole days from `from` to `to`, rounding toward negative infinity.
///
/// Floor division keeps the sign convention of the classification rules:
/// 36 hours past the deadline is -2 days remaining, not -1.
#[must_use]
pub fn days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_seconds().div_euclid(SECONDS_PER_DAY)
}

/// Current standing of a submission against its deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Standing {
    /// More than the warning window remains (or no deadline is tracked).
    OnTime,
    /// Within the warning window, deadline not yet passed.
    Warning,
    /// Deadline passed.
    Overdue,
}

impl Standing {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OnTime => "on_time",
            Self::Warning => "warning",
            Self::Overdue => "overdue",
        }
    }
}

impl fmt::Display for Standing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Calendar-day budgets and reminder cadence, injected at construction.
///
/// Terminal statuses carry no budget: [`SlaPolicy::day_budget`] is an
/// exhaustive match, so a new status is a compile-time-checked change here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlaPolicy {
    pub new_days: u32,
    pub under_review_days: u32,
    pub revision_days: u32,
    pub accepted_days: u32,
    pub in_production_days: u32,
    /// Inclusive upper bound (in days remaining) for `Warning`.
    pub warning_window_days: i64,
    /// Days-before-deadline offsets, consumed in order by `reminders_sent`.
    pub reminder_offsets: Vec<i64>,
    pub max_reminders: u32,
}

impl Default for SlaPolicy {
    fn default() -> Self {
        Self {
            new_days: 7,
            under_review_days: 21,
            revision_days: 14,
            accepted_days: 7,
            in_production_days: 14,
            warning_window_days: 3,
            reminder_offsets: vec![7, 3, 1],
            max_reminders: 3,
        }
    }
}

impl SlaPolicy {
    /// Day budget for `status`; 0 for terminal statuses.
    #[must_use]
    pub const fn day_budget(&self, status: Status) -> u32 {
        match status {
            Status::New => self.new_days,
            Status::UnderReview => self.under_review_days,
            Status::Revision => self.revision_days,
            Status::Accepted => self.accepted_days,
            Status::InProduction => self.in_production_days,
            Status::DeskReject | Status::Rejected | Status::Published => 0,
        }
    }

    /// Deadline for entering `status` at `reference`; `None` when the
    /// status carries no budget.
    #[must_use]
    pub fn compute_deadline(
        &self,
        status: Status,
        reference: DateTime<Utc>,
    ) -> Option<DateTime<Utc>> {
        let days = self.day_budget(status);
        (days > 0).then(|| reference + Duration::days(i64::from(days)))
    }

    /// Classify standing at `now`. A missing deadline is always `OnTime`.
    ///
    /// The warning window is inclusive at its upper bound: with the default
    /// 3-day window, exactly 3 whole days remaining is already `Warning`.
    #[must_use]
    pub fn classify(&self, deadline: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Standing {
        let Some(deadline) = deadline else {
            return Standing::OnTime;
        };

        let days_remaining = days_between(now, deadline);
        if days_remaining < 0 {
            Standing::Overdue
        } else if days_remaining <= self.warning_window_days {
            Standing::Warning
        } else {
            Standing::OnTime
        }
    }

    /// Whether the next reminder should fire at `now`.
    ///
    /// True only when the day distance to the deadline *exactly* equals the
    /// offset indexed by `reminders_sent`, and fewer than `max_reminders`
    /// have been dispatched. No deadline means no reminders.
    #[must_use]
    pub fn should_send_reminder(
        &self,
        deadline: Option<DateTime<Utc>>,
        reminders_sent: u32,
        now: DateTime<Utc>,
    ) -> bool {
        let Some(deadline) = deadline else {
            return false;
        };

        if reminders_sent >= self.max_reminders {
            return false;
        }

        let Some(&offset) = self.reminder_offsets.get(reminders_sent as usize) else {
            return false;
        };

        days_between(now, deadline) == offset
    }
}
