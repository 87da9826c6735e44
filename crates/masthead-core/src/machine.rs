//! Generic finite transition table.
//!
//! The table is immutable, injected data: callers construct it once (or use
//! one of the canned instantiations below) and consult it from any number
//! of request contexts. Validation is a pure membership check with no side
//! effects; persistence of an accepted transition is the
//! [store](crate::store)'s job.

use std::fmt;

use crate::model::escalation::EscalationStatus;
use crate::model::status::Status;

/// An immutable map from state to its allowed successor states.
///
/// States absent from the table have no outgoing transitions, the same as
/// states listed with an empty successor set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionTable<S> {
    rows: Vec<(S, Vec<S>)>,
}

/// Error returned when a state transition is invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidTransition<S> {
    pub from: S,
    pub to: S,
    pub reason: &'static str,
}

impl<S: fmt::Display> fmt::Display for InvalidTransition<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid transition {} -> {}: {}",
            self.from, self.to, self.reason
        )
    }
}

impl<S: fmt::Display + fmt::Debug> std::error::Error for InvalidTransition<S> {}

impl<S: Copy + Eq> TransitionTable<S> {
    /// Build a table from `(state, allowed successors)` rows.
    #[must_use]
    pub const fn new(rows: Vec<(S, Vec<S>)>) -> Self {
        Self { rows }
    }

    /// Pure, total membership check: true iff `proposed` is an allowed
    /// successor of `current`. Self-transitions are never allowed.
    #[must_use]
    pub fn is_valid(&self, current: S, proposed: S) -> bool {
        current != proposed && self.allowed_from(current).contains(&proposed)
    }

    /// Like [`is_valid`](Self::is_valid), with a typed rejection.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTransition`] when the pair is not in the table.
    pub fn check(&self, current: S, proposed: S) -> Result<(), InvalidTransition<S>> {
        if current == proposed {
            return Err(InvalidTransition {
                from: current,
                to: proposed,
                reason: "state is unchanged",
            });
        }

        if self.allowed_from(current).contains(&proposed) {
            Ok(())
        } else {
            Err(InvalidTransition {
                from: current,
                to: proposed,
                reason: "not an allowed transition for the current state",
            })
        }
    }

    /// The allowed successor states of `current` (empty for terminal
    /// states and states not in the table).
    #[must_use]
    pub fn allowed_from(&self, current: S) -> &[S] {
        self.rows
            .iter()
            .find(|(state, _)| *state == current)
            .map_or(&[], |(_, allowed)| allowed.as_slice())
    }

    /// Whether `state` has no outgoing transitions.
    #[must_use]
    pub fn is_terminal(&self, state: S) -> bool {
        self.allowed_from(state).is_empty()
    }
}

/// The submission lifecycle table.
///
/// ```text
/// new           -> desk_reject | under_review
/// under_review  -> revision | accepted | rejected
/// revision      -> under_review | accepted | rejected
/// accepted      -> in_production
/// in_production -> published
/// desk_reject, rejected, published -> (terminal)
/// ```
#[must_use]
pub fn submission_transitions() -> TransitionTable<Status> {
    TransitionTable::new(vec![
        (Status::New, vec![Status::DeskReject, Status::UnderReview]),
        (
            Status::UnderReview,
            vec![Status::Revision, Status::Accepted, Status::Rejected],
        ),
        (
            Status::Revision,
            vec![Status::UnderReview, Status::Accepted, Status::Rejected],
        ),
        (Status::Accepted, vec![Status::InProduction]),
        (Status::InProduction, vec![Status::Published]),
        (Status::DeskReject, vec![]),
        (Status::Rejected, vec![]),
        (Status::Published, vec![]),
    ])
}

/// The role-escalation request table: `pending` fans out to the three
/// terminal decisions and nothing moves after that.
#[must_use]
pub fn escalation_transitions() -> TransitionTable<EscalationStatus> {
    TransitionTable::new(vec![
        (
            EscalationStatus::Pending,
            vec![
                EscalationStatus::Approved,
                EscalationStatus::Rejected,
                EscalationStatus::Cancelled,
            ],
        ),
        (EscalationStatus::Approved, vec![]),
        (EscalationStatus::Rejected, vec![]),
        (EscalationStatus::Cancelled, vec![]),
    ])
}
