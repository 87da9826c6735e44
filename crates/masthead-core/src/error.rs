//! Error taxonomy.
//!
//! [`ErrorCode`] gives the route layer stable machine-readable codes;
//! [`TransitionError`] is the typed error surface of the workflow store.

use std::fmt;

use crate::model::status::Status;

/// Machine-readable error codes surfaced to the route layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    UnknownStatus,
    InvalidStatusTransition,
    SubmissionNotFound,
    DuplicateSubmission,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::UnknownStatus => "E2001",
            Self::InvalidStatusTransition => "E2002",
            Self::SubmissionNotFound => "E2003",
            Self::DuplicateSubmission => "E2004",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and API error bodies.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Workflow config parse error",
            Self::UnknownStatus => "Unknown submission status",
            Self::InvalidStatusTransition => "Invalid status transition",
            Self::SubmissionNotFound => "Submission not found",
            Self::DuplicateSubmission => "Submission already exists",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in masthead.toml and retry."),
            Self::UnknownStatus => {
                Some("Status values outside the catalog indicate schema/version skew; do not coerce.")
            }
            Self::InvalidStatusTransition => {
                Some("Consult allowed_from() for the transitions available to this submission.")
            }
            Self::SubmissionNotFound => None,
            Self::DuplicateSubmission => Some("Submission ids are minted once by intake."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors returned by the workflow store.
///
/// `InvalidTransition` is re-verified against the *stored* status at the
/// point of write; the store performs no partial write on any error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("invalid transition {from} -> {to} for submission {id}")]
    InvalidTransition { id: String, from: Status, to: Status },

    #[error("submission {id} not found")]
    SubmissionNotFound { id: String },

    #[error("submission {id} already exists")]
    DuplicateSubmission { id: String },
}

impl TransitionError {
    /// The stable code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidTransition { .. } => ErrorCode::InvalidStatusTransition,
            Self::SubmissionNotFound { .. } => ErrorCode::SubmissionNotFound,
            Self::DuplicateSubmission { .. } => ErrorCode::DuplicateSubmission,
        }
    }
}
