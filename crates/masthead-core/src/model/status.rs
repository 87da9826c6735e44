//! Submission lifecycle status enum.
//!
//! The string representation uses `snake_case` tokens stored in the
//! database and exchanged with the route layer. The enum is closed:
//! unknown strings fail parsing and are never coerced to a default.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The eight submission lifecycle statuses.
///
/// `DeskReject`, `Rejected`, and `Published` are terminal: no transition
/// leads out of them and no SLA deadline is tracked there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Newly submitted manuscript awaiting an initial editorial pass.
    New,
    /// Rejected by an editor before peer review began.
    DeskReject,
    /// Out for peer review.
    UnderReview,
    /// Returned to the authors for revision.
    Revision,
    /// Accepted for publication, awaiting production.
    Accepted,
    /// Rejected after peer review.
    Rejected,
    /// In copyediting and typesetting.
    InProduction,
    /// Published on the public site.
    Published,
}

/// Error returned when parsing an unknown status string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus {
    /// The unrecognised input string.
    pub raw: String,
}

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown submission status '{}': expected one of new, desk_reject, \
             under_review, revision, accepted, rejected, in_production, published",
            self.raw
        )
    }
}

impl std::error::Error for UnknownStatus {}

impl Status {
    /// All statuses in lifecycle order.
    pub const ALL: [Self; 8] = [
        Self::New,
        Self::DeskReject,
        Self::UnderReview,
        Self::Revision,
        Self::Accepted,
        Self::Rejected,
        Self::InProduction,
        Self::Published,
    ];

    /// Return the canonical `snake_case` string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::DeskReject => "desk_reject",
            Self::UnderReview => "under_review",
            Self::Revision => "revision",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::InProduction => "in_production",
            Self::Published => "published",
        }
    }

    /// Whether processing of a submission ends at this status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::DeskReject | Self::Rejected | Self::Published)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "new" => Ok(Self::New),
            "desk_reject" => Ok(Self::DeskReject),
            "under_review" => Ok(Self::UnderReview),
            "revision" => Ok(Self::Revision),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            "in_production" => Ok(Self::InProduction),
            "published" => Ok(Self::Published),
            _ => Err(UnknownStatus { raw: s.to_string() }),
        }
    }
}

// Custom serde: serialize as the canonical snake_case string.
impl Serialize for Status {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}
