//! Role-escalation request status.
//!
//! A deliberately separate alphabet from [`Status`](super::status::Status):
//! escalation requests follow their own three-way approve/reject/cancel
//! flow and share only the generic transition-table machinery with the
//! submission lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Statuses of a role-escalation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EscalationStatus {
    /// Awaiting an administrator decision.
    Pending,
    /// Granted.
    Approved,
    /// Denied.
    Rejected,
    /// Withdrawn by the requester before a decision.
    Cancelled,
}

/// Error returned when parsing an unknown escalation status string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEscalationStatus {
    /// The unrecognised input string.
    pub raw: String,
}

impl fmt::Display for UnknownEscalationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown escalation status '{}': expected one of pending, approved, \
             rejected, cancelled",
            self.raw
        )
    }
}

impl std::error::Error for UnknownEscalationStatus {}

impl EscalationStatus {
    /// All escalation statuses.
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::Approved,
        Self::Rejected,
        Self::Cancelled,
    ];

    /// Return the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
        }
    }

    /// Every status except `Pending` ends the request.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for EscalationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EscalationStatus {
    type Err = UnknownEscalationStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(UnknownEscalationStatus { raw: s.to_string() }),
        }
    }
}

impl Serialize for EscalationStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EscalationStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_parse_roundtrips() {
        for status in EscalationStatus::ALL {
            let reparsed = EscalationStatus::from_str(&status.to_string()).unwrap();
            assert_eq!(status, reparsed);
        }
    }

    #[test]
    fn parse_rejects_unknown_values() {
        assert!(EscalationStatus::from_str("expired").is_err());
    }

    #[test]
    fn only_pending_is_live() {
        assert!(!EscalationStatus::Pending.is_terminal());
        assert!(EscalationStatus::Approved.is_terminal());
        assert!(EscalationStatus::Rejected.is_terminal());
        assert!(EscalationStatus::Cancelled.is_terminal());
    }
}
