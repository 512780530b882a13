//! Leave request entity

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Status of a leave request. `Approved` and `Rejected` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

impl std::fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Approved => write!(f, "approved"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

/// Leave request entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveRequest {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub requested_at: DateTime<Utc>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    pub status: LeaveStatus,
    pub decision_reason: Option<String>,
}

impl LeaveRequest {
    /// Create a pending request. Fails if `end_date` precedes `start_date`.
    pub fn new(
        id: Snowflake,
        user_id: Snowflake,
        start_date: NaiveDate,
        end_date: NaiveDate,
        reason: String,
    ) -> Result<Self, DomainError> {
        if end_date < start_date {
            return Err(DomainError::InvalidDateRange);
        }
        Ok(Self {
            id,
            user_id,
            requested_at: Utc::now(),
            start_date,
            end_date,
            reason,
            status: LeaveStatus::Pending,
            decision_reason: None,
        })
    }

    /// Check if a decision is still possible
    #[inline]
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == LeaveStatus::Pending
    }

    /// Number of calendar days covered, inclusive
    #[must_use]
    pub fn day_count(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    /// Approve the request. Fails once a decision has been made.
    pub fn approve(&mut self, reason: Option<String>) -> Result<(), DomainError> {
        self.decide(LeaveStatus::Approved, reason)
    }

    /// Reject the request. Fails once a decision has been made.
    pub fn reject(&mut self, reason: Option<String>) -> Result<(), DomainError> {
        self.decide(LeaveStatus::Rejected, reason)
    }

    fn decide(&mut self, status: LeaveStatus, reason: Option<String>) -> Result<(), DomainError> {
        if !self.is_pending() {
            return Err(DomainError::LeaveAlreadyDecided);
        }
        self.status = status;
        self.decision_reason = reason;
        Ok(())
    }
}
