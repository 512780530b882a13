//! Attendance log entity - one completed work session

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// A completed (clocked-out) work session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceLog {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub clock_in: DateTime<Utc>,
    pub clock_out: DateTime<Utc>,
    pub worked_secs: u64,
    pub break_secs: u64,
    /// Share of the session spent working, 0-100
    pub activity_pct: u8,
}

impl AttendanceLog {
    /// Create a log entry. Fails if `clock_out` precedes `clock_in`.
    pub fn new(
        id: Snowflake,
        user_id: Snowflake,
        clock_in: DateTime<Utc>,
        clock_out: DateTime<Utc>,
        worked_secs: u64,
        break_secs: u64,
    ) -> Result<Self, DomainError> {
        if clock_out < clock_in {
            return Err(DomainError::ClockOutBeforeClockIn);
        }
        Ok(Self {
            id,
            user_id,
            clock_in,
            clock_out,
            worked_secs,
            break_secs,
            activity_pct: activity_percentage(worked_secs, break_secs),
        })
    }

    /// Rewrite the session bounds and break total, recomputing the derived
    /// worked duration and activity share.
    pub fn revise(
        &mut self,
        clock_in: DateTime<Utc>,
        clock_out: DateTime<Utc>,
        break_secs: u64,
    ) -> Result<(), DomainError> {
        if clock_out < clock_in {
            return Err(DomainError::ClockOutBeforeClockIn);
        }
        let span = (clock_out - clock_in).num_seconds().max(0) as u64;
        self.clock_in = clock_in;
        self.clock_out = clock_out;
        self.break_secs = break_secs.min(span);
        self.worked_secs = span - self.break_secs;
        self.activity_pct = activity_percentage(self.worked_secs, self.break_secs);
        Ok(())
    }
}

/// Worked share of a session as a whole percent.
///
/// Deterministic replacement for what the mock UI filled with a random
/// number: a zero-length session counts as fully active.
#[must_use]
pub fn activity_percentage(worked_secs: u64, break_secs: u64) -> u8 {
    let total = worked_secs + break_secs;
    if total == 0 {
        return 100;
    }
    ((worked_secs * 100 + total / 2) / total) as u8
}
