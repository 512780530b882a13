//! Shift session state machine - clock-in/break/clock-out tracking
//!
//! Pure state: every transition takes an explicit `now`, so the machine is
//! testable without sleeping and robust to tick delivery jitter. The
//! periodic tick driver lives in the service layer.

use chrono::{DateTime, Duration, Utc};

use crate::error::DomainError;

/// Where a shift session currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftState {
    /// Not clocked in
    Idle,
    /// Clocked in and accruing worked time
    Working,
    /// Clocked in, accrual frozen
    OnBreak,
    /// Session finished; a new clock-in starts over
    ClockedOut,
}

impl ShiftState {
    /// Name used in error messages and logs
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Working => "working",
            Self::OnBreak => "on-break",
            Self::ClockedOut => "clocked-out",
        }
    }
}

impl std::fmt::Display for ShiftState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Totals of a finished session, handed to the attendance log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftSummary {
    pub clock_in: DateTime<Utc>,
    pub clock_out: DateTime<Utc>,
    pub worked_secs: u64,
    pub break_secs: u64,
}

/// One user's shift session
#[derive(Debug, Clone)]
pub struct ShiftSession {
    state: ShiftState,
    clock_in_at: Option<DateTime<Utc>>,
    /// High-water mark of accrued worked time; fractional seconds between
    /// ticks are carried forward, not dropped
    last_accrual: Option<DateTime<Utc>>,
    break_started_at: Option<DateTime<Utc>>,
    worked_secs: u64,
    break_secs: u64,
}

impl ShiftSession {
    /// A fresh, idle session
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: ShiftState::Idle,
            clock_in_at: None,
            last_accrual: None,
            break_started_at: None,
            worked_secs: 0,
            break_secs: 0,
        }
    }

    /// Current state
    #[inline]
    #[must_use]
    pub fn state(&self) -> ShiftState {
        self.state
    }

    /// Accrued worked seconds so far
    #[inline]
    #[must_use]
    pub fn worked_secs(&self) -> u64 {
        self.worked_secs
    }

    /// Accrued break seconds so far
    #[inline]
    #[must_use]
    pub fn break_secs(&self) -> u64 {
        self.break_secs
    }

    /// Start a session. Allowed from `Idle` or `ClockedOut`; resets both
    /// accumulators.
    pub fn clock_in(&mut self, now: DateTime<Utc>) -> Result<(), DomainError> {
        match self.state {
            ShiftState::Idle | ShiftState::ClockedOut => {
                self.state = ShiftState::Working;
                self.clock_in_at = Some(now);
                self.last_accrual = Some(now);
                self.break_started_at = None;
                self.worked_secs = 0;
                self.break_secs = 0;
                Ok(())
            }
            from => Err(DomainError::InvalidShiftTransition {
                from: from.as_str(),
                action: "clock-in",
            }),
        }
    }

    /// Freeze worked-time accrual. Allowed from `Working`.
    pub fn start_break(&mut self, now: DateTime<Utc>) -> Result<(), DomainError> {
        match self.state {
            ShiftState::Working => {
                self.accrue_worked(now);
                self.state = ShiftState::OnBreak;
                self.break_started_at = Some(now);
                Ok(())
            }
            from => Err(DomainError::InvalidShiftTransition {
                from: from.as_str(),
                action: "start-break",
            }),
        }
    }

    /// Resume accrual, folding the finished break interval into the break
    /// accumulator. Allowed from `OnBreak`.
    pub fn end_break(&mut self, now: DateTime<Utc>) -> Result<(), DomainError> {
        match self.state {
            ShiftState::OnBreak => {
                self.finalize_break(now);
                self.state = ShiftState::Working;
                self.last_accrual = Some(now);
                Ok(())
            }
            from => Err(DomainError::InvalidShiftTransition {
                from: from.as_str(),
                action: "end-break",
            }),
        }
    }

    /// Accrue elapsed worked time. A no-op outside `Working`, so a straggler
    /// tick delivered after a transition cannot corrupt the totals.
    pub fn tick(&mut self, now: DateTime<Utc>) {
        if self.state == ShiftState::Working {
            self.accrue_worked(now);
        }
    }

    /// End the session. Allowed from `Working` or `OnBreak`; an open break
    /// is finalized first.
    pub fn clock_out(&mut self, now: DateTime<Utc>) -> Result<ShiftSummary, DomainError> {
        match self.state {
            ShiftState::Working => self.accrue_worked(now),
            ShiftState::OnBreak => self.finalize_break(now),
            from => {
                return Err(DomainError::InvalidShiftTransition {
                    from: from.as_str(),
                    action: "clock-out",
                })
            }
        }

        self.state = ShiftState::ClockedOut;
        let clock_in = self.clock_in_at.unwrap_or(now);
        Ok(ShiftSummary {
            clock_in,
            clock_out: now.max(clock_in),
            worked_secs: self.worked_secs,
            break_secs: self.break_secs,
        })
    }

    fn accrue_worked(&mut self, now: DateTime<Utc>) {
        let Some(mark) = self.last_accrual else {
            return;
        };
        let elapsed = (now - mark).num_seconds();
        if elapsed > 0 {
            self.worked_secs += elapsed as u64;
            // Advance the mark by whole seconds only; the sub-second
            // remainder counts toward the next tick
            self.last_accrual = Some(mark + Duration::seconds(elapsed));
        }
    }

    fn finalize_break(&mut self, now: DateTime<Utc>) {
        if let Some(started) = self.break_started_at.take() {
            let elapsed = (now - started).num_seconds();
            if elapsed > 0 {
                self.break_secs += elapsed as u64;
            }
        }
    }
}

impl Default for ShiftSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_750_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn test_full_shift_timeline() {
        let mut session = ShiftSession::new();
        session.clock_in(t(0)).unwrap();
        assert_eq!(session.state(), ShiftState::Working);

        for i in 1..=5 {
            session.tick(t(i));
        }
        session.start_break(t(5)).unwrap();
        session.end_break(t(8)).unwrap();
        session.tick(t(9));
        let summary = session.clock_out(t(10)).unwrap();

        assert_eq!(summary.worked_secs, 7);
        assert_eq!(summary.break_secs, 3);
        assert_eq!(summary.clock_in, t(0));
        assert_eq!(summary.clock_out, t(10));
        assert_eq!(session.state(), ShiftState::ClockedOut);
    }

    #[test]
    fn test_accrual_survives_tick_jitter() {
        let mut session = ShiftSession::new();
        session.clock_in(t(0)).unwrap();

        // One late tick covering five seconds accrues the same as five
        // on-time ticks
        session.tick(t(5));
        assert_eq!(session.worked_secs(), 5);
    }

    #[test]
    fn test_no_accrual_while_on_break() {
        let mut session = ShiftSession::new();
        session.clock_in(t(0)).unwrap();
        session.start_break(t(2)).unwrap();
        session.tick(t(7));
        assert_eq!(session.worked_secs(), 2);

        session.end_break(t(7)).unwrap();
        session.tick(t(9));
        assert_eq!(session.worked_secs(), 4);
        assert_eq!(session.break_secs(), 5);
    }

    #[test]
    fn test_clock_out_from_break_finalizes_interval() {
        let mut session = ShiftSession::new();
        session.clock_in(t(0)).unwrap();
        session.tick(t(4));
        session.start_break(t(4)).unwrap();
        let summary = session.clock_out(t(10)).unwrap();

        assert_eq!(summary.worked_secs, 4);
        assert_eq!(summary.break_secs, 6);
    }

    #[test]
    fn test_reclock_in_resets_accumulators() {
        let mut session = ShiftSession::new();
        session.clock_in(t(0)).unwrap();
        session.tick(t(5));
        session.clock_out(t(5)).unwrap();

        session.clock_in(t(100)).unwrap();
        assert_eq!(session.worked_secs(), 0);
        assert_eq!(session.break_secs(), 0);
    }

    #[test]
    fn test_invalid_transitions_are_rejected() {
        let mut session = ShiftSession::new();
        assert!(session.start_break(t(0)).is_err());
        assert!(session.end_break(t(0)).is_err());
        assert!(session.clock_out(t(0)).is_err());

        session.clock_in(t(0)).unwrap();
        assert!(session.clock_in(t(1)).is_err());
        assert!(session.end_break(t(1)).is_err());

        session.start_break(t(2)).unwrap();
        assert!(session.start_break(t(3)).is_err());
    }

    #[test]
    fn test_straggler_tick_after_clock_out_is_ignored() {
        let mut session = ShiftSession::new();
        session.clock_in(t(0)).unwrap();
        let summary = session.clock_out(t(3)).unwrap();
        session.tick(t(10));

        assert_eq!(session.worked_secs(), summary.worked_secs);
    }

    #[test]
    fn test_subsecond_remainder_carries_forward() {
        use chrono::Duration;

        let mut session = ShiftSession::new();
        session.clock_in(t(0)).unwrap();

        // Two 1.5s ticks: 3 full seconds total, none lost to truncation
        session.tick(t(1) + Duration::milliseconds(500));
        session.tick(t(3));
        assert_eq!(session.worked_secs(), 3);
    }
}
