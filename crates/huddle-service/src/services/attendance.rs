//! Attendance service
//!
//! Drives the per-user shift state machine and maintains the attendance
//! log. Each public operation has an `*_at` twin taking an explicit `now`,
//! which is what the tests use; the plain variants stamp the wall clock.
//! The periodic tick itself is scheduled by the workspace facade.

use chrono::{DateTime, Utc};
use tracing::{info, instrument};

use huddle_core::{AttendanceLog, DomainError, ShiftState, Snowflake};

use crate::dto::{attendance_response, AttendanceLogResponse, EditAttendanceRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Attendance service
pub struct AttendanceService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AttendanceService<'a> {
    /// Create a new AttendanceService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Current shift state for a user (`Idle` when never clocked in)
    pub fn state(&self, user_id: Snowflake) -> ShiftState {
        self.ctx
            .shift_sessions()
            .lock()
            .get(&user_id)
            .map_or(ShiftState::Idle, |s| s.state())
    }

    /// Accrued worked/break seconds of the live session
    pub fn live_totals(&self, user_id: Snowflake) -> (u64, u64) {
        self.ctx
            .shift_sessions()
            .lock()
            .get(&user_id)
            .map_or((0, 0), |s| (s.worked_secs(), s.break_secs()))
    }

    /// Start a shift
    #[instrument(skip(self))]
    pub async fn clock_in(&self, user_id: Snowflake) -> ServiceResult<()> {
        self.clock_in_at(user_id, Utc::now()).await
    }

    pub async fn clock_in_at(&self, user_id: Snowflake, now: DateTime<Utc>) -> ServiceResult<()> {
        self.require_user(user_id).await?;
        self.ctx
            .shift_sessions()
            .lock()
            .entry(user_id)
            .or_default()
            .clock_in(now)?;
        info!(user_id = %user_id, "Clocked in");
        Ok(())
    }

    /// Pause the shift
    #[instrument(skip(self))]
    pub async fn start_break(&self, user_id: Snowflake) -> ServiceResult<()> {
        self.start_break_at(user_id, Utc::now()).await
    }

    pub async fn start_break_at(
        &self,
        user_id: Snowflake,
        now: DateTime<Utc>,
    ) -> ServiceResult<()> {
        self.with_session(user_id, |session| session.start_break(now))?;
        info!(user_id = %user_id, "Break started");
        Ok(())
    }

    /// Resume the shift
    #[instrument(skip(self))]
    pub async fn end_break(&self, user_id: Snowflake) -> ServiceResult<()> {
        self.end_break_at(user_id, Utc::now()).await
    }

    pub async fn end_break_at(&self, user_id: Snowflake, now: DateTime<Utc>) -> ServiceResult<()> {
        self.with_session(user_id, |session| session.end_break(now))?;
        info!(user_id = %user_id, "Break ended");
        Ok(())
    }

    /// One accrual tick. Harmless outside `Working`, so the driver racing a
    /// transition cannot corrupt totals.
    pub fn tick(&self, user_id: Snowflake) {
        self.tick_at(user_id, Utc::now());
    }

    pub fn tick_at(&self, user_id: Snowflake, now: DateTime<Utc>) {
        if let Some(session) = self.ctx.shift_sessions().lock().get_mut(&user_id) {
            session.tick(now);
        }
    }

    /// Finish the shift and persist the completed log entry
    #[instrument(skip(self))]
    pub async fn clock_out(&self, user_id: Snowflake) -> ServiceResult<AttendanceLogResponse> {
        self.clock_out_at(user_id, Utc::now()).await
    }

    pub async fn clock_out_at(
        &self,
        user_id: Snowflake,
        now: DateTime<Utc>,
    ) -> ServiceResult<AttendanceLogResponse> {
        let summary = self.with_session(user_id, |session| session.clock_out(now))?;

        let log = AttendanceLog::new(
            self.ctx.generate_id(),
            user_id,
            summary.clock_in,
            summary.clock_out,
            summary.worked_secs,
            summary.break_secs,
        )?;
        self.ctx.attendance_store().create(&log).await?;

        info!(
            user_id = %user_id,
            worked_secs = summary.worked_secs,
            break_secs = summary.break_secs,
            "Clocked out"
        );
        Ok(attendance_response(&log))
    }

    /// Rewrite a recorded entry. Owner or admin only.
    #[instrument(skip(self, request))]
    pub async fn edit_log(
        &self,
        caller_id: Snowflake,
        log_id: Snowflake,
        request: EditAttendanceRequest,
    ) -> ServiceResult<AttendanceLogResponse> {
        let mut log = self.require_log(log_id).await?;
        self.require_owner_or_admin(caller_id, log.user_id).await?;

        log.revise(request.clock_in, request.clock_out, request.break_secs)?;
        self.ctx.attendance_store().update(&log).await?;

        info!(log_id = %log_id, "Attendance log revised");
        Ok(attendance_response(&log))
    }

    /// Delete a recorded entry. Owner or admin only.
    #[instrument(skip(self))]
    pub async fn delete_log(&self, caller_id: Snowflake, log_id: Snowflake) -> ServiceResult<()> {
        let log = self.require_log(log_id).await?;
        self.require_owner_or_admin(caller_id, log.user_id).await?;

        self.ctx.attendance_store().delete(log_id).await?;
        info!(log_id = %log_id, "Attendance log deleted");
        Ok(())
    }

    /// A user's log entries in creation order
    pub async fn list_logs(&self, user_id: Snowflake) -> ServiceResult<Vec<AttendanceLogResponse>> {
        let logs = self.ctx.attendance_store().list_for_user(user_id).await?;
        Ok(logs.iter().map(attendance_response).collect())
    }

    fn with_session<T>(
        &self,
        user_id: Snowflake,
        f: impl FnOnce(&mut huddle_core::ShiftSession) -> Result<T, DomainError>,
    ) -> ServiceResult<T> {
        let mut sessions = self.ctx.shift_sessions().lock();
        let session = sessions.get_mut(&user_id).ok_or(
            DomainError::InvalidShiftTransition {
                from: ShiftState::Idle.as_str(),
                action: "proceed",
            },
        )?;
        f(session).map_err(ServiceError::from)
    }

    async fn require_user(&self, user_id: Snowflake) -> ServiceResult<()> {
        self.ctx
            .user_dir()
            .find_by_id(user_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))
    }

    async fn require_log(&self, log_id: Snowflake) -> ServiceResult<AttendanceLog> {
        self.ctx
            .attendance_store()
            .find_by_id(log_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Attendance log", log_id.to_string()))
    }

    async fn require_owner_or_admin(
        &self,
        caller_id: Snowflake,
        owner_id: Snowflake,
    ) -> ServiceResult<()> {
        if caller_id == owner_id {
            return Ok(());
        }
        let caller = self
            .ctx
            .user_dir()
            .find_by_id(caller_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", caller_id.to_string()))?;
        if caller.is_admin() {
            Ok(())
        } else {
            Err(ServiceError::permission_denied(
                "only the owner or an admin may change attendance logs",
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use huddle_common::AppConfig;
    use huddle_core::{User, UserRole};

    fn t(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_760_000_000 + secs, 0).unwrap()
    }

    async fn setup() -> (ServiceContext, Snowflake, Snowflake) {
        let ctx = ServiceContext::in_memory(AppConfig::default());
        let worker = ctx.generate_id();
        let admin = ctx.generate_id();
        ctx.user_dir()
            .create(&User::new(
                worker,
                "Worker".to_string(),
                "worker@example.com".to_string(),
                UserRole::Member,
            ))
            .await
            .unwrap();
        ctx.user_dir()
            .create(&User::new(
                admin,
                "Boss".to_string(),
                "boss@example.com".to_string(),
                UserRole::Admin,
            ))
            .await
            .unwrap();
        (ctx, worker, admin)
    }

    #[tokio::test]
    async fn test_shift_produces_log_entry() {
        let (ctx, worker, _) = setup().await;
        let service = AttendanceService::new(&ctx);

        service.clock_in_at(worker, t(0)).await.unwrap();
        for i in 1..=5 {
            service.tick_at(worker, t(i));
        }
        service.start_break_at(worker, t(5)).await.unwrap();
        service.end_break_at(worker, t(8)).await.unwrap();
        service.tick_at(worker, t(9));
        let entry = service.clock_out_at(worker, t(10)).await.unwrap();

        assert_eq!(entry.worked_secs, 7);
        assert_eq!(entry.break_secs, 3);
        assert_eq!(entry.activity_pct, 70);
        assert_eq!(entry.worked_hms, "00:00:07");

        let listed = service.list_logs(worker).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(service.state(worker), ShiftState::ClockedOut);
    }

    #[tokio::test]
    async fn test_invalid_transition_is_explicit_error() {
        let (ctx, worker, _) = setup().await;
        let service = AttendanceService::new(&ctx);

        let result = service.start_break_at(worker, t(0)).await;
        assert!(matches!(
            result,
            Err(ServiceError::Domain(
                DomainError::InvalidShiftTransition { .. }
            ))
        ));
    }

    #[tokio::test]
    async fn test_edit_log_authorization() {
        let (ctx, worker, admin) = setup().await;
        let service = AttendanceService::new(&ctx);

        service.clock_in_at(worker, t(0)).await.unwrap();
        service.tick_at(worker, t(60));
        let entry = service.clock_out_at(worker, t(60)).await.unwrap();
        let log_id: Snowflake = entry.id.parse().unwrap();

        let other = ctx.generate_id();
        ctx.user_dir()
            .create(&User::new(
                other,
                "Other".to_string(),
                "other@example.com".to_string(),
                UserRole::Member,
            ))
            .await
            .unwrap();

        let denied = service
            .edit_log(
                other,
                log_id,
                EditAttendanceRequest {
                    clock_in: t(0),
                    clock_out: t(30),
                    break_secs: 0,
                },
            )
            .await;
        assert!(denied.unwrap_err().is_denied());

        let revised = service
            .edit_log(
                admin,
                log_id,
                EditAttendanceRequest {
                    clock_in: t(0),
                    clock_out: t(30),
                    break_secs: 10,
                },
            )
            .await
            .unwrap();
        assert_eq!(revised.worked_secs, 20);
        assert_eq!(revised.break_secs, 10);
    }

    #[tokio::test]
    async fn test_edit_rejects_inverted_bounds() {
        let (ctx, worker, _) = setup().await;
        let service = AttendanceService::new(&ctx);

        service.clock_in_at(worker, t(0)).await.unwrap();
        let entry = service.clock_out_at(worker, t(10)).await.unwrap();
        let log_id: Snowflake = entry.id.parse().unwrap();

        let result = service
            .edit_log(
                worker,
                log_id,
                EditAttendanceRequest {
                    clock_in: t(10),
                    clock_out: t(10) - Duration::seconds(5),
                    break_secs: 0,
                },
            )
            .await;
        assert!(matches!(
            result,
            Err(ServiceError::Domain(DomainError::ClockOutBeforeClockIn))
        ));
    }

    #[tokio::test]
    async fn test_delete_log() {
        let (ctx, worker, _) = setup().await;
        let service = AttendanceService::new(&ctx);

        service.clock_in_at(worker, t(0)).await.unwrap();
        let entry = service.clock_out_at(worker, t(10)).await.unwrap();
        let log_id: Snowflake = entry.id.parse().unwrap();

        service.delete_log(worker, log_id).await.unwrap();
        assert!(service.list_logs(worker).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reclock_after_clock_out() {
        let (ctx, worker, _) = setup().await;
        let service = AttendanceService::new(&ctx);

        service.clock_in_at(worker, t(0)).await.unwrap();
        service.clock_out_at(worker, t(10)).await.unwrap();
        service.clock_in_at(worker, t(100)).await.unwrap();

        assert_eq!(service.state(worker), ShiftState::Working);
        assert_eq!(service.live_totals(worker), (0, 0));
    }
}
