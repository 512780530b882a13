//! Leave service
//!
//! Leave request submission and admin decisions.

use tracing::{info, instrument};
use validator::Validate;

use huddle_core::{DomainError, LeaveRequest, Snowflake};

use crate::dto::{leave_response, LeaveRequestInput, LeaveResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Leave service
pub struct LeaveService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> LeaveService<'a> {
    /// Create a new LeaveService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Submit a leave request; it starts pending
    #[instrument(skip(self, input))]
    pub async fn submit(
        &self,
        user_id: Snowflake,
        input: LeaveRequestInput,
    ) -> ServiceResult<LeaveResponse> {
        input.validate()?;
        self.require_user(user_id).await?;

        let request = LeaveRequest::new(
            self.ctx.generate_id(),
            user_id,
            input.start_date,
            input.end_date,
            input.reason,
        )?;
        self.ctx.leave_store().create(&request).await?;

        info!(request_id = %request.id, user_id = %user_id, "Leave request submitted");
        Ok(leave_response(&request))
    }

    /// Decide a pending request. Admin only; a request is decided at most
    /// once.
    #[instrument(skip(self, reason))]
    pub async fn decide(
        &self,
        approver_id: Snowflake,
        request_id: Snowflake,
        approve: bool,
        reason: Option<String>,
    ) -> ServiceResult<LeaveResponse> {
        let approver = self
            .ctx
            .user_dir()
            .find_by_id(approver_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", approver_id.to_string()))?;
        if !approver.is_admin() {
            return Err(DomainError::AdminRequired.into());
        }

        let mut request = self
            .ctx
            .leave_store()
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Leave request", request_id.to_string()))?;

        if approve {
            request.approve(reason)?;
        } else {
            request.reject(reason)?;
        }
        self.ctx.leave_store().update(&request).await?;

        info!(request_id = %request_id, status = %request.status, "Leave request decided");
        Ok(leave_response(&request))
    }

    /// A user's requests in submission order
    pub async fn list_for_user(&self, user_id: Snowflake) -> ServiceResult<Vec<LeaveResponse>> {
        let requests = self.ctx.leave_store().list_for_user(user_id).await?;
        Ok(requests.iter().map(leave_response).collect())
    }

    /// The pending queue. Admin only.
    #[instrument(skip(self))]
    pub async fn pending_queue(&self, caller_id: Snowflake) -> ServiceResult<Vec<LeaveResponse>> {
        let caller = self
            .ctx
            .user_dir()
            .find_by_id(caller_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", caller_id.to_string()))?;
        if !caller.is_admin() {
            return Err(DomainError::AdminRequired.into());
        }

        let requests = self.ctx.leave_store().list_pending().await?;
        Ok(requests.iter().map(leave_response).collect())
    }

    async fn require_user(&self, user_id: Snowflake) -> ServiceResult<()> {
        self.ctx
            .user_dir()
            .find_by_id(user_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use huddle_common::AppConfig;
    use huddle_core::{User, UserRole};

    async fn setup() -> (ServiceContext, Snowflake, Snowflake) {
        let ctx = ServiceContext::in_memory(AppConfig::default());
        let member = ctx.generate_id();
        let admin = ctx.generate_id();
        ctx.user_dir()
            .create(&User::new(
                member,
                "Member".to_string(),
                "member@example.com".to_string(),
                UserRole::Member,
            ))
            .await
            .unwrap();
        ctx.user_dir()
            .create(&User::new(
                admin,
                "Admin".to_string(),
                "admin@example.com".to_string(),
                UserRole::Admin,
            ))
            .await
            .unwrap();
        (ctx, member, admin)
    }

    fn input(start: (i32, u32, u32), end: (i32, u32, u32)) -> LeaveRequestInput {
        LeaveRequestInput {
            start_date: NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            end_date: NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
            reason: "Travel".to_string(),
        }
    }

    #[tokio::test]
    async fn test_submit_and_approve_once() {
        let (ctx, member, admin) = setup().await;
        let service = LeaveService::new(&ctx);

        let submitted = service
            .submit(member, input((2026, 9, 1), (2026, 9, 5)))
            .await
            .unwrap();
        assert_eq!(submitted.status, "pending");
        assert_eq!(submitted.day_count, 5);
        let request_id: Snowflake = submitted.id.parse().unwrap();

        let decided = service
            .decide(admin, request_id, true, Some("have fun".to_string()))
            .await
            .unwrap();
        assert_eq!(decided.status, "approved");

        // Terminal transition: a second decision fails
        let again = service.decide(admin, request_id, false, None).await;
        assert!(matches!(
            again,
            Err(ServiceError::Domain(DomainError::LeaveAlreadyDecided))
        ));
    }

    #[tokio::test]
    async fn test_member_cannot_decide() {
        let (ctx, member, _) = setup().await;
        let service = LeaveService::new(&ctx);

        let submitted = service
            .submit(member, input((2026, 9, 1), (2026, 9, 2)))
            .await
            .unwrap();
        let request_id: Snowflake = submitted.id.parse().unwrap();

        let denied = service.decide(member, request_id, true, None).await;
        assert!(denied.unwrap_err().is_denied());
    }

    #[tokio::test]
    async fn test_inverted_range_rejected() {
        let (ctx, member, _) = setup().await;
        let service = LeaveService::new(&ctx);

        let result = service.submit(member, input((2026, 9, 5), (2026, 9, 1))).await;
        assert!(matches!(
            result,
            Err(ServiceError::Domain(DomainError::InvalidDateRange))
        ));
    }

    #[tokio::test]
    async fn test_pending_queue_is_admin_only() {
        let (ctx, member, admin) = setup().await;
        let service = LeaveService::new(&ctx);
        service
            .submit(member, input((2026, 9, 1), (2026, 9, 2)))
            .await
            .unwrap();

        assert!(service.pending_queue(member).await.unwrap_err().is_denied());
        assert_eq!(service.pending_queue(admin).await.unwrap().len(), 1);
    }
}
