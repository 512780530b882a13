//! User service
//!
//! Profile edits, role changes, and presence flags.

use tracing::{info, instrument};
use validator::Validate;

use huddle_core::{Snowflake, User, UserRole};

use crate::dto::{UpdateProfileRequest, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get user by ID
    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: Snowflake) -> ServiceResult<UserResponse> {
        let user = self.require_user(user_id).await?;
        Ok(UserResponse::from(&user))
    }

    /// All users in join order
    pub async fn list_users(&self) -> ServiceResult<Vec<UserResponse>> {
        let users = self.ctx.user_dir().list().await?;
        Ok(users.iter().map(UserResponse::from).collect())
    }

    /// Update the caller's own profile; absent fields stay unchanged
    #[instrument(skip(self, request))]
    pub async fn update_profile(
        &self,
        user_id: Snowflake,
        request: UpdateProfileRequest,
    ) -> ServiceResult<UserResponse> {
        request.validate()?;

        let mut user = self.require_user(user_id).await?;
        if let Some(name) = request.name {
            user.set_name(name);
        }
        if let Some(designation) = request.designation {
            user.designation = Some(designation);
        }
        if let Some(phone) = request.phone {
            user.phone = Some(phone);
        }
        if let Some(avatar) = request.avatar {
            user.avatar = Some(avatar);
        }

        self.ctx.user_dir().update(&user).await?;
        info!(user_id = %user_id, "Profile updated");
        Ok(UserResponse::from(&user))
    }

    /// Change a user's workspace role. Admin only.
    #[instrument(skip(self))]
    pub async fn change_role(
        &self,
        caller_id: Snowflake,
        target_id: Snowflake,
        role: UserRole,
    ) -> ServiceResult<UserResponse> {
        let caller = self.require_user(caller_id).await?;
        if !caller.is_admin() {
            return Err(ServiceError::Domain(
                huddle_core::DomainError::AdminRequired,
            ));
        }

        let mut target = self.require_user(target_id).await?;
        target.set_role(role);
        self.ctx.user_dir().update(&target).await?;

        info!(target_id = %target_id, role = %role, "Role changed");
        Ok(UserResponse::from(&target))
    }

    /// Flip a user's online flag
    #[instrument(skip(self))]
    pub async fn set_online(&self, user_id: Snowflake, online: bool) -> ServiceResult<()> {
        let mut user = self.require_user(user_id).await?;
        user.set_online(online);
        self.ctx.user_dir().update(&user).await?;
        Ok(())
    }

    pub(crate) async fn require_user(&self, user_id: Snowflake) -> ServiceResult<User> {
        self.ctx
            .user_dir()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))
    }
}
