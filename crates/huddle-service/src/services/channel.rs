//! Channel service
//!
//! Channel creation and membership management.

use tracing::{info, instrument};
use validator::Validate;

use huddle_core::{Channel, DomainError, Snowflake};

use crate::dto::{channel_response, ChannelResponse, CreateChannelRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Channel service
pub struct ChannelService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ChannelService<'a> {
    /// Create a new ChannelService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a channel. The creator becomes the first member; requested
    /// initial members are resolved and added in the given order.
    #[instrument(skip(self, request))]
    pub async fn create_channel(
        &self,
        creator_id: Snowflake,
        request: CreateChannelRequest,
    ) -> ServiceResult<ChannelResponse> {
        request.validate()?;

        // Creator must be a known user
        self.require_user(creator_id).await?;

        let mut channel = Channel::new(
            self.ctx.generate_id(),
            request.name,
            request.description,
            request.private,
            creator_id,
        );

        for raw_id in &request.member_ids {
            let member_id = raw_id
                .parse::<Snowflake>()
                .map_err(|_| ServiceError::validation("Invalid member id format"))?;
            self.require_user(member_id).await?;
            channel.add_member(member_id);
        }

        self.ctx.channel_dir().create(&channel).await?;
        info!(channel_id = %channel.id, name = %channel.name, "Channel created");
        Ok(channel_response(&channel))
    }

    /// Get channel by ID
    #[instrument(skip(self))]
    pub async fn get_channel(&self, channel_id: Snowflake) -> ServiceResult<ChannelResponse> {
        let channel = self.require_channel(channel_id).await?;
        Ok(channel_response(&channel))
    }

    /// All channels in creation order
    pub async fn list_channels(&self) -> ServiceResult<Vec<ChannelResponse>> {
        let channels = self.ctx.channel_dir().list().await?;
        Ok(channels.iter().map(channel_response).collect())
    }

    /// Add a member. The caller must already be a member themselves.
    #[instrument(skip(self))]
    pub async fn add_member(
        &self,
        channel_id: Snowflake,
        caller_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<ChannelResponse> {
        let mut channel = self.require_channel(channel_id).await?;
        if !channel.is_member(caller_id) {
            return Err(DomainError::NotChannelMember.into());
        }
        self.require_user(user_id).await?;

        if !channel.add_member(user_id) {
            return Err(DomainError::AlreadyMember.into());
        }
        self.ctx.channel_dir().update(&channel).await?;

        info!(channel_id = %channel_id, user_id = %user_id, "Member added");
        Ok(channel_response(&channel))
    }

    /// Remove a member. The caller must be a member; the creator can never
    /// be removed.
    #[instrument(skip(self))]
    pub async fn remove_member(
        &self,
        channel_id: Snowflake,
        caller_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<ChannelResponse> {
        let mut channel = self.require_channel(channel_id).await?;
        if !channel.is_member(caller_id) {
            return Err(DomainError::NotChannelMember.into());
        }
        if user_id == channel.created_by {
            return Err(DomainError::CannotRemoveCreator.into());
        }
        if !channel.remove_member(user_id) {
            return Err(DomainError::NotChannelMember.into());
        }
        self.ctx.channel_dir().update(&channel).await?;

        info!(channel_id = %channel_id, user_id = %user_id, "Member removed");
        Ok(channel_response(&channel))
    }

    async fn require_channel(&self, channel_id: Snowflake) -> ServiceResult<Channel> {
        self.ctx
            .channel_dir()
            .find_by_id(channel_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Channel", channel_id.to_string()))
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
