//! Message service
//!
//! Sending, editing, deleting, and listing conversation messages.

use tracing::{info, instrument};
use validator::Validate;

use huddle_core::{
    Attachment, ConversationKey, DomainError, FileKind, Message, Snowflake, User,
};

use crate::dto::{
    message_response, EditMessageRequest, MessageResponse, SendMessageRequest, UserResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Message service
pub struct MessageService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MessageService<'a> {
    /// Create a new MessageService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Send a message into a conversation
    #[instrument(skip(self, request))]
    pub async fn send_message(
        &self,
        key: ConversationKey,
        author_id: Snowflake,
        request: SendMessageRequest,
    ) -> ServiceResult<MessageResponse> {
        request.validate()?;

        let author = self.require_user(author_id).await?;
        self.verify_conversation(key, author_id).await?;

        let mut message = Message::new(self.ctx.generate_id(), author_id, request.content);
        if let Some(upload) = request.attachment {
            message = message.with_attachment(Attachment::new(
                upload.filename,
                upload.url,
                FileKind::from_content_type(&upload.content_type),
            ));
        }

        self.ctx.message_store().append(key, message.clone()).await?;
        info!(conversation = %key, message_id = %message.id, "Message sent");

        Ok(message_response(
            &message,
            UserResponse::from(&author),
            author_id,
        ))
    }

    /// Edit a message. Author only; the refusal is an explicit error, never
    /// a silent drop.
    #[instrument(skip(self, request))]
    pub async fn edit_message(
        &self,
        key: ConversationKey,
        message_id: Snowflake,
        caller_id: Snowflake,
        request: EditMessageRequest,
    ) -> ServiceResult<MessageResponse> {
        request.validate()?;

        let caller = self.require_user(caller_id).await?;
        let message = self
            .ctx
            .message_store()
            .edit(key, message_id, caller_id, request.content)
            .await?;

        info!(conversation = %key, message_id = %message_id, "Message edited");
        Ok(message_response(
            &message,
            UserResponse::from(&caller),
            caller_id,
        ))
    }

    /// Delete a message. Author only.
    #[instrument(skip(self))]
    pub async fn delete_message(
        &self,
        key: ConversationKey,
        message_id: Snowflake,
        caller_id: Snowflake,
    ) -> ServiceResult<()> {
        self.require_user(caller_id).await?;
        self.ctx
            .message_store()
            .delete(key, message_id, caller_id)
            .await?;

        info!(conversation = %key, message_id = %message_id, "Message deleted");
        Ok(())
    }

    /// Snapshot of a conversation's log, with authors resolved and reaction
    /// `me` flags computed for `viewer_id`
    #[instrument(skip(self))]
    pub async fn list_messages(
        &self,
        key: ConversationKey,
        viewer_id: Snowflake,
    ) -> ServiceResult<Vec<MessageResponse>> {
        let messages = self.ctx.message_store().list_for(key).await?;
        let mut responses = Vec::with_capacity(messages.len());

        for message in &messages {
            let author = self
                .ctx
                .user_dir()
                .find_by_id(message.author_id)
                .await?
                .map(|u| UserResponse::from(&u))
                .unwrap_or_else(|| removed_user_response(message.author_id));
            responses.push(message_response(message, author, viewer_id));
        }

        Ok(responses)
    }

    /// Verify the conversation target exists and the author may post there
    async fn verify_conversation(
        &self,
        key: ConversationKey,
        author_id: Snowflake,
    ) -> ServiceResult<()> {
        match key {
            ConversationKey::Channel { channel_id } => {
                let channel = self
                    .ctx
                    .channel_dir()
                    .find_by_id(channel_id)
                    .await?
                    .ok_or_else(|| ServiceError::not_found("Channel", channel_id.to_string()))?;
                if !channel.is_member(author_id) {
                    return Err(DomainError::NotChannelMember.into());
                }
            }
            ConversationKey::Direct { .. } => {
                let peer = key
                    .direct_peer(author_id)
                    .ok_or_else(|| ServiceError::validation("Author is not part of this DM"))?;
                self.require_user(peer).await?;
            }
        }
        Ok(())
    }

    async fn require_user(&self, user_id: Snowflake) -> ServiceResult<User> {
        self.ctx
            .user_dir()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))
    }
}

/// Placeholder author for messages whose user record is gone
fn removed_user_response(author_id: Snowflake) -> UserResponse {
    UserResponse {
        id: author_id.to_string(),
        name: "[Removed User]".to_string(),
        email: String::new(),
        role: "member".to_string(),
        online: false,
        designation: None,
        phone: None,
        avatar_url: String::new(),
        created_at: chrono::Utc::now(),
    }
}
