//! Reaction service
//!
//! Emoji reaction toggling on messages.

use tracing::{debug, instrument};

use huddle_core::{ConversationKey, Snowflake};

use crate::dto::{message_response, MessageResponse, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Toggle the caller's reaction under `emoji`. A second identical call
    /// reverts the first; the updated message snapshot is returned.
    #[instrument(skip(self))]
    pub async fn toggle_reaction(
        &self,
        key: ConversationKey,
        message_id: Snowflake,
        caller_id: Snowflake,
        emoji: &str,
    ) -> ServiceResult<MessageResponse> {
        if emoji.is_empty() {
            return Err(ServiceError::validation("Emoji must not be empty"));
        }
        let caller = self
            .ctx
            .user_dir()
            .find_by_id(caller_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", caller_id.to_string()))?;

        let message = self
            .ctx
            .message_store()
            .toggle_reaction(key, message_id, emoji, caller_id)
            .await?;

        debug!(conversation = %key, message_id = %message_id, emoji, "Reaction toggled");

        let author = self
            .ctx
            .user_dir()
            .find_by_id(message.author_id)
            .await?
            .map(|u| UserResponse::from(&u))
            .unwrap_or_else(|| UserResponse::from(&caller));
        Ok(message_response(&message, author, caller_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::SendMessageRequest;
    use crate::services::message::MessageService;
    use huddle_common::AppConfig;
    use huddle_core::{User, UserRole};

    async fn setup() -> (ServiceContext, Snowflake, Snowflake, ConversationKey, Snowflake) {
        let ctx = ServiceContext::in_memory(AppConfig::default());
        let a = ctx.generate_id();
        let b = ctx.generate_id();
        for (id, name) in [(a, "Ana"), (b, "Ben")] {
            ctx.user_dir()
                .create(&User::new(
                    id,
                    name.to_string(),
                    format!("{}@example.com", name.to_lowercase()),
                    UserRole::Member,
                ))
                .await
                .unwrap();
        }

        let key = ConversationKey::direct(a, b);
        let sent = MessageService::new(&ctx)
            .send_message(key, a, SendMessageRequest::text("react away"))
            .await
            .unwrap();
        let message_id = sent.id.parse().unwrap();
        (ctx, a, b, key, message_id)
    }

    #[tokio::test]
    async fn test_toggle_adds_then_removes() {
        let (ctx, _, b, key, message_id) = setup().await;
        let service = ReactionService::new(&ctx);

        let once = service
            .toggle_reaction(key, message_id, b, "👍")
            .await
            .unwrap();
        assert_eq!(once.reactions.len(), 1);
        assert!(once.reactions[0].me);

        let twice = service
            .toggle_reaction(key, message_id, b, "👍")
            .await
            .unwrap();
        assert!(twice.reactions.is_empty());
    }

    #[tokio::test]
    async fn test_even_toggle_count_is_identity() {
        let (ctx, a, b, key, message_id) = setup().await;
        let service = ReactionService::new(&ctx);

        service.toggle_reaction(key, message_id, a, "🎉").await.unwrap();
        let baseline = MessageService::new(&ctx)
            .list_messages(key, a)
            .await
            .unwrap()[0]
            .reactions
            .clone();

        for _ in 0..6 {
            service.toggle_reaction(key, message_id, b, "🎉").await.unwrap();
        }

        let after = MessageService::new(&ctx)
            .list_messages(key, a)
            .await
            .unwrap()[0]
            .reactions
            .clone();
        assert_eq!(baseline, after);
    }

    #[tokio::test]
    async fn test_unknown_caller_rejected() {
        let (ctx, _, _, key, message_id) = setup().await;
        let service = ReactionService::new(&ctx);

        let result = service
            .toggle_reaction(key, message_id, Snowflake::new(999), "👍")
            .await;
        assert!(matches!(result, Err(ServiceError::NotFound { .. })));
    }
}
