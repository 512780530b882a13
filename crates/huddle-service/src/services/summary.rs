//! Summary service
//!
//! Conversation summarization through the language-model port. The port
//! failing is an outcome ("summary unavailable"), never an engine error.

use tracing::{instrument, warn};

use huddle_core::{ConversationKey, Snowflake};

use crate::dto::SummaryOutcome;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Summary service
pub struct SummaryService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SummaryService<'a> {
    /// Create a new SummaryService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Summarize a conversation's messages in order
    #[instrument(skip(self))]
    pub async fn summarize(
        &self,
        key: ConversationKey,
        viewer_id: Snowflake,
    ) -> ServiceResult<SummaryOutcome> {
        let label = self.conversation_label(key, viewer_id).await?;
        let texts: Vec<String> = self
            .ctx
            .message_store()
            .list_for(key)
            .await?
            .into_iter()
            .map(|m| m.content)
            .collect();

        match self.ctx.summarizer().summarize(&label, &texts).await {
            Ok(text) => Ok(SummaryOutcome::Ready { text }),
            Err(err) => {
                warn!(conversation = %key, error = %err, "Summarizer unavailable");
                Ok(SummaryOutcome::Unavailable {
                    reason: err.to_string(),
                })
            }
        }
    }

    async fn conversation_label(
        &self,
        key: ConversationKey,
        viewer_id: Snowflake,
    ) -> ServiceResult<String> {
        match key {
            ConversationKey::Channel { channel_id } => {
                let channel = self
                    .ctx
                    .channel_dir()
                    .find_by_id(channel_id)
                    .await?
                    .ok_or_else(|| ServiceError::not_found("Channel", channel_id.to_string()))?;
                Ok(format!("#{}", channel.name))
            }
            ConversationKey::Direct { .. } => {
                let peer_id = key
                    .direct_peer(viewer_id)
                    .ok_or_else(|| ServiceError::validation("Viewer is not part of this DM"))?;
                let peer = self
                    .ctx
                    .user_dir()
                    .find_by_id(peer_id)
                    .await?
                    .ok_or_else(|| ServiceError::not_found("User", peer_id.to_string()))?;
                Ok(peer.name)
            }
        }
    }
}
