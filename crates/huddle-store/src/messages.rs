//! In-memory message store
//!
//! One ordered log per conversation key. Author-only edit and delete are
//! enforced here so every caller path gets the same refusal.

use async_trait::async_trait;
use dashmap::DashMap;

use huddle_core::{ConversationKey, DomainError, Message, MessageStore, Snowflake, StoreResult};

/// Message store keyed by conversation
#[derive(Default)]
pub struct MemoryMessageStore {
    logs: DashMap<ConversationKey, Vec<Message>>,
}

impl MemoryMessageStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageStore for MemoryMessageStore {
    async fn append(&self, key: ConversationKey, message: Message) -> StoreResult<()> {
        tracing::debug!(conversation = %key, message_id = %message.id, "Message appended");
        self.logs.entry(key).or_default().push(message);
        Ok(())
    }

    async fn edit(
        &self,
        key: ConversationKey,
        message_id: Snowflake,
        caller_id: Snowflake,
        content: String,
    ) -> StoreResult<Message> {
        let mut log = self
            .logs
            .get_mut(&key)
            .ok_or(DomainError::MessageNotFound(message_id))?;

        let message = log
            .iter_mut()
            .find(|m| m.id == message_id)
            .ok_or(DomainError::MessageNotFound(message_id))?;

        if message.author_id != caller_id {
            return Err(DomainError::NotMessageAuthor);
        }

        message.edit(content);
        Ok(message.clone())
    }

    async fn delete(
        &self,
        key: ConversationKey,
        message_id: Snowflake,
        caller_id: Snowflake,
    ) -> StoreResult<()> {
        let mut log = self
            .logs
            .get_mut(&key)
            .ok_or(DomainError::MessageNotFound(message_id))?;

        let pos = log
            .iter()
            .position(|m| m.id == message_id)
            .ok_or(DomainError::MessageNotFound(message_id))?;

        if log[pos].author_id != caller_id {
            return Err(DomainError::NotMessageAuthor);
        }

        log.remove(pos);
        Ok(())
    }

    async fn toggle_reaction(
        &self,
        key: ConversationKey,
        message_id: Snowflake,
        emoji: &str,
        user_id: Snowflake,
    ) -> StoreResult<Message> {
        let mut log = self
            .logs
            .get_mut(&key)
            .ok_or(DomainError::MessageNotFound(message_id))?;

        let message = log
            .iter_mut()
            .find(|m| m.id == message_id)
            .ok_or(DomainError::MessageNotFound(message_id))?;

        message.toggle_reaction(emoji, user_id);
        Ok(message.clone())
    }

    async fn list_for(&self, key: ConversationKey) -> StoreResult<Vec<Message>> {
        // A conversation with no messages yet is an empty log, not an error
        Ok(self
            .logs
            .get(&key)
            .map(|log| log.value().clone())
            .unwrap_or_default())
    }
}
